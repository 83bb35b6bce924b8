use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::interval;

use crate::game::{Direction, GameEngine, RunState, Snapshot, TickEvent};
use crate::log;

use super::settings::SessionSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Pause,
    Resume,
    Quit,
}

// The seam the host hangs its renderer and audio cue on. Snapshots are owned
// copies; observers never see the live engine state.
pub trait SessionObserver: Send + Sync + 'static {
    fn on_snapshot(&self, snapshot: Snapshot) -> impl Future<Output = ()> + Send;

    fn on_food_eaten(&self) -> impl Future<Output = ()> + Send;

    fn on_game_over(&self, final_score: u32) -> impl Future<Output = ()> + Send;
}

// Drives the engine on a fixed cadence. The engine never schedules itself;
// this loop is the only caller for the lifetime of a session, so every
// operation stays serialized.
pub async fn run_session<TObserver: SessionObserver>(
    settings: &SessionSettings,
    mut engine: GameEngine,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    observer: TObserver,
) -> Result<u32, String> {
    settings.validate()?;

    let snapshot = engine.start(settings.grid_width, settings.grid_height);
    if snapshot.run_state != RunState::Running {
        return Err("Grid is not ready; session cannot start".to_string());
    }
    observer.on_snapshot(snapshot).await;

    let mut ticker = interval(settings.tick_interval);

    loop {
        ticker.tick().await;

        while let Ok(command) = commands.try_recv() {
            match command {
                SessionCommand::Turn(direction) => {
                    engine.set_direction(direction);
                }
                SessionCommand::Pause => {
                    engine.pause();
                }
                SessionCommand::Resume => {
                    engine.resume();
                }
                SessionCommand::Quit => {
                    log!("Session quit at score {}", engine.score());
                    return Ok(engine.score());
                }
            }
        }

        // Paused: keep draining commands but deliver no ticks.
        if engine.run_state() != RunState::Running {
            continue;
        }

        let snapshot = engine.tick();
        let event = snapshot.event;
        let score = snapshot.score;
        observer.on_snapshot(snapshot).await;

        match event {
            TickEvent::AteFood => observer.on_food_eaten().await,
            TickEvent::GameOver(_) => {
                // The one and only final-score report for this game.
                observer.on_game_over(score).await;
                return Ok(score);
            }
            TickEvent::None => {}
        }
    }
}
