mod config;

use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use snake_engine::game::{BotController, GameEngine, SessionRng, Snapshot};
use snake_engine::log;
use snake_engine::logger;
use snake_engine::score::HighScoreStore;
use snake_engine::session::{SessionCommand, SessionObserver, SessionSettings, run_session};

#[derive(Parser)]
#[command(name = "snake_app")]
struct Args {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

// Headless stand-in for the touch screen: watches snapshots, steers via the
// command channel, and logs where a real host would repaint and play audio.
struct BotObserver {
    commands: mpsc::UnboundedSender<SessionCommand>,
    rng: Mutex<SessionRng>,
}

impl SessionObserver for BotObserver {
    async fn on_snapshot(&self, snapshot: Snapshot) {
        let mut rng = self.rng.lock().unwrap();
        if let Some(direction) = BotController::choose_direction(&snapshot, &mut rng) {
            let _ = self.commands.send(SessionCommand::Turn(direction));
        }
    }

    async fn on_food_eaten(&self) {
        log!("Food eaten");
    }

    async fn on_game_over(&self, final_score: u32) {
        log!("Game over. Final score: {}", final_score);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("SnakeApp".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let store = match &args.config {
        Some(path) => config::config_store_at(path),
        None => config::config_store(),
    };
    let cfg = store.get()?;

    let grid = cfg.grid();
    log!(
        "Surface {}x{} px at {} px cells -> {}x{} grid; tick {} ms; swipe threshold {} px",
        cfg.surface_width_px,
        cfg.surface_height_px,
        cfg.cell_size_px,
        grid.width,
        grid.height,
        cfg.tick_interval_ms,
        cfg.swipe_threshold_px
    );

    let settings = SessionSettings {
        grid_width: grid.width,
        grid_height: grid.height,
        tick_interval: Duration::from_millis(cfg.tick_interval_ms),
    };

    let scores = HighScoreStore::from_yaml_file(&cfg.high_score_file);

    for game in 1..=cfg.games_to_play {
        let seed = args.seed.unwrap_or_else(rand::random);
        log!("Game {}/{} starting (seed {})", game, cfg.games_to_play, seed);

        let engine = GameEngine::new(SessionRng::new(seed));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let observer = BotObserver {
            commands: command_tx,
            rng: Mutex::new(SessionRng::new(seed.wrapping_add(1))),
        };

        let final_score = run_session(&settings, engine, command_rx, observer).await?;

        if scores.record(final_score)? {
            log!("Game {} set a new high score: {}", game, final_score);
        } else {
            log!(
                "Game {} finished with score {} (best: {})",
                game,
                final_score,
                scores.best()?
            );
        }
    }

    Ok(())
}
