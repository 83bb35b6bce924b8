mod bot;
mod engine;
mod session_rng;
mod snake;
mod types;

pub use bot::BotController;
pub use engine::{GameEngine, Snapshot};
pub use session_rng::SessionRng;
pub use snake::Snake;
pub use types::{Direction, GameOverCause, GridSize, Point, RunState, TickEvent};
