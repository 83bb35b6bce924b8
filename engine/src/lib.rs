pub mod config;
pub mod game;
pub mod input;
pub mod logger;
pub mod score;
pub mod session;

pub use game::{Direction, GameEngine, GameOverCause, GridSize, Point, RunState, Snapshot, TickEvent};
