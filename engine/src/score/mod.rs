mod high_score;

pub use high_score::HighScoreStore;
