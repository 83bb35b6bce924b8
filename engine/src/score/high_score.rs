use serde::{Deserialize, Serialize};

use crate::config::{ContentProvider, FileContentProvider, from_yaml, to_yaml};
use crate::log;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(default)]
    high_score: u32,
}

pub struct HighScoreStore<TProvider = FileContentProvider>
where
    TProvider: ContentProvider,
{
    provider: TProvider,
}

impl HighScoreStore<FileContentProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentProvider::new(file_path.to_string()))
    }
}

impl<TProvider> HighScoreStore<TProvider>
where
    TProvider: ContentProvider,
{
    pub fn new(provider: TProvider) -> Self {
        Self { provider }
    }

    pub fn best(&self) -> Result<u32, String> {
        match self.provider.load()? {
            Some(content) => Ok(from_yaml::<HighScoreRecord>(&content)?.high_score),
            None => Ok(0),
        }
    }

    // Strictly-greater rule: ties keep the stored record untouched.
    // Returns whether final_score became the new best.
    pub fn record(&self, final_score: u32) -> Result<bool, String> {
        let best = self.best()?;
        if final_score <= best {
            return Ok(false);
        }

        let record = HighScoreRecord {
            high_score: final_score,
        };
        self.provider.save(&to_yaml(&record)?)?;
        log!("New high score: {} (previous best: {})", final_score, best);
        Ok(true)
    }
}
