use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::provider::{ContentProvider, FileContentProvider};
use super::validate::Validate;
use super::yaml::{from_yaml, to_yaml};

pub struct ConfigStore<TConfig, TProvider = FileContentProvider>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TProvider: ContentProvider,
{
    provider: TProvider,
    cached: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigStore<TConfig, FileContentProvider>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentProvider::new(file_path.to_string()))
    }
}

impl<TConfig, TProvider> ConfigStore<TConfig, TProvider>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TProvider: ContentProvider,
{
    pub fn new(provider: TProvider) -> Self {
        Self {
            provider,
            cached: Mutex::new(None),
        }
    }

    pub fn get(&self) -> Result<TConfig, String> {
        let mut cached = self.cached.lock().unwrap();

        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.provider.load()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = from_yaml(&content)?;
        config
            .validate()
            .map_err(|err| format!("Config validation error: {}", err))?;

        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|err| format!("Config validation error: {}", err))?;

        let content = to_yaml(config)?;
        self.provider.save(&content)?;

        *self.cached.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}
