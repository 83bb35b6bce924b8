use serde::{Deserialize, Serialize};

use snake_engine::config::{ConfigStore, Validate};
use snake_engine::game::GridSize;
use snake_engine::input::DEFAULT_SWIPE_THRESHOLD_PX;
use snake_engine::session::DEFAULT_TICK_INTERVAL_MS;

const CONFIG_FILE_NAME: &str = "snake_app_config.yaml";

fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn config_store() -> ConfigStore<AppConfig> {
    ConfigStore::from_yaml_file(&default_config_path())
}

pub fn config_store_at(file_path: &str) -> ConfigStore<AppConfig> {
    ConfigStore::from_yaml_file(file_path)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub surface_width_px: u32,
    pub surface_height_px: u32,
    pub cell_size_px: u32,
    pub tick_interval_ms: u64,
    pub swipe_threshold_px: f32,
    pub high_score_file: String,
    pub games_to_play: u32,
}

impl AppConfig {
    pub fn grid(&self) -> GridSize {
        GridSize::from_surface(self.surface_width_px, self.surface_height_px, self.cell_size_px)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface_width_px: 1080,
            surface_height_px: 1920,
            cell_size_px: 60,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            high_score_file: "snake_high_score.yaml".to_string(),
            games_to_play: 1,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size_px < 1 {
            return Err("Cell size must be at least 1 px".to_string());
        }
        if !self.grid().is_playable() {
            return Err("Surface is smaller than a single cell".to_string());
        }
        if self.tick_interval_ms < 50 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        if self.swipe_threshold_px <= 0.0 {
            return Err("Swipe threshold must be positive".to_string());
        }
        if self.games_to_play < 1 {
            return Err("At least one game must be played".to_string());
        }
        Ok(())
    }
}
