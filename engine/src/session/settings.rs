use std::time::Duration;

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tick_interval: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        // A 1080x1920 surface divided into 60 px cells.
        Self {
            grid_width: 18,
            grid_height: 32,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl SessionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 1 || self.grid_width > 100 {
            return Err("Grid width must be between 1 and 100".to_string());
        }
        if self.grid_height < 1 || self.grid_height > 100 {
            return Err("Grid height must be between 1 and 100".to_string());
        }
        let millis = self.tick_interval.as_millis();
        if millis < 50 || millis > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }
}
