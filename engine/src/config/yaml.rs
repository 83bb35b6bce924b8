use serde::{Deserialize, Serialize};

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, String> {
    serde_yaml_ng::to_string(value).map_err(|err| format!("Failed to serialize: {}", err))
}

pub fn from_yaml<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T, String> {
    serde_yaml_ng::from_str(content).map_err(|err| format!("Failed to deserialize: {}", err))
}
