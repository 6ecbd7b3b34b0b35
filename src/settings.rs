use std::time::Duration;

use rumqttc::QoS;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::protocol::error::ConfigError;

/// Fade tuning, optionally loaded from a JSON file. The fade step itself is fixed,
/// see `FADE_STEP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Power commands arriving this long after a brightness publish are dropped.
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { debounce_ms: 2000 }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing or unreadable file falls back to defaults,
    /// a file that does not parse is an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(content) => serde_json::from_str::<Settings>(&content)
                    .map_err(|e| ConfigError::InvalidSettings(format!("{path}: {e}"))),
                Err(e) => {
                    warn!("Failed to read settings file {path} ({e}), using default settings");
                    Ok(Settings::default())
                }
            },
            None => Ok(Settings::default()),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub fn parse_qos(level: u8) -> Result<QoS, ConfigError> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        _ => Err(ConfigError::InvalidQos(level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.debounce(), Duration::from_secs(2));
        assert_eq!(Settings::load(None).unwrap(), settings);
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fade.json");
        std::fs::write(&path, r#"{"debounce_ms": 500}"#).unwrap();
        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings.debounce(), Duration::from_millis(500));

        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Settings::load(path.to_str()).unwrap(), Settings::default());
    }

    #[test]
    fn test_fade_step_is_not_configurable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fade.json");
        std::fs::write(&path, r#"{"step": 5}"#).unwrap();

        assert!(matches!(
            Settings::load(path.to_str()),
            Err(ConfigError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert_eq!(
            Settings::load(path.to_str()).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fade.json");
        std::fs::write(&path, "{ debounce_ms: ").unwrap();
        assert!(matches!(
            Settings::load(path.to_str()),
            Err(ConfigError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_parse_qos() {
        assert_eq!(parse_qos(0), Ok(QoS::AtMostOnce));
        assert_eq!(parse_qos(1), Ok(QoS::AtLeastOnce));
        assert_eq!(parse_qos(2), Ok(QoS::ExactlyOnce));
        assert_eq!(parse_qos(3), Err(ConfigError::InvalidQos(3)));
    }
}
