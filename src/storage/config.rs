use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::DEFAULT_EVENT_COLOR;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub ui: UiConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub default_view: String,
    pub slot_interval_minutes: u32,
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventsConfig {
    pub default_color: String,
    pub categories: Vec<String>,
    pub storage_key: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calgrid")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .expect("Failed to serialize config");
        std::fs::write(&config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig {
                default_view: "month".to_string(),
                slot_interval_minutes: 30,
                date_format: "%Y-%m-%d".to_string(),
            },
            events: EventsConfig {
                default_color: DEFAULT_EVENT_COLOR.to_string(),
                categories: vec![
                    "Meeting".to_string(),
                    "Design".to_string(),
                    "Personal".to_string(),
                    "Travel".to_string(),
                ],
                storage_key: "calgrid.events".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_opens_in_month_view() {
        let config = Config::default();
        assert_eq!(config.ui.default_view, "month");
    }

    #[test]
    fn default_config_uses_half_hour_slots() {
        let config = Config::default();
        assert_eq!(config.ui.slot_interval_minutes, 30);
    }

    #[test]
    fn default_config_carries_the_fixed_event_color() {
        let config = Config::default();
        assert_eq!(config.events.default_color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r##"
            [ui]
            default_view = "week"
            slot_interval_minutes = 60
            date_format = "%d/%m/%Y"

            [events]
            default_color = "#3B82F6"
            categories = ["Work", "Home"]
            storage_key = "my-events"
        "##;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.ui.default_view, "week");
        assert_eq!(config.ui.slot_interval_minutes, 60);
        assert_eq!(config.events.categories, vec!["Work", "Home"]);
        assert_eq!(config.events.storage_key, "my-events");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }
}
