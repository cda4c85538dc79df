//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

/// Remote EVENTR API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Local session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub file_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub placeholder_image: String,
}

impl Settings {
    /// Load settings from `eventr.toml` (if present) and `EVENTR_*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("eventr")
    }

    /// Load settings from an explicit file path layered over the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;
        let path = path.as_ref().to_string_lossy().into_owned();

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(&path).required(false))
            .add_source(config::Environment::with_prefix("EVENTR").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventrError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://eventmanagementserver-3qnz.onrender.com".to_string(),
                timeout_seconds: 30,
                user_agent: format!("eventr-cli/{}", env!("CARGO_PKG_VERSION")),
            },
            session: SessionConfig {
                file_path: default_session_path(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                file_path: None,
                json: false,
            },
            ui: UiConfig {
                placeholder_image: "/placeholder.png".to_string(),
            },
        }
    }
}

fn default_session_path() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}/.eventr/session.json", home),
        _ => ".eventr-session.json".to_string(),
    }
}
