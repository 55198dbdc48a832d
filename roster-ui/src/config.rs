//! Configuration loading for the Roster client.
//!
//! All fields are required unless explicitly marked optional.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Directory the filesystem template source resolves against.
    pub templates_dir: PathBuf,
    /// Whether the environment provides modal-dialog capability. Without it
    /// the list view's delete dialog is never wired.
    #[serde(default = "default_modal_capability")]
    pub modal_capability: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Collection resource URL, e.g. `https://api.example.com/employees`.
    pub base_url: String,
    /// Tenant identifier sent as the `CustomerID` header on every request.
    pub customer_id: String,
    /// Sent as the `APIKey` header on every request.
    pub api_key: String,
    pub request_timeout_ms: u64,
}

fn default_modal_capability() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or ROSTER_UI_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.customer_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.customer_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.api_key",
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.templates_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "templates_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("ROSTER_UI_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: "http://localhost:8080/employees".to_string(),
                customer_id: "tenant-1".to_string(),
                api_key: "test-key".to_string(),
                request_timeout_ms: 5_000,
            },
            templates_dir: "templates".into(),
            modal_capability: true,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validation_names_the_offending_field() {
        let mut config = base_config();
        config.api.customer_id = "  ".to_string();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "api.customer_id");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = base_config();
        config.api.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_toml_with_defaulted_capability() {
        let config: AppConfig = toml::from_str(
            r#"
templates_dir = "templates"

[api]
base_url = "http://localhost:8080/employees"
customer_id = "tenant-1"
api_key = "k"
request_timeout_ms = 5000
"#,
        )
        .unwrap();
        assert!(config.modal_capability);
    }

    #[test]
    fn rejects_unknown_fields() {
        let parsed: Result<AppConfig, _> = toml::from_str(
            r#"
templates_dir = "templates"
surprise = true

[api]
base_url = "u"
customer_id = "c"
api_key = "k"
request_timeout_ms = 1
"#,
        );
        assert!(parsed.is_err());
    }
}
