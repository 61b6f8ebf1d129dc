//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::notify::DEFAULT_DURATION_MS;
use crate::viewport::{ViewportClassifier, DESKTOP_BREAKPOINT_PX};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub viewport: ViewportConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub print: PrintConfig,

    #[serde(default)]
    pub dates: DateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Viewport breakpoint configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: u32,
}

fn default_breakpoint() -> u32 {
    DESKTOP_BREAKPOINT_PX
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint(),
        }
    }
}

impl ViewportConfig {
    pub fn classifier(&self) -> ViewportClassifier {
        ViewportClassifier::with_breakpoint(self.breakpoint_px)
    }
}

/// Toast notification configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Auto-dismiss delay for notifications that do not set one
    #[serde(default = "default_duration")]
    pub default_duration_ms: u64,

    /// Id given to the lazily created container element
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Classes positioning the container on the page
    #[serde(default = "default_container_class")]
    pub container_class: String,
}

fn default_duration() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_container_id() -> String {
    "panelkit-toasts".to_string()
}

fn default_container_class() -> String {
    "toast-container position-fixed top-0 end-0 p-3".to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration(),
            container_id: default_container_id(),
            container_class: default_container_class(),
        }
    }
}

/// Print window configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrintConfig {
    /// Open the print dialog as soon as the document loads
    #[serde(default = "default_auto_print")]
    pub auto_print: bool,

    /// strftime format of the footer timestamp
    #[serde(default = "default_print_timestamp")]
    pub timestamp_format: String,

    /// Extra CSS appended after the reset
    #[serde(default)]
    pub stylesheet: Option<String>,
}

fn default_auto_print() -> bool {
    true
}

fn default_print_timestamp() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            auto_print: default_auto_print(),
            timestamp_format: default_print_timestamp(),
            stylesheet: None,
        }
    }
}

/// Date display formats
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateConfig {
    #[serde(default = "default_short_format")]
    pub short_format: String,

    #[serde(default = "default_long_format")]
    pub long_format: String,

    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

fn default_short_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_long_format() -> String {
    "%B %-d, %Y".to_string()
}

fn default_datetime_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            short_format: default_short_format(),
            long_format: default_long_format(),
            datetime_format: default_datetime_format(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("panelkit").join("config.toml")),
            Some(PathBuf::from("./panelkit.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("PANELKIT_BREAKPOINT_PX") {
            if let Ok(px) = value.parse() {
                self.viewport.breakpoint_px = px;
            }
        }
        if let Ok(value) = std::env::var("PANELKIT_TOAST_DURATION_MS") {
            if let Ok(ms) = value.parse() {
                self.notifications.default_duration_ms = ms;
            }
        }
        if let Ok(level) = std::env::var("PANELKIT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PANELKIT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.breakpoint_px == 0 {
            return Err(ConfigError::Invalid(
                "viewport.breakpoint_px must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Panelkit Configuration
#
# Environment variables override these settings:
# - PANELKIT_BREAKPOINT_PX
# - PANELKIT_TOAST_DURATION_MS
# - PANELKIT_LOG_LEVEL
# - PANELKIT_LOG_FORMAT

[viewport]
# Widths at or above this are treated as desktop
breakpoint_px = 992

[notifications]
# Auto-dismiss delay in milliseconds (0 keeps toasts until dismissed)
default_duration_ms = 5000

# Container element created on first use
container_id = "panelkit-toasts"
container_class = "toast-container position-fixed top-0 end-0 p-3"

[print]
# Open the print dialog when the print view loads
auto_print = true

# Footer timestamp format (strftime)
timestamp_format = "%Y-%m-%d %H:%M"

# Extra CSS for the print view
# stylesheet = "table { font-size: 10pt; }"

[dates]
short_format = "%d/%m/%Y"
long_format = "%B %-d, %Y"
datetime_format = "%d/%m/%Y %H:%M"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed = Config::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str("[viewport]\nbreakpoint_px = 768\n").unwrap();
        assert_eq!(config.viewport.breakpoint_px, 768);
        assert_eq!(config.notifications.default_duration_ms, 5000);
        assert!(config.print.auto_print);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_toml_str("[viewport]\nbreakpoint_px = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[viewport\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panelkit.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[print]\nauto_print = false").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.print.auto_print);

        let missing = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_classifier_from_config() {
        let config = ViewportConfig { breakpoint_px: 1200 };
        assert!(config.classifier().classify(1100).is_mobile());
    }
}
