//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sheet: SheetSourceConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Row source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SheetSourceConfig {
    #[serde(default = "default_sheet_base_url")]
    pub base_url: String,

    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,

    #[serde(default = "default_tab")]
    pub tab: String,

    #[serde(default = "default_diagnosis_key")]
    pub diagnosis_key: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_sheet_base_url() -> String {
    "https://opensheet.elk.sh".to_string()
}

fn default_spreadsheet_id() -> String {
    "1zHDxblHaHrcCrmTteVhij-3yfrl7bM9kYk-8dGiJuxE".to_string()
}

fn default_tab() -> String {
    "ตุลาคม 67".to_string()
}

fn default_diagnosis_key() -> String {
    "การวินิจฉัย".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for SheetSourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_sheet_base_url(),
            spreadsheet_id: default_spreadsheet_id(),
            tab: default_tab(),
            diagnosis_key: default_diagnosis_key(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_chart_top")]
    pub chart_top: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_chart_top() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
            chart_top: default_chart_top(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
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
            file: None,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

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
            dirs::config_dir().map(|p| p.join("diagsum").join("config.toml")),
            Some(PathBuf::from("/etc/diagsum/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Sheet source overrides
        if let Ok(base_url) = std::env::var("DIAGSUM_SHEET_BASE_URL") {
            self.sheet.base_url = base_url;
        }
        if let Ok(id) = std::env::var("DIAGSUM_SPREADSHEET_ID") {
            self.sheet.spreadsheet_id = id;
        }
        if let Ok(tab) = std::env::var("DIAGSUM_SHEET_TAB") {
            self.sheet.tab = tab;
        }
        if let Ok(key) = std::env::var("DIAGSUM_DIAGNOSIS_KEY") {
            self.sheet.diagnosis_key = key;
        }

        // API overrides
        if let Ok(host) = std::env::var("DIAGSUM_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("DIAGSUM_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("DIAGSUM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DIAGSUM_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: SheetSourceConfig::default(),
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl From<SheetSourceConfig> for crate::sheet::SheetConfig {
    fn from(config: SheetSourceConfig) -> Self {
        Self {
            base_url: config.base_url,
            spreadsheet_id: config.spreadsheet_id,
            tab: config.tab,
            diagnosis_key: config.diagnosis_key,
            request_timeout_ms: config.request_timeout_ms,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Diagsum Configuration
#
# Environment variables override these settings:
# - DIAGSUM_SHEET_BASE_URL
# - DIAGSUM_SPREADSHEET_ID
# - DIAGSUM_SHEET_TAB
# - DIAGSUM_DIAGNOSIS_KEY
# - DIAGSUM_API_HOST
# - DIAGSUM_API_PORT
# - DIAGSUM_LOG_LEVEL
# - DIAGSUM_LOG_FORMAT

[sheet]
# Spreadsheet-to-JSON service base URL
base_url = "https://opensheet.elk.sh"

# Spreadsheet document ID
spreadsheet_id = "1zHDxblHaHrcCrmTteVhij-3yfrl7bM9kYk-8dGiJuxE"

# Sheet tab name
tab = "ตุลาคม 67"

# Column header used as the diagnosis grouping key
diagnosis_key = "การวินิจฉัย"

# Fetch timeout (ms)
request_timeout_ms = 10000

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8083

# Allowed CORS origins
cors_origins = ["http://localhost:5173", "http://127.0.0.1:5173"]

# Number of categories in the chart payload by default
chart_top = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/diagsum/diagsum.log"
"#
    .to_string()
}
