//! Runtime configuration, read once at process start.

use std::path::PathBuf;

/// Port the server listens on when `PORT` is not set
pub const DEFAULT_PORT: u16 = 5000;

/// Model artifact path when `VITALSIGHT_MODEL_PATH` is not set
pub const DEFAULT_MODEL_PATH: &str = "glucose_range_model.json";

/// Audit log directory when `VITALSIGHT_LOG_DIR` is not set
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind
    pub port: u16,
    /// Path of the pre-trained regression model artifact
    pub model_path: PathBuf,
    /// Directory the daily vitals logs are written into
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let model_path = std::env::var("VITALSIGHT_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));

        let log_dir = std::env::var("VITALSIGHT_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));

        Self {
            port,
            model_path,
            log_dir,
        }
    }
}
