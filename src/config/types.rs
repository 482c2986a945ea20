// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listening address
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the catalog document and the media folder live
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Directory that `data_file` and `static_folder` are resolved against
    pub root_dir: PathBuf,
    /// JSON document holding albums, songs and artists
    pub data_file: String,
    /// Folder served verbatim under `/{static_folder}/...`
    pub static_folder: String,
}

impl CatalogConfig {
    pub fn data_path(&self) -> PathBuf {
        self.root_dir.join(&self.data_file)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root_dir.join(&self.static_folder)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl LoggingConfig {
    pub fn is_debug(&self) -> bool {
        self.level.eq_ignore_ascii_case("debug")
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Upper bound in seconds for serving one connection
    pub request_timeout: u64,
}
