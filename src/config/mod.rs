// Configuration module entry point
// Loads layered configuration and holds the per-server runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable prefix, e.g. `MUSIC_API_SERVER__PORT=9000`
const ENV_PREFIX: &str = "MUSIC_API";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; defaults reproduce the stock local setup
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("catalog.root_dir", ".")?
            .set_default("catalog.data_file", "music_catalog.json")?
            .set_default("catalog.static_folder", "albums")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.request_timeout", 30)
    }

    /// Reject settings the router cannot work with
    fn validate(&self) -> Result<(), config::ConfigError> {
        let folder = &self.catalog.static_folder;
        if folder.is_empty() || folder.contains('/') || folder == "." || folder == ".." {
            return Err(config::ConfigError::Message(format!(
                "catalog.static_folder must be a single path segment, got '{folder}'"
            )));
        }
        if self.performance.request_timeout == 0 {
            return Err(config::ConfigError::Message(
                "performance.request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with the catalog rooted at `root`, listening on an ephemeral port
    pub fn for_root(root: &std::path::Path) -> Self {
        let mut cfg: Self = Self::defaults()
            .and_then(|builder| builder.build())
            .and_then(config::Config::try_deserialize)
            .expect("defaults deserialize");
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.catalog.root_dir = root.to_path_buf();
        cfg.logging.access_log = false;
        cfg
    }
}
