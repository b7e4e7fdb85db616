// Configuration module entry point
// Loads layered configuration (defaults, optional file, environment) and
// holds the runtime state built from it

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::error::ServerError;

pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, ServerConfig, DEFAULT_ACCESS_LOG_FORMAT, DEFAULT_HOST,
    DEFAULT_PORT, DEFAULT_ROOT, DEFAULT_SERVER_NAME,
};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "nocache";

/// Environment variable prefix, e.g. `NOCACHE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "NOCACHE";

impl Config {
    /// Load configuration from the default file name and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; with neither file nor environment overrides the
    /// server listens on `0.0.0.0:8000` and serves the working directory.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("server.keep_alive", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("http.index_files", types::default_index_files())?
            .set_default("http.directory_listing", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Listen address; `host` may be an IPv4 or bare IPv6 literal
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let host = &self.server.host;
        host.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.server.port))
            .map_err(|source| ServerError::InvalidAddress {
                addr: format!("{host}:{}", self.server.port),
                source,
            })
    }
}
