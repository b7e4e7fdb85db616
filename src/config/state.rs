// Application state module
// Configuration plus the request service shared by all connections

use super::types::Config;
use crate::error::ServerError;
use crate::handler::{NoCache, StaticFiles};

/// Application state
pub struct AppState {
    pub config: Config,
    pub service: NoCache<StaticFiles>,
}

impl AppState {
    /// Build the no-cache file service for the configured root
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let files = StaticFiles::new(&config.server.root, &config.http).map_err(|source| {
            ServerError::Root {
                root: config.server.root.display().to_string(),
                source,
            }
        })?;

        Ok(Self {
            service: NoCache::new(files),
            config,
        })
    }
}
