//! Server error types
//!
//! Only startup can fail; per-request problems are turned into HTTP error
//! responses by the handler and never reach this type.

use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("document root '{root}' is not accessible: {source}")]
    Root {
        root: String,
        source: std::io::Error,
    },

    #[error("failed to register signal handlers: {0}")]
    Signal(std::io::Error),

    #[error("failed to open log files: {0}")]
    Logger(std::io::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(std::io::Error),
}
