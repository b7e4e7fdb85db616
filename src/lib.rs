//! Development static file server that disables browser caching.
//!
//! Files are served from a document root (the working directory by default)
//! on port 8000, and every response carries
//!
//! ```text
//! Cache-Control: no-store, no-cache, must-revalidate, max-age=0
//! Pragma: no-cache
//! Expires: 0
//! ```
//!
//! so a reload always shows what is on disk.
//!
//! ```no_run
//! use nocache_server::{config::Config, Server};
//!
//! # async fn demo() -> Result<(), nocache_server::ServerError> {
//! let mut config = Config::default();
//! config.server.port = 0;
//! let server = Server::bind(config)?;
//! server.run().await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::ServerError;
pub use server::Server;
