// Server module entry
// Binding, the accept loop and shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

pub use listener::create_listener;
pub use signal::ShutdownSignals;

/// A bound no-cache file server
///
/// `bind` takes the socket; `run` or
/// `run_until` drive the accept loop until shutdown.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Resolve the document root and bind the listening socket.
    ///
    /// Must be called from within a Tokio runtime. An occupied port yields
    /// [`ServerError::Bind`].
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        let addr = config.socket_addr()?;
        let state = Arc::new(AppState::new(config)?);
        let listener = create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn run(self) -> Result<(), ServerError> {
        let signals = ShutdownSignals::register().map_err(ServerError::Signal)?;
        self.run_until(async move {
            let name = signals.recv().await;
            logger::log_shutdown(name);
        })
        .await;
        Ok(())
    }

    /// Serve until `shutdown` completes
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        if let Ok(addr) = self.local_addr() {
            logger::log_server_start(&addr);
        }

        // Connection tasks are spawned with spawn_local
        let local = tokio::task::LocalSet::new();
        local
            .run_until(server_loop::serve_until(self.listener, self.state, shutdown))
            .await;
    }
}
