use std::process::ExitCode;

use nocache_server::config::Config;
use nocache_server::{logger, Server, ServerError};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging).map_err(ServerError::Logger)?;

    // Connections run on a LocalSet, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    runtime.block_on(async move {
        let server = Server::bind(cfg)?;
        server.run().await
    })
}
