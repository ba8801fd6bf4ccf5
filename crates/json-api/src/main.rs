//! Offerbook JSON API Server

use std::process;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};
use tracing::{error, info, warn};

use offerbook_app::context::AppContext;

use crate::{
    config::{
        ServerConfig,
        db::{DatabaseConfig, StorageBackend},
    },
    state::State,
};

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod offers;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Offerbook JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        process::exit(1);
    }

    let Some(app) = app_context(&config.database).await else {
        process::exit(1);
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let router = router::with_docs(
        Router::new()
            .hoop(CatchPanic::new())
            .hoop(observability::request_logging)
            .hoop(remove_slash())
            .hoop(inject(State::from_app_context(app)))
            .push(router::app_router()),
    );

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    info!("server stopped");
}

async fn app_context(config: &DatabaseConfig) -> Option<AppContext> {
    match (config.storage, config.database_url.as_deref()) {
        (StorageBackend::Memory, _) => match AppContext::in_memory().await {
            Ok((app, issued)) => {
                warn!(
                    token_uuid = %issued.metadata.uuid,
                    "using in-memory storage; offers are lost on restart"
                );
                info!(token = %issued.token, "bootstrap api token issued");

                Some(app)
            }
            Err(init_error) => {
                error!("failed to initialize in-memory app context: {init_error}");

                None
            }
        },
        (StorageBackend::Postgres, Some(url)) => match AppContext::from_database_url(url).await {
            Ok(app) => Some(app),
            Err(init_error) => {
                error!("failed to initialize app context: {init_error}");

                None
            }
        },
        (StorageBackend::Postgres, None) => {
            error!("DATABASE_URL is required when STORAGE=postgres");

            None
        }
    }
}
