//! ShopEase JSON API Server

use std::process::ExitCode;

use salvo::prelude::*;
use thiserror::Error;
use tracing::{error, info};

use shopease_app::context::{AppContext, AppInitError};

use crate::{
    config::ServerConfig,
    observability::{Observability, ObservabilityError},
    state::State,
};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod carts;
mod config;
mod extensions;
mod healthcheck;
mod money;
mod observability;
mod orders;
mod products;
mod reviews;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] clap::Error),

    #[error("logging could not be initialised: {0}")]
    Observability(#[from] ObservabilityError),
}

/// ShopEase JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    let (config, observability) = match start() {
        Ok(started) => started,
        Err(startup_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "no subscriber is installed when startup fails"
            )]
            {
                eprintln!("{startup_error}");
            }

            return ExitCode::FAILURE;
        }
    };

    let code = match serve(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(init_error) => {
            error!("storefront could not start: {init_error}");
            ExitCode::FAILURE
        }
    };

    observability.shutdown();

    code
}

fn start() -> Result<(ServerConfig, Observability), StartupError> {
    let config = ServerConfig::load()?;
    let observability = Observability::init(&config)?;

    extensions::configure_error_details(config.server.app_env);

    Ok((config, observability))
}

/// The listener owns its address; salvo keeps it for the life of the server.
fn listener(config: &ServerConfig) -> TcpListener<String> {
    TcpListener::new(config.socket_addr())
}

async fn serve(config: &ServerConfig) -> Result<(), AppInitError> {
    let app = AppContext::from_database_url(
        &config.database.database_url,
        config.notifications.relay(),
    )
    .await?;

    info!(
        app_env = config.server.app_env.as_str(),
        addr = %config.socket_addr(),
        "storefront listening"
    );

    let listener = listener(config).bind().await;

    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(signal_error) = shutdown::listen(handle).await {
            error!("shutdown signals unavailable: {signal_error}");
        }
    });

    server
        .serve(router::service_router(State::from_app_context(app)))
        .await;

    info!("server stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn listener_binds_the_configured_address() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "shopease-json",
            "--database-url",
            "postgres://localhost/shopease",
            "--host",
            "127.0.0.1",
            "--port",
            "0",
        ])?;

        let bound = listener(&config).try_bind().await;

        assert!(bound.is_ok(), "expected to bind 127.0.0.1:0");

        Ok(())
    }
}
