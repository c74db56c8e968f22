//! Stop the server on Ctrl+C or SIGTERM.

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// Time given to in-flight checkouts and cart writes before connections are
/// dropped.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
#[error("could not install the {signal} handler")]
pub(crate) struct ShutdownSignalError {
    signal: Signal,
    #[source]
    source: io::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Interrupt,
    Terminate,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "Ctrl+C",
            Self::Terminate => "SIGTERM",
        })
    }
}

async fn interrupt() -> Result<Signal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map(|()| Signal::Interrupt)
        .map_err(|source| ShutdownSignalError {
            signal: Signal::Interrupt,
            source,
        })
}

#[cfg(unix)]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(
        |source| ShutdownSignalError {
            signal: Signal::Terminate,
            source,
        },
    )?;

    stream.recv().await;

    Ok(Signal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for the first shutdown signal, then drain and stop the server.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = interrupt() => result?,
        result = terminate() => result?,
    };

    info!(signal = %received, drain_secs = DRAIN_TIMEOUT.as_secs(), "shutting down");

    handle.stop_graceful(DRAIN_TIMEOUT);

    Ok(())
}
