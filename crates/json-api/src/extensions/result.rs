//! Result helper extensions for HTTP handlers.

use std::{
    error::Error,
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use salvo::prelude::StatusError;
use tracing::error;

use crate::config::AppEnv;

static EXPOSE_ERROR_DETAILS: AtomicBool = AtomicBool::new(false);

/// 500 responses carry the underlying error message outside production.
pub(crate) fn configure_error_details(app_env: AppEnv) {
    EXPOSE_ERROR_DETAILS.store(!app_env.is_production(), Ordering::Relaxed);
}

/// Map any error to a logged internal server error.
pub(crate) trait ResultExt<T> {
    fn or_500(self, context: &str) -> Result<T, StatusError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, StatusError> {
        self.map_err(|error| internal_message(context, &error.to_string()))
    }
}

/// Log `error` with its sources and build a 500.
pub(crate) fn internal_error(context: &str, error: &dyn Error) -> StatusError {
    internal_message(context, &describe(error))
}

fn internal_message(context: &str, message: &str) -> StatusError {
    error!("{context}: {message}");

    let status = StatusError::internal_server_error();

    if EXPOSE_ERROR_DETAILS.load(Ordering::Relaxed) {
        status.detail(format!("{context}: {message}"))
    } else {
        status
    }
}

fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

#[cfg(test)]
mod tests {
    use std::io;

    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("storage error")]
    struct Wrapped(#[source] io::Error);

    #[test]
    fn describe_includes_every_source() {
        let error = Wrapped(io::Error::other("connection reset"));

        assert_eq!(describe(&error), "storage error: connection reset");
    }

    #[test]
    fn or_500_yields_internal_server_error() {
        let result: Result<(), &str> = Err("boom");

        let status = result.or_500("failed").err();

        assert_eq!(
            status.map(|status| status.code),
            Some(salvo::http::StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
