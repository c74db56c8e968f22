//! Auth middleware.
//!
//! Resolves a bearer token to an [`Identity`](shopease_app::auth::Identity)
//! when one is presented. Requests without a usable token continue
//! anonymously; handlers decide whether a signed-in user is required.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req).map(str::to_owned) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    match state.app.sessions.current_session(&token).await {
        Ok(Some(identity)) => {
            depot.insert_identity(identity);
        }
        Ok(None) => {
            debug!("bearer token did not resolve to a session");
        }
        Err(source) => {
            res.render(internal_error("failed to resolve session", &source));

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
