//! Shared handler state.

use std::sync::Arc;

use shopease_app::context::AppContext;

/// Injected into every request's depot; handlers reach the storefront
/// services through `state.app`.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
