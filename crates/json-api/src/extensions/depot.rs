//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use shopease_app::auth::{AuthorizationError, Identity, Role, authorize};

const IDENTITY_DEPOT_KEY: &str = "identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the signed-in user for the rest of the request.
    fn insert_identity(&mut self, identity: Identity);

    /// The signed-in user, if any.
    fn identity(&self) -> Option<&Identity>;

    fn identity_or_401(&self) -> Result<&Identity, StatusError>;

    fn admin_or_403(&self) -> Result<&Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.insert(IDENTITY_DEPOT_KEY, identity);
    }

    fn identity(&self) -> Option<&Identity> {
        self.get::<Identity>(IDENTITY_DEPOT_KEY).ok()
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        authorize(self.identity(), Role::Customer).map_err(into_status_error)
    }

    fn admin_or_403(&self) -> Result<&Identity, StatusError> {
        authorize(self.identity(), Role::Admin).map_err(into_status_error)
    }
}

fn into_status_error(error: AuthorizationError) -> StatusError {
    match error {
        AuthorizationError::NotSignedIn => {
            StatusError::unauthorized().brief("Sign in to continue")
        }
        AuthorizationError::Forbidden => {
            StatusError::forbidden().brief("You do not have access to this resource")
        }
    }
}
