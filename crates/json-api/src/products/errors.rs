//! Product Errors

use salvo::http::StatusError;

use shopease_app::domain::catalog::CatalogServiceError;

use crate::extensions::internal_error;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        other @ (CatalogServiceError::InvalidData(_) | CatalogServiceError::Store(_)) => {
            internal_error("failed to load product", &other)
        }
    }
}
