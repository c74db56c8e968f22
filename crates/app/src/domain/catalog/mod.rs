//! Catalog

pub mod errors;
pub mod records;
mod service;

pub use errors::CatalogServiceError;
pub use service::*;
