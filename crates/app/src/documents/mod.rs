//! Documents
//!
//! JSON documents of several kinds kept in one Postgres table.

pub mod errors;
pub mod models;
mod store;

pub use errors::DocumentStoreError;
pub use models::{Document, Filter, Mutation, NewDocument, kinds};
pub use store::*;
