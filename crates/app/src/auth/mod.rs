//! Authentication

mod errors;
mod models;
mod service;
pub mod token;

pub use errors::*;
pub use models::{Identity, IssuedSession, Role, UserRecord, UserUuid};
pub use service::*;
