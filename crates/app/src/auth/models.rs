//! Auth data models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// User Record
#[derive(Debug)]
pub struct UserRecord;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// The signed-in user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserUuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user_id: UserUuid,
    pub expires_at: Timestamp,
}

/// Body of a `user` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserBody {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Body of a `session` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionBody {
    pub token_hash: String,
    pub user_id: UserUuid,
    pub expires_at: Timestamp,
}
