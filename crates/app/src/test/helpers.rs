//! Test Helpers

use jiff::Timestamp;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    auth::{Identity, Role, UserUuid},
    documents::Document,
};

/// A stored document with a fresh id and current timestamps.
pub(crate) fn document(kind: &str, body: Value) -> Document {
    let now = Timestamp::now();

    Document {
        id: Uuid::now_v7(),
        kind: kind.to_owned(),
        body,
        created_at: now,
        updated_at: now,
    }
}

/// A signed-in shopper or admin.
pub(crate) fn identity(role: Role) -> Identity {
    Identity {
        user_id: UserUuid::new(),
        email: "shopper@example.pk".to_string(),
        name: "Areeba".to_string(),
        role,
    }
}
