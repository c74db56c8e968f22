//! Document models.

use jiff::Timestamp;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Document kinds stored by the application.
pub mod kinds {
    /// Catalog product.
    pub const PRODUCT: &str = "product";

    /// Placed order.
    pub const ORDER: &str = "order";

    /// Product review.
    pub const REVIEW: &str = "review";

    /// Registered user.
    pub const USER: &str = "user";

    /// Bearer session.
    pub const SESSION: &str = "session";

    /// Throwaway document used by permission checks.
    pub const PERMISSION_CHECK: &str = "permission_check";
}

/// A stored JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub kind: String,
    pub body: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    /// Deserialize the body into a typed record.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }

    /// Whether this document has the given kind.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// A document to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub id: Uuid,
    pub kind: String,
    pub body: Value,
}

impl NewDocument {
    /// Serialize `body` into a new document with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn new(kind: &str, body: &impl Serialize) -> Result<Self, serde_json::Error> {
        Self::with_id(Uuid::now_v7(), kind, body)
    }

    /// Serialize `body` into a new document with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be represented as JSON.
    pub fn with_id(id: Uuid, kind: &str, body: &impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id,
            kind: kind.to_owned(),
            body: serde_json::to_value(body)?,
        })
    }
}

/// Selects documents of one kind whose bodies contain the given fields.
///
/// Results are always newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    kind: String,
    fields: Map<String, Value>,
    limit: Option<i64>,
}

impl Filter {
    /// Match every document of `kind`.
    pub fn of_kind(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            fields: Map::new(),
            limit: None,
        }
    }

    /// Also require `field` to equal `value`.
    #[must_use]
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_owned(), value.into());
        self
    }

    /// Return at most `limit` documents.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// JSON object every matching body must contain.
    pub fn containment(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn max_rows(&self) -> Option<i64> {
        self.limit
    }
}

/// One write inside a [`commit`](crate::documents::DocumentStore::commit).
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(NewDocument),
    Patch { id: Uuid, fields: Map<String, Value> },
    Delete(Uuid),
}
