//! Document store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::documents::{
    errors::DocumentStoreError,
    models::{Document, Filter, Mutation, NewDocument},
};

const FETCH_DOCUMENTS_SQL: &str = include_str!("sql/fetch_documents.sql");
const GET_DOCUMENT_SQL: &str = include_str!("sql/get_document.sql");
const CREATE_DOCUMENT_SQL: &str = include_str!("sql/create_document.sql");
const PATCH_DOCUMENT_SQL: &str = include_str!("sql/patch_document.sql");
const APPEND_DOCUMENT_SQL: &str = include_str!("sql/append_document.sql");
const DELETE_DOCUMENT_SQL: &str = include_str!("sql/delete_document.sql");

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn fetch(&self, filter: Filter) -> Result<Vec<Document>, DocumentStoreError> {
        let documents = query_as::<Postgres, Document>(FETCH_DOCUMENTS_SQL)
            .bind(filter.kind())
            .bind(Json(filter.containment()))
            .bind(filter.max_rows())
            .fetch_all(&self.pool)
            .await?;

        Ok(documents)
    }

    async fn get(&self, id: Uuid) -> Result<Document, DocumentStoreError> {
        let document = query_as::<Postgres, Document>(GET_DOCUMENT_SQL)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(document)
    }

    async fn create(&self, document: NewDocument) -> Result<Document, DocumentStoreError> {
        let created = query_as::<Postgres, Document>(CREATE_DOCUMENT_SQL)
            .bind(document.id)
            .bind(&document.kind)
            .bind(Json(&document.body))
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn patch(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError> {
        let patched = query_as::<Postgres, Document>(PATCH_DOCUMENT_SQL)
            .bind(id)
            .bind(Json(Value::Object(fields)))
            .fetch_one(&self.pool)
            .await?;

        Ok(patched)
    }

    async fn append(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
        array_field: &str,
        element: Value,
    ) -> Result<Document, DocumentStoreError> {
        let appended = query_as::<Postgres, Document>(APPEND_DOCUMENT_SQL)
            .bind(id)
            .bind(Json(Value::Object(fields)))
            .bind(array_field)
            .bind(Json(element))
            .fetch_one(&self.pool)
            .await?;

        Ok(appended)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DocumentStoreError> {
        let rows_affected = query(DELETE_DOCUMENT_SQL)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DocumentStoreError::NotFound);
        }

        Ok(())
    }

    async fn commit(&self, mutations: Vec<Mutation>) -> Result<u64, DocumentStoreError> {
        let mut tx = self.pool.begin().await?;
        let mut applied = 0;

        for mutation in mutations {
            let rows_affected = match mutation {
                Mutation::Create(document) => query(CREATE_DOCUMENT_SQL)
                    .bind(document.id)
                    .bind(document.kind)
                    .bind(Json(document.body))
                    .execute(&mut *tx)
                    .await?
                    .rows_affected(),
                Mutation::Patch { id, fields } => query(PATCH_DOCUMENT_SQL)
                    .bind(id)
                    .bind(Json(Value::Object(fields)))
                    .execute(&mut *tx)
                    .await?
                    .rows_affected(),
                Mutation::Delete(id) => query(DELETE_DOCUMENT_SQL)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected(),
            };

            if rows_affected == 0 {
                return Err(DocumentStoreError::NotFound);
            }

            applied += rows_affected;
        }

        tx.commit().await?;

        Ok(applied)
    }
}

impl<'r> FromRow<'r, PgRow> for Document {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            kind: row.try_get("kind")?,
            body: row.try_get::<Json<Value>, _>("body")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, newest first.
    async fn fetch(&self, filter: Filter) -> Result<Vec<Document>, DocumentStoreError>;

    /// A single document by id.
    async fn get(&self, id: Uuid) -> Result<Document, DocumentStoreError>;

    /// Insert a new document.
    async fn create(&self, document: NewDocument) -> Result<Document, DocumentStoreError>;

    /// Merge `fields` into a document's body in one write.
    async fn patch(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Document, DocumentStoreError>;

    /// Merge `fields` and push `element` onto the array at `array_field`
    /// in one statement, so concurrent appends never overwrite each other.
    async fn append(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
        array_field: &str,
        element: Value,
    ) -> Result<Document, DocumentStoreError>;

    /// Delete a document by id.
    async fn delete(&self, id: Uuid) -> Result<(), DocumentStoreError>;

    /// Apply every mutation in one transaction. Returns the rows affected.
    async fn commit(&self, mutations: Vec<Mutation>) -> Result<u64, DocumentStoreError>;
}
