//! Catalog service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use shopease::products::ProductSnapshot;
use tracing::warn;
use uuid::Uuid;

use crate::{
    documents::{DocumentStore, Filter, kinds},
    domain::catalog::{errors::CatalogServiceError, records::snapshot_from_document},
};

#[derive(Clone)]
pub struct DocumentCatalogService {
    documents: Arc<dyn DocumentStore>,
}

impl fmt::Debug for DocumentCatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCatalogService").finish_non_exhaustive()
    }
}

impl DocumentCatalogService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }
}

#[async_trait]
impl CatalogService for DocumentCatalogService {
    async fn list_products(&self) -> Result<Vec<ProductSnapshot>, CatalogServiceError> {
        let documents = self
            .documents
            .fetch(Filter::of_kind(kinds::PRODUCT))
            .await?;

        let products = documents
            .iter()
            .filter_map(|document| match snapshot_from_document(document) {
                Ok(product) => Some(product),
                Err(error) => {
                    warn!(product = %document.id, "skipping invalid product: {error}");
                    None
                }
            })
            .collect();

        Ok(products)
    }

    async fn get_product(&self, product: &str) -> Result<ProductSnapshot, CatalogServiceError> {
        let id = Uuid::try_parse(product).map_err(|_invalid| CatalogServiceError::NotFound)?;

        let document = self.documents.get(id).await?;

        if !document.is_kind(kinds::PRODUCT) {
            return Err(CatalogServiceError::NotFound);
        }

        snapshot_from_document(&document).map_err(|error| {
            warn!(product = %document.id, "invalid product: {error}");
            CatalogServiceError::InvalidData(document.id.to_string())
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// All products, newest first. Invalid product documents are skipped.
    async fn list_products(&self) -> Result<Vec<ProductSnapshot>, CatalogServiceError>;

    /// A fresh snapshot of one product.
    async fn get_product(&self, product: &str) -> Result<ProductSnapshot, CatalogServiceError>;
}
