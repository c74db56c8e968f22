//! App Context

use std::{fmt, sync::Arc};

use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

use crate::{
    auth::{DocumentSessionProvider, SessionProvider},
    database,
    documents::{DocumentStore, PgDocumentStore},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, DocumentCatalogService},
        orders::{DocumentOrdersService, OrdersService},
        reviews::{DocumentReviewsService, ReviewsService},
    },
    notifications::{RelayConfig, notifier},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from a database URL, applying migrations.
    ///
    /// Status notifications go to `relay` when given, otherwise to the log.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        relay: Option<RelayConfig>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_pool(pool, relay))
    }

    /// Wire every service onto an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool, relay: Option<RelayConfig>) -> Self {
        let documents: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool.clone()));
        let catalog: Arc<dyn CatalogService> =
            Arc::new(DocumentCatalogService::new(Arc::clone(&documents)));
        let orders: Arc<dyn OrdersService> = Arc::new(DocumentOrdersService::new(
            Arc::clone(&documents),
            notifier(relay),
        ));

        Self {
            carts: Arc::new(PgCartsService::new(
                pool,
                Arc::clone(&catalog),
                Arc::clone(&orders),
            )),
            orders,
            reviews: Arc::new(DocumentReviewsService::new(
                Arc::clone(&documents),
                Arc::clone(&catalog),
            )),
            sessions: Arc::new(DocumentSessionProvider::new(documents)),
            catalog,
        }
    }
}
