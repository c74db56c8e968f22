//! Postgres cart snapshot store.

use async_trait::async_trait;
use shopease::cart::{CartStore, CartStoreError};
use sqlx::{PgPool, Postgres, query, query_scalar};

const LOAD_SNAPSHOT_SQL: &str = include_str!("sql/load_snapshot.sql");
const SAVE_SNAPSHOT_SQL: &str = include_str!("sql/save_snapshot.sql");
const DELETE_SNAPSHOT_SQL: &str = include_str!("sql/delete_snapshot.sql");

/// [`CartStore`] backed by the `cart_snapshots` table.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn load(&self, key: &str) -> Result<Option<String>, CartStoreError> {
        query_scalar::<Postgres, String>(LOAD_SNAPSHOT_SQL)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(CartStoreError::backend)
    }

    async fn save(&self, key: &str, snapshot: &str) -> Result<(), CartStoreError> {
        query(SAVE_SNAPSHOT_SQL)
            .bind(key)
            .bind(snapshot)
            .execute(&self.pool)
            .await
            .map_err(CartStoreError::backend)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CartStoreError> {
        query(DELETE_SNAPSHOT_SQL)
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(CartStoreError::backend)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopease::{
        cart::{MemoryCartStore, ShoppingCart},
        products::ProductSnapshot,
    };
    use testresult::TestResult;

    use crate::test::db::TestDb;

    use super::*;

    #[tokio::test]
    async fn save_overwrites_and_delete_removes() -> TestResult {
        let store = PgCartStore::new(TestDb::new().await?.pool);

        assert_eq!(store.load("cart:a").await?, None);

        store.save("cart:a", "[]").await?;
        store.save("cart:a", r#"[{"quantity":1}]"#).await?;
        store.save("cart:b", "[]").await?;

        assert_eq!(
            store.load("cart:a").await?.as_deref(),
            Some(r#"[{"quantity":1}]"#)
        );

        store.delete("cart:a").await?;
        store.delete("cart:a").await?;

        assert_eq!(store.load("cart:a").await?, None);
        assert_eq!(store.load("cart:b").await?.as_deref(), Some("[]"));

        Ok(())
    }

    #[tokio::test]
    async fn carts_restore_from_postgres_like_from_memory() -> TestResult {
        let store = PgCartStore::new(TestDb::new().await?.pool);
        let product = ProductSnapshot::new("suit", "Lawn Suit", Decimal::from(1_200));

        let mut saved = ShoppingCart::new("cart:pg", store.clone());
        let _outcome = saved.add_item(product.clone(), 2).await?;

        let mut reference = ShoppingCart::new("cart:pg", MemoryCartStore::new());
        let _outcome = reference.add_item(product, 2).await?;

        let restored = ShoppingCart::restored("cart:pg", store).await;

        assert_eq!(restored.summary(), reference.summary());

        Ok(())
    }
}
