//! Carts service.
//!
//! Every operation restores the shopper's cart from its snapshot, applies one
//! change and lets the aggregate persist it. Operations on the same cart key
//! are serialized by a per-key FIFO lock; different carts never contend.
//! Checkout holds the same lock from reading the cart until it is cleared.
//!
//! A snapshot that cannot be read is treated as an empty cart and removed,
//! so a failing cart store loses that shopper's cart rather than blocking
//! them. Callers see the empty cart on their next read.

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use shopease::cart::{CartStore, CartSummary, Outcome, ShoppingCart};
use sqlx::PgPool;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, warn};

use crate::{
    auth::{Identity, UserUuid},
    domain::{
        carts::{
            errors::{CartsServiceError, CheckoutError},
            store::PgCartStore,
        },
        catalog::CatalogService,
        orders::{CustomerDetails, OrderRecord, OrdersService},
    },
};

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    pub outcome: Outcome,
    pub summary: CartSummary,
}

/// Storage key of a user's cart.
pub fn cart_key(user: UserUuid) -> String {
    format!("cart:{user}")
}

type CartLocks = FxHashMap<String, Arc<AsyncMutex<()>>>;

#[derive(Clone)]
pub struct PgCartsService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn CatalogService>,
    orders: Arc<dyn OrdersService>,
    locks: Arc<Mutex<CartLocks>>,
}

impl fmt::Debug for PgCartsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgCartsService").finish_non_exhaustive()
    }
}

impl PgCartsService {
    #[must_use]
    pub fn new(
        pool: PgPool,
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self::with_store(Arc::new(PgCartStore::new(pool)), catalog, orders)
    }

    #[must_use]
    pub fn with_store(
        store: Arc<dyn CartStore>,
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            store,
            catalog,
            orders,
            locks: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    fn lock_for(&self, key: &str) -> Result<Arc<AsyncMutex<()>>, CartsServiceError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_poisoned| CartsServiceError::LockPoisoned)?;

        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        Ok(Arc::clone(locks.entry(key.to_owned()).or_default()))
    }

    async fn open(&self, key: String) -> ShoppingCart<Arc<dyn CartStore>> {
        ShoppingCart::restored(key, Arc::clone(&self.store)).await
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError> {
        let key = cart_key(user);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let cart = self.open(key).await;

        Ok(cart.summary())
    }

    #[tracing::instrument(name = "carts.add_item", skip(self), err)]
    async fn add_item(
        &self,
        user: UserUuid,
        product: &str,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError> {
        let snapshot = self.catalog.get_product(product).await?;

        let key = cart_key(user);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let mut cart = self.open(key).await;
        let outcome = cart.add_item(snapshot, quantity).await?;

        Ok(CartUpdate {
            outcome,
            summary: cart.summary(),
        })
    }

    #[tracing::instrument(name = "carts.update_quantity", skip(self), err)]
    async fn update_quantity(
        &self,
        user: UserUuid,
        product: &str,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError> {
        let key = cart_key(user);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let mut cart = self.open(key).await;
        let outcome = cart.update_quantity(product, quantity).await?;

        Ok(CartUpdate {
            outcome,
            summary: cart.summary(),
        })
    }

    #[tracing::instrument(name = "carts.remove_item", skip(self), err)]
    async fn remove_item(
        &self,
        user: UserUuid,
        product: &str,
    ) -> Result<CartUpdate, CartsServiceError> {
        let key = cart_key(user);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let mut cart = self.open(key).await;
        let outcome = cart.remove_item(product).await?;

        Ok(CartUpdate {
            outcome,
            summary: cart.summary(),
        })
    }

    #[tracing::instrument(name = "carts.clear", skip(self), err)]
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let key = cart_key(user);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let mut cart = ShoppingCart::new(key, Arc::clone(&self.store));
        cart.clear().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.checkout",
        skip(self, shopper, customer),
        fields(user = %shopper.user_id),
        err
    )]
    async fn checkout(
        &self,
        shopper: &Identity,
        customer: CustomerDetails,
    ) -> Result<OrderRecord, CheckoutError> {
        let key = cart_key(shopper.user_id);
        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let mut cart = self.open(key).await;
        let order = self
            .orders
            .place_order(shopper, customer, &cart.summary())
            .await?;

        match cart.clear().await {
            Ok(()) => info!(order = %order.uuid, "cart checked out"),
            Err(source) => {
                warn!(order = %order.uuid, "order placed but cart was not cleared: {source}");
            }
        }

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Current cart of a user.
    async fn get_cart(&self, user: UserUuid) -> Result<CartSummary, CartsServiceError>;

    /// Add a fresh catalog snapshot of `product` to the user's cart.
    async fn add_item(
        &self,
        user: UserUuid,
        product: &str,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Set the quantity of a line in the user's cart.
    async fn update_quantity(
        &self,
        user: UserUuid,
        product: &str,
        quantity: i64,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: &str,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Empty the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;

    /// Place an order for the shopper's cart and empty it, with no other
    /// change to that cart in between.
    async fn checkout(
        &self,
        shopper: &Identity,
        customer: CustomerDetails,
    ) -> Result<OrderRecord, CheckoutError>;
}
