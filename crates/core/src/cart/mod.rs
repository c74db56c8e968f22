//! Shopping Cart
//!
//! A [`ShoppingCart`] owns an ordered list of [`LineItem`]s keyed by product id
//! and the totals derived from them. Every mutation takes `&mut self`, so a
//! single cart applies its changes and writes its snapshots strictly in call
//! order. Totals are recomputed on a candidate line list before it is
//! committed, so the cart never holds lines whose totals are stale.

use serde::Serialize;
use tracing::{debug, warn};

use crate::pricing::{CartTotals, PricingPolicy, TotalsAmounts, calculate_totals};
use crate::products::ProductSnapshot;

mod errors;
mod line_item;
pub mod snapshot;
mod store;

pub use errors::CartError;
pub use line_item::LineItem;
#[cfg(test)]
pub use store::MockCartStore;
pub use store::{CartStore, CartStoreError, MemoryCartStore};

/// Whether a mutation found the line it addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The cart changed and the new snapshot was written.
    Applied,

    /// No line had the requested product id; nothing was written.
    NotFound,
}

/// Serializable view of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Lines in insertion order.
    pub lines: Vec<LineItem>,

    /// Derived totals.
    pub totals: TotalsAmounts,

    /// Sum of line quantities.
    pub item_count: u64,
}

/// A shopper's cart bound to one storage slot.
#[derive(Debug)]
pub struct ShoppingCart<S> {
    key: String,
    store: S,
    policy: PricingPolicy,
    lines: Vec<LineItem>,
    totals: CartTotals,
}

impl<S: CartStore> ShoppingCart<S> {
    /// Create an empty cart for `key` without touching the store.
    pub fn new(key: impl Into<String>, store: S) -> Self {
        Self::with_policy(key, store, PricingPolicy::default())
    }

    /// Create an empty cart priced with a custom policy.
    pub fn with_policy(key: impl Into<String>, store: S, policy: PricingPolicy) -> Self {
        Self {
            key: key.into(),
            store,
            lines: Vec::new(),
            totals: CartTotals::zero(policy.currency),
            policy,
        }
    }

    /// Create a cart for `key` and restore it from the store.
    pub async fn restored(key: impl Into<String>, store: S) -> Self {
        let mut cart = Self::new(key, store);

        cart.restore().await;

        cart
    }

    /// Replace the in-memory state with the persisted snapshot.
    ///
    /// Never fails. A missing snapshot yields an empty cart. An unreadable or
    /// corrupt snapshot is deleted and the cart starts empty. Individually bad
    /// entries are dropped, duplicates merged, and the cleaned snapshot is
    /// written back.
    pub async fn restore(&mut self) {
        self.reset();

        let raw = match self.store.load(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(source) => {
                warn!(cart = %self.key, error = %source, "cart snapshot could not be loaded");
                self.discard_snapshot().await;
                return;
            }
        };

        let restored = match snapshot::decode(&raw) {
            Ok(restored) => restored,
            Err(source) => {
                warn!(cart = %self.key, error = %source, "discarding corrupt cart snapshot");
                self.discard_snapshot().await;
                return;
            }
        };

        let repaired = restored.was_repaired();

        if let Err(source) = self.commit(restored.lines) {
            warn!(cart = %self.key, error = %source, "discarding unpriceable cart snapshot");
            self.discard_snapshot().await;
            return;
        }

        debug!(cart = %self.key, lines = self.lines.len(), repaired, "restored cart");

        if repaired && let Err(source) = self.save().await {
            warn!(cart = %self.key, error = %source, "repaired cart snapshot could not be saved");
        }
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// An existing line keeps its original snapshot; only its quantity grows.
    ///
    /// # Errors
    ///
    /// Returns invalid-input errors without changing the cart, or
    /// [`CartError::Persistence`] after the change has been applied in memory.
    pub async fn add_item(
        &mut self,
        product: ProductSnapshot,
        quantity: i64,
    ) -> Result<Outcome, CartError> {
        product.validate()?;

        let quantity = positive_quantity(quantity)?;
        let mut lines = self.lines.clone();

        match lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    CartError::InvalidQuantity(i64::from(line.quantity) + i64::from(quantity))
                })?;
            }
            None => lines.push(LineItem { product, quantity }),
        }

        self.commit(lines)?;
        self.persist().await?;

        Ok(Outcome::Applied)
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MissingProductId`] for an empty id, or
    /// [`CartError::Persistence`] after the line has been removed in memory.
    pub async fn remove_item(&mut self, product_id: &str) -> Result<Outcome, CartError> {
        if product_id.is_empty() {
            return Err(CartError::MissingProductId);
        }

        let Some(position) = self.position(product_id) else {
            return Ok(Outcome::NotFound);
        };

        let mut lines = self.lines.clone();
        lines.remove(position);

        self.commit(lines)?;
        self.persist().await?;

        Ok(Outcome::Applied)
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns invalid-input errors without changing the cart, or
    /// [`CartError::Persistence`] after the change has been applied in memory.
    pub async fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<Outcome, CartError> {
        if product_id.is_empty() {
            return Err(CartError::MissingProductId);
        }

        let quantity = positive_quantity(quantity)?;

        let Some(position) = self.position(product_id) else {
            return Ok(Outcome::NotFound);
        };

        let mut lines = self.lines.clone();

        if let Some(line) = lines.get_mut(position) {
            line.quantity = quantity;
        }

        self.commit(lines)?;
        self.persist().await?;

        Ok(Outcome::Applied)
    }

    /// Empty the cart and delete its snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the snapshot could not be deleted.
    /// The in-memory cart is empty either way.
    pub async fn clear(&mut self) -> Result<(), CartError> {
        self.reset();

        self.store
            .delete(&self.key)
            .await
            .map_err(CartError::Persistence)
    }

    /// Write the current lines to the store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if encoding or the store fails.
    pub async fn save(&self) -> Result<(), CartError> {
        let encoded = snapshot::encode(&self.lines)
            .map_err(|source| CartError::Persistence(CartStoreError::Encode(source)))?;

        self.store
            .save(&self.key, &encoded)
            .await
            .map_err(CartError::Persistence)
    }

    /// Storage slot key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Current totals.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serializable copy of the cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.lines.clone(),
            totals: self.totals.amounts(),
            item_count: self.item_count(),
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    fn commit(&mut self, lines: Vec<LineItem>) -> Result<(), CartError> {
        let totals = calculate_totals(&lines, &self.policy)?;

        self.lines = lines;
        self.totals = totals;

        Ok(())
    }

    fn reset(&mut self) {
        self.lines.clear();
        self.totals = CartTotals::zero(self.policy.currency);
    }

    async fn persist(&self) -> Result<(), CartError> {
        if self.lines.is_empty() {
            return self
                .store
                .delete(&self.key)
                .await
                .map_err(CartError::Persistence);
        }

        self.save().await
    }

    async fn discard_snapshot(&self) {
        if let Err(source) = self.store.delete(&self.key).await {
            warn!(cart = %self.key, error = %source, "cart snapshot could not be deleted");
        }
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartError> {
    u32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or(CartError::InvalidQuantity(quantity))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    const KEY: &str = "cart:guest-1";

    fn suit() -> ProductSnapshot {
        ProductSnapshot::new("suit", "Lawn Suit", Decimal::from(1_200)).with_discount(Decimal::TEN)
    }

    fn scarf() -> ProductSnapshot {
        ProductSnapshot::new("scarf", "Silk Scarf", Decimal::from(500))
    }

    fn memory_cart() -> (Arc<MemoryCartStore>, ShoppingCart<Arc<MemoryCartStore>>) {
        let store = Arc::new(MemoryCartStore::new());
        let cart = ShoppingCart::new(KEY, Arc::clone(&store));

        (store, cart)
    }

    fn quantities<S: CartStore>(cart: &ShoppingCart<S>) -> Vec<(&str, u32)> {
        cart.lines()
            .iter()
            .map(|line| (line.product_id(), line.quantity))
            .collect()
    }

    #[tokio::test]
    async fn adding_prices_and_persists() -> TestResult {
        let (store, mut cart) = memory_cart();

        let outcome = cart.add_item(suit(), 2).await?;

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(cart.totals().amounts().total, Decimal::new(237_600, 2));
        assert_eq!(cart.item_count(), 2);
        assert!(store.snapshot(KEY).is_some());

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_merges_quantities() -> TestResult {
        let (_store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 1).await?;
        let _outcome = cart.add_item(scarf(), 1).await?;
        let _outcome = cart.add_item(suit(), 2).await?;

        assert_eq!(quantities(&cart), vec![("suit", 3), ("scarf", 1)]);
        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn merging_keeps_original_snapshot() -> TestResult {
        let (_store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 1).await?;

        let repriced = ProductSnapshot::new("suit", "Lawn Suit", Decimal::from(9_999));
        let _outcome = cart.add_item(repriced, 1).await?;

        assert_eq!(
            cart.lines().first().map(|line| line.product.price),
            Some(Decimal::from(1_200))
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_quantities_are_rejected_without_changes() -> TestResult {
        let (store, mut cart) = memory_cart();

        for quantity in [0, -1, i64::from(u32::MAX) + 1] {
            let result = cart.add_item(suit(), quantity).await;

            assert!(matches!(result, Err(CartError::InvalidQuantity(q)) if q == quantity));
        }

        assert!(cart.is_empty());
        assert!(store.snapshot(KEY).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_product_is_rejected() {
        let (_store, mut cart) = memory_cart();

        let result = cart
            .add_item(ProductSnapshot::new("", "Nameless", Decimal::ONE), 1)
            .await;

        assert!(matches!(result, Err(CartError::InvalidProduct(_))));
        assert!(result.is_err_and(|error| error.is_invalid_input()));
    }

    #[tokio::test]
    async fn update_quantity_sets_exact_value() -> TestResult {
        let (_store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 1).await?;
        let outcome = cart.update_quantity("suit", 5).await?;

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(quantities(&cart), vec![("suit", 5)]);

        Ok(())
    }

    #[tokio::test]
    async fn update_quantity_zero_is_invalid_and_keeps_line() -> TestResult {
        let (_store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 2).await?;
        let result = cart.update_quantity("suit", 0).await;

        assert!(matches!(result, Err(CartError::InvalidQuantity(0))));
        assert_eq!(quantities(&cart), vec![("suit", 2)]);

        Ok(())
    }

    #[tokio::test]
    async fn missing_lines_report_not_found_without_writing() -> TestResult {
        let mut store = MockCartStore::new();
        store.expect_save().never();
        store.expect_delete().never();

        let mut cart = ShoppingCart::new(KEY, store);

        assert_eq!(cart.remove_item("ghost").await?, Outcome::NotFound);
        assert_eq!(cart.update_quantity("ghost", 3).await?, Outcome::NotFound);

        Ok(())
    }

    #[tokio::test]
    async fn empty_product_id_is_invalid() {
        let (_store, mut cart) = memory_cart();

        assert!(matches!(
            cart.remove_item("").await,
            Err(CartError::MissingProductId)
        ));
        assert!(matches!(
            cart.update_quantity("", 1).await,
            Err(CartError::MissingProductId)
        ));
    }

    #[tokio::test]
    async fn removing_last_line_deletes_snapshot() -> TestResult {
        let (store, mut cart) = memory_cart();

        let _outcome = cart.add_item(scarf(), 1).await?;
        let outcome = cart.remove_item("scarf").await?;

        assert_eq!(outcome, Outcome::Applied);
        assert!(cart.is_empty());
        assert_eq!(cart.totals(), &CartTotals::zero(rusty_money::iso::PKR));
        assert!(store.snapshot(KEY).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn clear_empties_and_deletes() -> TestResult {
        let (store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 1).await?;
        cart.clear().await?;

        assert!(cart.is_empty());
        assert!(store.snapshot(KEY).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn clearing_twice_yields_the_same_empty_cart() -> TestResult {
        let (store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 2).await?;

        cart.clear().await?;
        let first = cart.summary();

        cart.clear().await?;
        let second = cart.summary();

        assert_eq!(first, second);
        assert_eq!(second.item_count, 0);
        assert!(second.lines.is_empty());
        assert_eq!(cart.totals(), &CartTotals::zero(rusty_money::iso::PKR));
        assert!(store.snapshot(KEY).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn removing_unknown_product_leaves_other_lines_alone() -> TestResult {
        let (store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 2).await?;
        let _outcome = cart.add_item(scarf(), 1).await?;

        let before = cart.summary();
        let saved = store.snapshot(KEY);

        let outcome = cart.remove_item("dupatta").await?;

        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(cart.summary(), before);
        assert_eq!(quantities(&cart), vec![("suit", 2), ("scarf", 1)]);
        assert_eq!(store.snapshot(KEY), saved);

        Ok(())
    }

    #[tokio::test]
    async fn persistence_failure_keeps_in_memory_change() {
        let mut store = MockCartStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_, _| Err(CartStoreError::Unavailable));

        let mut cart = ShoppingCart::new(KEY, store);

        let result = cart.add_item(scarf(), 1).await;

        assert!(matches!(result, Err(CartError::Persistence(_))));
        assert_eq!(quantities(&cart), vec![("scarf", 1)]);
    }

    #[tokio::test]
    async fn restore_round_trips_saved_cart() -> TestResult {
        let (store, mut cart) = memory_cart();

        let _outcome = cart.add_item(suit(), 2).await?;
        let _outcome = cart.add_item(scarf(), 1).await?;

        let restored = ShoppingCart::restored(KEY, Arc::clone(&store)).await;

        assert_eq!(restored.lines(), cart.lines());
        assert_eq!(restored.totals(), cart.totals());

        Ok(())
    }

    #[tokio::test]
    async fn restore_without_snapshot_is_empty() {
        let cart = ShoppingCart::restored(KEY, MemoryCartStore::new()).await;

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[tokio::test]
    async fn restore_deletes_corrupt_snapshot() {
        let store = Arc::new(MemoryCartStore::with_snapshot(KEY, "{not json"));

        let cart = ShoppingCart::restored(KEY, Arc::clone(&store)).await;

        assert!(cart.is_empty());
        assert!(store.snapshot(KEY).is_none());
    }

    #[tokio::test]
    async fn restore_drops_bad_entries_and_writes_back() -> TestResult {
        let raw = json!([
            { "product": { "id": "a", "name": "Kurta", "price": 100 }, "quantity": 1 },
            { "product": { "id": "b", "name": "Kurta", "price": "abc" }, "quantity": 1 },
            { "product": { "id": "a", "name": "Kurta", "price": 100 }, "quantity": 2 },
        ]);
        let store = Arc::new(MemoryCartStore::with_snapshot(KEY, raw.to_string()));

        let cart = ShoppingCart::restored(KEY, Arc::clone(&store)).await;

        assert_eq!(quantities(&cart), vec![("a", 3)]);

        let rewritten = store.snapshot(KEY).ok_or("snapshot was not rewritten")?;
        let reloaded = snapshot::decode(&rewritten)?;

        assert!(!reloaded.was_repaired());
        assert_eq!(reloaded.lines, cart.lines());

        Ok(())
    }

    #[tokio::test]
    async fn restore_keeps_lines_beside_one_missing_its_name() -> TestResult {
        let raw = json!([
            { "product": { "id": "a", "name": "Kurta", "price": 100 }, "quantity": 1 },
            { "product": { "id": "b", "price": 250 }, "quantity": 4 },
        ]);
        let store = Arc::new(MemoryCartStore::with_snapshot(KEY, raw.to_string()));

        let cart = ShoppingCart::restored(KEY, Arc::clone(&store)).await;

        assert_eq!(quantities(&cart), vec![("a", 1)]);
        assert_eq!(cart.item_count(), 1);

        let rewritten = store.snapshot(KEY).ok_or("snapshot was not rewritten")?;

        assert_eq!(snapshot::decode(&rewritten)?.lines, cart.lines());

        Ok(())
    }

    #[tokio::test]
    async fn restore_survives_load_failure() {
        let mut store = MockCartStore::new();
        store
            .expect_load()
            .returning(|_| Err(CartStoreError::Unavailable));
        store.expect_delete().times(1).returning(|_| Ok(()));

        let cart = ShoppingCart::restored(KEY, store).await;

        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn summary_serializes_camel_case() -> TestResult {
        let (_store, mut cart) = memory_cart();

        let _outcome = cart.add_item(scarf(), 1).await?;

        let value = serde_json::to_value(cart.summary())?;

        assert_eq!(value["itemCount"], json!(1));
        assert_eq!(value["totals"]["total"], json!("750.00"));
        assert_eq!(value["lines"][0]["product"]["id"], json!("scarf"));

        Ok(())
    }
}
