//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{pricing::effective_unit_price, products::ProductSnapshot};

/// One product snapshot and how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product as it looked when it was added.
    pub product: ProductSnapshot,

    /// Always at least one.
    pub quantity: u32,
}

impl LineItem {
    /// Catalog identifier of the product on this line.
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price after the product discount.
    pub fn unit_price(&self) -> Decimal {
        effective_unit_price(&self.product)
    }

    /// Unrounded line total.
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}
