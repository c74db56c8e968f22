//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Reasons a product snapshot is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidProduct {
    /// The product identifier was empty.
    #[error("product id must not be empty")]
    MissingId,

    /// The product name was empty.
    #[error("product {0} has no name")]
    MissingName(String),

    /// The unit price was below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(String),

    /// The discount percentage was outside `0..=100`.
    #[error("product {0} has a discount outside 0-100%")]
    DiscountOutOfRange(String),
}

/// A read-only copy of a catalog product, captured when it enters a cart.
///
/// Catalog price changes never reach an existing snapshot; a shopper only sees
/// a new price once the product is added again from a fresh lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Opaque catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price before discount.
    pub price: Decimal,

    /// Optional percentage discount (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,

    /// Availability flag.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Image references.
    #[serde(default)]
    pub images: SmallVec<[String; 3]>,
}

fn default_in_stock() -> bool {
    true
}

impl ProductSnapshot {
    /// Create an in-stock snapshot with no discount and no images.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            discount: None,
            in_stock: true,
            images: SmallVec::new(),
        }
    }

    /// Set the percentage discount.
    #[must_use]
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Set the availability flag.
    #[must_use]
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Add an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// Check the structural rules a snapshot must satisfy to enter a cart.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidProduct`] reason found.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.id.trim().is_empty() {
            return Err(InvalidProduct::MissingId);
        }

        if self.name.trim().is_empty() {
            return Err(InvalidProduct::MissingName(self.id.clone()));
        }

        if self.price < Decimal::ZERO {
            return Err(InvalidProduct::NegativePrice(self.id.clone()));
        }

        if let Some(discount) = self.discount
            && (discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED)
        {
            return Err(InvalidProduct::DiscountOutOfRange(self.id.clone()));
        }

        Ok(())
    }
}
