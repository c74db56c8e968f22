//! Pricing
//!
//! Cart totals are a pure function of the line items. Each monetary step
//! (subtotal, tax, total) is rounded to two decimal places, half away from
//! zero, before the next step uses it.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Serialize;
use thiserror::Error;

use crate::{cart::LineItem, products::ProductSnapshot};

/// Decimal places kept for every monetary amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An intermediate amount exceeded what can be represented.
    #[error("cart amount overflowed")]
    Overflow,
}

/// Tax and shipping rules applied to every cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax.
    pub tax_rate: Decimal,

    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: Decimal,

    /// Shipping charged below the threshold.
    pub flat_shipping_fee: Decimal,

    /// Currency totals are expressed in. Must use two minor-unit digits.
    pub currency: &'static Currency,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            free_shipping_threshold: Decimal::from(1_000),
            flat_shipping_fee: Decimal::from(200),
            currency: iso::PKR,
        }
    }
}

/// Derived monetary totals for a cart, held in minor units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    subtotal: i64,
    tax: i64,
    shipping: i64,
    discount: i64,
    total: i64,
    currency: &'static Currency,
}

/// Serializable view of [`CartTotals`] as two-decimal amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsAmounts {
    /// ISO currency code.
    pub currency: &'static str,

    /// Sum of discounted line totals.
    pub subtotal: Decimal,

    /// Tax on the subtotal.
    pub tax: Decimal,

    /// Shipping charge.
    pub shipping: Decimal,

    /// Coupon discount (always zero for now).
    pub discount: Decimal,

    /// Amount payable.
    pub total: Decimal,
}

impl CartTotals {
    /// Totals for an empty cart.
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            subtotal: 0,
            tax: 0,
            shipping: 0,
            discount: 0,
            total: 0,
            currency,
        }
    }

    /// Sum of discounted line totals.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        Money::from_minor(self.subtotal, self.currency)
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Money<'static, Currency> {
        Money::from_minor(self.tax, self.currency)
    }

    /// Shipping charge.
    pub fn shipping(&self) -> Money<'static, Currency> {
        Money::from_minor(self.shipping, self.currency)
    }

    /// Coupon discount.
    pub fn discount(&self) -> Money<'static, Currency> {
        Money::from_minor(self.discount, self.currency)
    }

    /// Amount payable.
    pub fn total(&self) -> Money<'static, Currency> {
        Money::from_minor(self.total, self.currency)
    }

    /// Currency of every amount.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Two-decimal amounts suitable for serialization.
    pub fn amounts(&self) -> TotalsAmounts {
        TotalsAmounts {
            currency: self.currency.iso_alpha_code,
            subtotal: Decimal::new(self.subtotal, MONEY_DECIMAL_PLACES),
            tax: Decimal::new(self.tax, MONEY_DECIMAL_PLACES),
            shipping: Decimal::new(self.shipping, MONEY_DECIMAL_PLACES),
            discount: Decimal::new(self.discount, MONEY_DECIMAL_PLACES),
            total: Decimal::new(self.total, MONEY_DECIMAL_PLACES),
        }
    }
}

/// Unit price after the product's percentage discount.
pub fn effective_unit_price(product: &ProductSnapshot) -> Decimal {
    let discount = product.discount.unwrap_or(Decimal::ZERO);

    product.price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
}

/// Round half away from zero to [`MONEY_DECIMAL_PLACES`].
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the totals for a set of line items.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if any amount cannot be represented.
pub fn calculate_totals(
    lines: &[LineItem],
    policy: &PricingPolicy,
) -> Result<CartTotals, PricingError> {
    if lines.is_empty() {
        return Ok(CartTotals::zero(policy.currency));
    }

    let raw_subtotal = lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        effective_unit_price(&line.product)
            .checked_mul(Decimal::from(line.quantity))
            .and_then(|line_total| acc.checked_add(line_total))
            .ok_or(PricingError::Overflow)
    })?;

    let subtotal = round_money(raw_subtotal);

    let tax = round_money(
        subtotal
            .checked_mul(policy.tax_rate)
            .ok_or(PricingError::Overflow)?,
    );

    let shipping = if subtotal >= policy.free_shipping_threshold {
        Decimal::ZERO
    } else {
        policy.flat_shipping_fee
    };

    let discount = Decimal::ZERO;

    let total = round_money(
        subtotal
            .checked_add(tax)
            .and_then(|amount| amount.checked_add(shipping))
            .and_then(|amount| amount.checked_sub(discount))
            .ok_or(PricingError::Overflow)?,
    );

    Ok(CartTotals {
        subtotal: to_minor(subtotal)?,
        tax: to_minor(tax)?,
        shipping: to_minor(round_money(shipping))?,
        discount: to_minor(discount)?,
        total: to_minor(total)?,
        currency: policy.currency,
    })
}

fn to_minor(amount: Decimal) -> Result<i64, PricingError> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.trunc().to_i64())
        .ok_or(PricingError::Overflow)
}
