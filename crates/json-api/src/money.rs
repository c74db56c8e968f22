//! Money formatting for responses.
//!
//! Amounts leave the API as two-decimal strings so clients never see binary
//! floating point.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use shopease::pricing::{TotalsAmounts, round_money};
use shopease_app::domain::orders::OrderTotals;

/// Two-decimal string form of an amount, e.g. `"1080.00"`.
pub(crate) fn amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Totals Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    /// ISO currency code
    pub currency: String,

    /// Sum of discounted line totals
    pub subtotal: String,

    /// Tax on the subtotal
    pub tax: String,

    /// Shipping charge
    pub shipping: String,

    /// Coupon discount
    pub discount: String,

    /// Amount payable
    pub total: String,
}

impl From<&TotalsAmounts> for TotalsResponse {
    fn from(totals: &TotalsAmounts) -> Self {
        Self {
            currency: totals.currency.to_string(),
            subtotal: amount(totals.subtotal),
            tax: amount(totals.tax),
            shipping: amount(totals.shipping),
            discount: amount(totals.discount),
            total: amount(totals.total),
        }
    }
}

impl From<OrderTotals> for TotalsResponse {
    fn from(totals: OrderTotals) -> Self {
        Self {
            currency: totals.currency,
            subtotal: amount(totals.subtotal),
            tax: amount(totals.tax),
            shipping: amount(totals.shipping),
            discount: amount(totals.discount),
            total: amount(totals.total),
        }
    }
}
