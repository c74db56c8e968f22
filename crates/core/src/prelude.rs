//! ShopEase prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartError, CartStore, CartStoreError, CartSummary, LineItem, MemoryCartStore, Outcome,
        ShoppingCart,
        snapshot::{Restored, SnapshotError},
    },
    orders::{OrderStatus, ParseStatusError, PaymentStatus, StatusPatch},
    pricing::{CartTotals, PricingError, PricingPolicy, TotalsAmounts, calculate_totals},
    products::{InvalidProduct, ProductSnapshot},
};
