//! ShopEase
//!
//! Cart, pricing and order-status rules for the ShopEase storefront. Nothing in
//! this crate talks to a network or database directly; persistence is reached
//! through the [`cart::CartStore`] trait.

pub mod cart;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
