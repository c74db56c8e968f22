//! `ShopEase` application services over a Postgres document store.
//!
//! The [`context::AppContext`] wires the catalog, carts, orders, reviews and
//! session services together for the HTTP server and the maintenance CLI.

pub mod auth;
pub mod context;
pub mod database;
pub mod documents;
pub mod domain;
pub mod notifications;
pub mod uuids;

#[cfg(test)]
mod test;
