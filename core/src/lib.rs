// src/lib.rs

//! FarmersFirst: the shop core behind the agricultural supplies app.
//!
//! It covers:
//!  - A generic single-table accessor over an embedded SQLite store.
//!  - Baskets: one pending basket per user, line edits, aggregation, checkout.
//!  - Catalogue listing, search, and stock bookkeeping.
//!  - Two-product recommendations from an external text-completion service.
//!  - Sign-in against an external identity provider, with the session kept in preferences.
//!  - A loading / success / error stream every call can be observed through.

pub mod config;
pub mod dao;
pub mod error;
pub mod models;
pub mod repository;
pub mod resource;
pub mod seed;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::config::StoreConfig;
pub use crate::error::{ShopError, ShopResult};
pub use crate::models::{Basket, BasketItem, BasketStatus, Product, User};
pub use crate::repository::{
  AuthService, BasketRepository, CheckoutReceipt, CompletionClient, ProductRepository, RecommenderRepository,
  StepDirection, UserPreferences,
};
pub use crate::resource::{track, Resource};
