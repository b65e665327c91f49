// core/src/repository/mod.rs

//! Domain services. Each wraps the accessors it needs and is cheap to clone.

pub mod auth;
pub mod basket;
pub mod preferences;
pub mod product;
pub mod recommender;

pub use auth::{AuthService, Identity, IdentityError, IdentityProvider};
pub use basket::{
  aggregate_basket_products, basket_totals, BasketRepository, BasketTotals, CheckoutReceipt, StepDirection,
  MAX_LINE_QUANTITY,
};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore, UserPreferences};
pub use product::{restocked_level, ProductRepository};
pub use recommender::{
  parse_recommendation, recommendation_prompt, CompletionClient, DisabledCompletion, RecommenderRepository,
};
