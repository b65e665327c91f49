// server/src/state.rs
use crate::config::AppConfig;
use crate::services::RequestIdentity;
use farmersfirst::repository::{AuthService, BasketRepository, CompletionClient, ProductRepository, RecommenderRepository};
use farmersfirst::UserPreferences;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub baskets: BasketRepository,
  pub products: ProductRepository,
  pub recommender: RecommenderRepository,
  // Sign-in swaps in the request's own identity provider.
  pub auth: AuthService,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(
    pool: SqlitePool,
    config: Arc<AppConfig>,
    prefs: UserPreferences,
    completion: Arc<dyn CompletionClient>,
  ) -> Self {
    Self {
      baskets: BasketRepository::new(pool.clone()).with_checkout_attempts(config.checkout_attempts),
      products: ProductRepository::new(pool.clone()),
      recommender: RecommenderRepository::new(pool.clone(), completion),
      auth: AuthService::new(pool, prefs, Arc::new(RequestIdentity::anonymous())),
      config,
    }
  }
}
