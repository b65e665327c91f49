// core/src/repository/recommender.rs

//! Product suggestions from an external text-completion service.

use super::product::ProductRepository;
use crate::dao::BasketDao;
use crate::error::ShopResult;
use crate::models::{BasketItem, Product};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A text-completion endpoint: prompt in, reply text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
  async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Stands in when no completion credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCompletion;

#[async_trait]
impl CompletionClient for DisabledCompletion {
  async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
    anyhow::bail!("text completion is not configured")
  }
}

fn describe(products: &[Product]) -> String {
  products
    .iter()
    .map(|p| format!("(id={}, name={}, description={})", p.id, p.name, p.description))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Prompt asking for two catalogue ids that complement what is already in the basket.
pub fn recommendation_prompt(catalog: &[Product], in_basket: &[Product]) -> String {
  format!(
    "given the following items: [{}]\n\
     suggest two items for someone who has already shopped the following: [{}].\n\
     provide the answer in this format [id1, id2]",
    describe(catalog),
    describe(in_basket)
  )
}

/// Reads a reply of the exact form `[12, 34]` (surrounding whitespace allowed).
pub fn parse_recommendation(reply: &str) -> Option<(i64, i64)> {
  let inner = reply.trim().strip_prefix('[')?.strip_suffix(']')?;
  let (first, second) = inner.split_once(", ")?;
  Some((parse_id(first)?, parse_id(second)?))
}

fn parse_id(raw: &str) -> Option<i64> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  raw.parse().ok()
}

#[derive(Clone)]
pub struct RecommenderRepository {
  products: ProductRepository,
  baskets: BasketDao,
  client: Arc<dyn CompletionClient>,
}

impl RecommenderRepository {
  pub fn new(pool: SqlitePool, client: Arc<dyn CompletionClient>) -> Self {
    Self {
      products: ProductRepository::new(pool.clone()),
      baskets: BasketDao::new(pool),
      client,
    }
  }

  /// Sends `prompt` and turns a `[id1, id2]` reply into unsaved candidate
  /// lines (quantity 1) on the user's pending basket.
  ///
  /// Never fails: a service error, a malformed reply, or unknown ids all
  /// yield an empty list.
  #[instrument(name = "recommender::text_recommend", skip(self, prompt))]
  pub async fn text_recommend(&self, user_id: i64, prompt: &str) -> Vec<BasketItem> {
    match self.try_recommend(user_id, prompt).await {
      Ok(items) => items,
      Err(err) => {
        warn!(error = %err, "Recommendation failed, offering none.");
        Vec::new()
      }
    }
  }

  async fn try_recommend(&self, user_id: i64, prompt: &str) -> ShopResult<Vec<BasketItem>> {
    let reply = self.client.generate(prompt).await?;
    let Some((first, second)) = parse_recommendation(&reply) else {
      warn!(reply = %reply, "Completion reply is not an id pair.");
      return Ok(Vec::new());
    };

    let products = self.products.find_products(first, second).await?;
    if products.is_empty() {
      return Ok(Vec::new());
    }
    let basket = self.baskets.open_pending(user_id).await?;
    info!(first, second, found = products.len(), "Recommendation resolved.");

    Ok(
      products
        .into_iter()
        .map(|product| BasketItem {
          id: 0,
          basket: basket.clone(),
          product,
          quantity: 1,
        })
        .collect(),
    )
  }

  /// Builds the prompt from the full catalogue and the user's current lines, then recommends.
  #[instrument(name = "recommender::for_user", skip(self, basket_lines))]
  pub async fn recommend_for_user(&self, user_id: i64, basket_lines: &[BasketItem]) -> Vec<BasketItem> {
    let catalog = match self.products.show_all_products().await {
      Ok(catalog) => catalog,
      Err(err) => {
        warn!(error = %err, "Catalogue unavailable for recommendation.");
        return Vec::new();
      }
    };
    let in_basket: Vec<Product> = basket_lines.iter().map(|line| line.product.clone()).collect();
    let prompt = recommendation_prompt(&catalog, &in_basket);
    self.text_recommend(user_id, &prompt).await
  }
}
