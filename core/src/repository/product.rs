// core/src/repository/product.rs

use crate::dao::ProductDao;
use crate::error::{ShopError, ShopResult};
use crate::models::Product;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

/// Stock left after selling `units_sold`, never below zero.
pub fn restocked_level(stock: i64, units_sold: i64) -> i64 {
  stock.saturating_sub(units_sold).max(0)
}

#[derive(Clone)]
pub struct ProductRepository {
  products: ProductDao,
}

impl ProductRepository {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      products: ProductDao::new(pool),
    }
  }

  #[instrument(name = "products::add", skip(self, product), fields(name = %product.name), err(Display))]
  pub async fn add_product(&self, product: Product) -> ShopResult<Product> {
    if product.stock < 0 || product.price_cents < 0 {
      return Err(ShopError::validation("stock and price must not be negative"));
    }
    self.products.create(product).await
  }

  #[instrument(name = "products::show_all", skip(self), err(Display))]
  pub async fn show_all_products(&self) -> ShopResult<Vec<Product>> {
    let products = self.products.find_all().await?;
    info!(count = products.len(), "Catalogue listed.");
    Ok(products)
  }

  /// No hits is an empty list, never an error.
  #[instrument(name = "products::search", skip(self), err(Display))]
  pub async fn search_product(&self, term: &str) -> ShopResult<Vec<Product>> {
    let hits = self.products.search(term.trim()).await?;
    info!(hits = hits.len(), "Catalogue searched.");
    Ok(hits)
  }

  pub async fn find(&self, id: i64) -> ShopResult<Option<Product>> {
    self.products.find(id).await
  }

  /// Hydrates the two products a recommendation names, in the order named.
  /// Unknown ids are dropped; `first == second` yields one product.
  #[instrument(name = "products::find_pair", skip(self), err(Display))]
  pub async fn find_products(&self, first: i64, second: i64) -> ShopResult<Vec<Product>> {
    let mut wanted = vec![first];
    if second != first {
      wanted.push(second);
    }
    let mut found = self.products.find_many(&wanted).await?;
    found.sort_by_key(|product| wanted.iter().position(|id| *id == product.id));
    if found.len() < wanted.len() {
      warn!(?wanted, found = found.len(), "Some requested products do not exist.");
    }
    Ok(found)
  }

  /// Persists `max(0, stock - units_sold)` and returns the stored product.
  #[instrument(name = "products::update_stock", skip(self, product), fields(product_id = product.id), err(Display))]
  pub async fn update_product_stock(&self, product: &Product, units_sold: i64) -> ShopResult<Product> {
    if units_sold < 0 {
      return Err(ShopError::validation(format!("cannot sell {units_sold} units")));
    }
    let updated = Product {
      stock: restocked_level(product.stock, units_sold),
      ..product.clone()
    };
    let stored = self
      .products
      .update(&updated, product.id)
      .await?
      .ok_or_else(|| ShopError::not_found("Product", product.id))?;
    info!(stock = stored.stock, "Product stock updated.");
    Ok(stored)
  }

  pub async fn count(&self) -> ShopResult<i64> {
    self.products.count().await
  }
}
