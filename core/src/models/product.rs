// core/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  #[sqlx(rename = "items_stock")]
  pub stock: i64,
  #[sqlx(rename = "unit_price_cents")]
  pub price_cents: i64,
  pub image_url: String,
}

impl Product {
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    stock: i64,
    price_cents: i64,
    image_url: impl Into<String>,
  ) -> Self {
    Self {
      id: 0,
      name: name.into(),
      description: description.into(),
      stock,
      price_cents,
      image_url: image_url.into(),
    }
  }
}
