// core/src/models/basket_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Basket, Product};
use crate::error::{ShopError, ShopResult};

/// One raw `basket_items` row. Several rows may exist for the same
/// (basket, product) pair; readers aggregate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BasketItemRecord {
  pub id: i64,
  pub basket_id: i64,
  pub product_id: i64,
  pub quantity: i64,
}

/// A basket line with its basket and product resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
  pub id: i64,
  pub basket: Basket,
  pub product: Product,
  pub quantity: i64,
}

impl BasketItem {
  pub fn line_total_cents(&self) -> ShopResult<i64> {
    self
      .product
      .price_cents
      .checked_mul(self.quantity)
      .ok_or_else(|| ShopError::validation(format!("line total for product {} overflows", self.product.id)))
  }
}
