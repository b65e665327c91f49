// core/src/dao/product_dao.rs

use crate::error::ShopResult;
use crate::models::Product;
use crate::store::schema::{PRODUCT_DESC, PRODUCT_IMAGE, PRODUCT_NAME, PRODUCT_PRICE, PRODUCT_STOCK, TABLE_PRODUCTS};
use crate::store::{Accessor, Entity, SqlValue, SqliteQuery};
use sqlx::SqliteConnection;

impl Entity for Product {
  const TABLE: &'static str = TABLE_PRODUCTS;
  const NAME: &'static str = "Product";
  const COLUMNS: &'static [&'static str] = &[PRODUCT_NAME, PRODUCT_DESC, PRODUCT_STOCK, PRODUCT_PRICE, PRODUCT_IMAGE];

  fn id(&self) -> i64 {
    self.id
  }

  fn set_id(&mut self, id: i64) {
    self.id = id;
  }

  fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
    query
      .bind(self.name.clone())
      .bind(self.description.clone())
      .bind(self.stock)
      .bind(self.price_cents)
      .bind(self.image_url.clone())
  }
}

/// Escapes LIKE wildcards so a search term only ever matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len() + 2);
  escaped.push('%');
  for ch in term.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped.push('%');
  escaped
}

pub type ProductDao = Accessor<Product>;

impl ProductDao {
  /// Case-insensitive (ASCII) substring match on name or description.
  pub async fn search(&self, term: &str) -> ShopResult<Vec<Product>> {
    let pattern = like_pattern(term);
    let predicate = format!("{PRODUCT_NAME} LIKE ? ESCAPE '\\' OR {PRODUCT_DESC} LIKE ? ESCAPE '\\' ORDER BY id");
    self
      .query_where(&predicate, &[pattern.clone().into(), pattern.into()])
      .await
  }

  /// Rows whose id is in `ids`, in store order. Missing ids are skipped.
  pub async fn find_many(&self, ids: &[i64]) -> ShopResult<Vec<Product>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let predicate = format!("id IN ({placeholders})");
    let params: Vec<SqlValue> = ids.iter().map(|id| SqlValue::Int(*id)).collect();
    self.query_where(&predicate, &params).await
  }

  /// Subtracts `units` from the current stock, flooring at zero, in one statement.
  pub async fn decrement_stock_on(conn: &mut SqliteConnection, product_id: i64, units: i64) -> ShopResult<bool> {
    let sql = format!("UPDATE {TABLE_PRODUCTS} SET {PRODUCT_STOCK} = MAX(0, {PRODUCT_STOCK} - ?) WHERE id = ?");
    let result = sqlx::query(&sql).bind(units).bind(product_id).execute(&mut *conn).await?;
    Ok(result.rows_affected() == 1)
  }
}
