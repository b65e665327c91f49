// core/src/dao/basket_item_dao.rs

use crate::error::{ShopError, ShopResult};
use crate::models::{Basket, BasketItem, BasketItemRecord, BasketStatus, Product};
use crate::store::schema::{
  BASKET_ITEM_BASKET, BASKET_ITEM_PRODUCT, BASKET_ITEM_QTY, BASKET_STATUS, TABLE_BASKET, TABLE_BASKET_ITEMS,
};
use crate::store::{Accessor, Entity, SqliteQuery};
use sqlx::SqliteConnection;
use std::collections::HashMap;

impl Entity for BasketItemRecord {
  const TABLE: &'static str = TABLE_BASKET_ITEMS;
  const NAME: &'static str = "Basket item";
  const COLUMNS: &'static [&'static str] = &[BASKET_ITEM_BASKET, BASKET_ITEM_PRODUCT, BASKET_ITEM_QTY];

  fn id(&self) -> i64 {
    self.id
  }

  fn set_id(&mut self, id: i64) {
    self.id = id;
  }

  fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
    query.bind(self.basket_id).bind(self.product_id).bind(self.quantity)
  }
}

pub type BasketItemDao = Accessor<BasketItemRecord>;

impl BasketItemDao {
  /// Raw rows of one basket in insertion order, duplicates included.
  pub async fn for_basket_on(conn: &mut SqliteConnection, basket_id: i64) -> ShopResult<Vec<BasketItemRecord>> {
    let predicate = format!("{BASKET_ITEM_BASKET} = ? ORDER BY id");
    Self::query_where_on(conn, &predicate, &[basket_id.into()]).await
  }

  /// One row per product with quantities summed. Groups keep first-seen
  /// order and are represented by their newest row id.
  pub async fn aggregated_for_basket_on(
    conn: &mut SqliteConnection,
    basket_id: i64,
  ) -> ShopResult<Vec<BasketItemRecord>> {
    let sql = format!(
      "SELECT MAX(id) AS id, {BASKET_ITEM_BASKET}, {BASKET_ITEM_PRODUCT}, SUM({BASKET_ITEM_QTY}) AS {BASKET_ITEM_QTY} \
       FROM {TABLE_BASKET_ITEMS} WHERE {BASKET_ITEM_BASKET} = ? \
       GROUP BY {BASKET_ITEM_BASKET}, {BASKET_ITEM_PRODUCT} ORDER BY MIN(id)"
    );
    let rows = sqlx::query_as::<_, BasketItemRecord>(&sql)
      .bind(basket_id)
      .fetch_all(&mut *conn)
      .await?;
    Ok(rows)
  }

  /// Units of `product_id` across all of its rows in `basket_id`.
  pub async fn product_quantity_on(conn: &mut SqliteConnection, basket_id: i64, product_id: i64) -> ShopResult<i64> {
    let sql = format!(
      "SELECT COALESCE(SUM({BASKET_ITEM_QTY}), 0) FROM {TABLE_BASKET_ITEMS} \
       WHERE {BASKET_ITEM_BASKET} = ? AND {BASKET_ITEM_PRODUCT} = ?"
    );
    let units: i64 = sqlx::query_scalar(&sql)
      .bind(basket_id)
      .bind(product_id)
      .fetch_one(&mut *conn)
      .await?;
    Ok(units)
  }

  /// Inserts `record` only while its basket is still pending. `None` when the
  /// basket has been checked out.
  pub async fn create_in_pending_on(
    conn: &mut SqliteConnection,
    mut record: BasketItemRecord,
  ) -> ShopResult<Option<BasketItemRecord>> {
    let sql = format!(
      "INSERT INTO {TABLE_BASKET_ITEMS} ({BASKET_ITEM_BASKET}, {BASKET_ITEM_PRODUCT}, {BASKET_ITEM_QTY}) \
       SELECT ?, ?, ? WHERE EXISTS (SELECT 1 FROM {TABLE_BASKET} WHERE id = ? AND {BASKET_STATUS} = ?)"
    );
    let result = sqlx::query(&sql)
      .bind(record.basket_id)
      .bind(record.product_id)
      .bind(record.quantity)
      .bind(record.basket_id)
      .bind(BasketStatus::Pending.as_str())
      .execute(&mut *conn)
      .await?;
    if result.rows_affected() == 0 {
      return Ok(None);
    }
    record.id = result.last_insert_rowid();
    Ok(Some(record))
  }

  /// Deletes every row for `product_id` in `basket_id`.
  pub async fn remove_product_on(conn: &mut SqliteConnection, basket_id: i64, product_id: i64) -> ShopResult<bool> {
    let predicate = format!("{BASKET_ITEM_PRODUCT} = ? AND {BASKET_ITEM_BASKET} = ?");
    Self::delete_where_on(conn, &predicate, &[product_id.into(), basket_id.into()]).await
  }

  /// Deletes the rows for (basket, product) other than `keep_id`.
  pub async fn remove_duplicates_on(
    conn: &mut SqliteConnection,
    basket_id: i64,
    product_id: i64,
    keep_id: i64,
  ) -> ShopResult<bool> {
    let predicate = format!("{BASKET_ITEM_PRODUCT} = ? AND {BASKET_ITEM_BASKET} = ? AND id <> ?");
    Self::delete_where_on(conn, &predicate, &[product_id.into(), basket_id.into(), keep_id.into()]).await
  }

  /// Resolves each row's basket and product. Lookups are cached per call.
  pub async fn hydrate_all_on(
    conn: &mut SqliteConnection,
    records: Vec<BasketItemRecord>,
  ) -> ShopResult<Vec<BasketItem>> {
    let mut baskets: HashMap<i64, Basket> = HashMap::new();
    let mut products: HashMap<i64, Product> = HashMap::new();
    let mut items = Vec::with_capacity(records.len());

    for record in records {
      let basket = match baskets.get(&record.basket_id) {
        Some(basket) => basket.clone(),
        None => {
          let basket = Accessor::<Basket>::find_on(conn, record.basket_id)
            .await?
            .ok_or_else(|| ShopError::not_found(Basket::NAME, record.basket_id))?;
          baskets.insert(basket.id, basket.clone());
          basket
        }
      };
      let product = match products.get(&record.product_id) {
        Some(product) => product.clone(),
        None => {
          let product = Accessor::<Product>::find_on(conn, record.product_id)
            .await?
            .ok_or_else(|| ShopError::not_found(Product::NAME, record.product_id))?;
          products.insert(product.id, product.clone());
          product
        }
      };
      items.push(BasketItem {
        id: record.id,
        basket,
        product,
        quantity: record.quantity,
      });
    }
    Ok(items)
  }

  pub async fn hydrate_on(conn: &mut SqliteConnection, record: BasketItemRecord) -> ShopResult<BasketItem> {
    let id = record.id;
    let mut items = Self::hydrate_all_on(conn, vec![record]).await?;
    items.pop().ok_or_else(|| ShopError::not_found(BasketItemRecord::NAME, id))
  }

  pub async fn items_for_basket(&self, basket_id: i64) -> ShopResult<Vec<BasketItem>> {
    let mut conn = self.pool().acquire().await?;
    let records = Self::for_basket_on(&mut conn, basket_id).await?;
    Self::hydrate_all_on(&mut conn, records).await
  }

  pub async fn lines_for_basket(&self, basket_id: i64) -> ShopResult<Vec<BasketItem>> {
    let mut conn = self.pool().acquire().await?;
    let records = Self::aggregated_for_basket_on(&mut conn, basket_id).await?;
    Self::hydrate_all_on(&mut conn, records).await
  }

  pub async fn remove_product(&self, basket_id: i64, product_id: i64) -> ShopResult<bool> {
    let mut conn = self.pool().acquire().await?;
    Self::remove_product_on(&mut conn, basket_id, product_id).await
  }
}
