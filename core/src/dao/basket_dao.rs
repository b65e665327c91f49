// core/src/dao/basket_dao.rs

use crate::error::{ShopError, ShopResult};
use crate::models::{Basket, BasketStatus, User};
use crate::store::schema::{BASKET_STATUS, BASKET_USER, TABLE_BASKET};
use crate::store::{Accessor, Entity, SqliteQuery};
use sqlx::SqliteConnection;

impl Entity for Basket {
  const TABLE: &'static str = TABLE_BASKET;
  const NAME: &'static str = "Basket";
  const COLUMNS: &'static [&'static str] = &[BASKET_USER, BASKET_STATUS];

  fn id(&self) -> i64 {
    self.id
  }

  fn set_id(&mut self, id: i64) {
    self.id = id;
  }

  fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
    query.bind(self.user_id).bind(self.status.as_str())
  }
}

pub type BasketDao = Accessor<Basket>;

impl BasketDao {
  /// The user's pending basket, newest id first if the store ever holds more than one.
  pub async fn latest_pending_on(conn: &mut SqliteConnection, user_id: i64) -> ShopResult<Option<Basket>> {
    let predicate = format!("{BASKET_USER} = ? AND {BASKET_STATUS} = ? ORDER BY id DESC LIMIT 1");
    let baskets = Self::query_where_on(conn, &predicate, &[user_id.into(), BasketStatus::Pending.into()]).await?;
    Ok(baskets.into_iter().next())
  }

  pub async fn latest_pending(&self, user_id: i64) -> ShopResult<Option<Basket>> {
    let mut conn = self.pool().acquire().await?;
    Self::latest_pending_on(&mut conn, user_id).await
  }

  /// Returns the user's pending basket, inserting one if none exists.
  ///
  /// The insert is ignored when another caller won the race: the partial
  /// unique index admits a single pending row per user.
  pub async fn open_pending_on(conn: &mut SqliteConnection, user_id: i64) -> ShopResult<Basket> {
    let sql = format!(
      "INSERT INTO {TABLE_BASKET} ({BASKET_USER}, {BASKET_STATUS}) VALUES (?, ?) ON CONFLICT DO NOTHING"
    );
    sqlx::query(&sql)
      .bind(user_id)
      .bind(BasketStatus::Pending.as_str())
      .execute(&mut *conn)
      .await?;
    Self::latest_pending_on(conn, user_id)
      .await?
      .ok_or_else(|| ShopError::not_found("Pending basket for user", user_id))
  }

  pub async fn open_pending(&self, user_id: i64) -> ShopResult<Basket> {
    let mut conn = self.pool().acquire().await?;
    Self::open_pending_on(&mut conn, user_id).await
  }

  /// Flips a pending basket to checked. False if it was not pending.
  pub async fn mark_checked_on(conn: &mut SqliteConnection, basket_id: i64) -> ShopResult<bool> {
    let sql = format!("UPDATE {TABLE_BASKET} SET {BASKET_STATUS} = ? WHERE id = ? AND {BASKET_STATUS} = ?");
    let result = sqlx::query(&sql)
      .bind(BasketStatus::Checked.as_str())
      .bind(basket_id)
      .bind(BasketStatus::Pending.as_str())
      .execute(&mut *conn)
      .await?;
    Ok(result.rows_affected() == 1)
  }

  pub async fn owner(&self, basket: &Basket) -> ShopResult<Option<User>> {
    let mut conn = self.pool().acquire().await?;
    Accessor::<User>::find_on(&mut conn, basket.user_id).await
  }
}
