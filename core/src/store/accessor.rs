// core/src/store/accessor.rs

//! Create/read/update/delete over a single table for any [`Entity`].
//!
//! Each operation comes in two flavours: a pool-backed one on [`Accessor`] and
//! an `*_on` one taking an open connection, so domain services can run the same
//! statements inside a transaction (`&mut *tx`).

use crate::error::ShopResult;
use crate::models::BasketStatus;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool};
use std::marker::PhantomData;
use tracing::debug;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;
type SqliteQueryAs<'q, E> = QueryAs<'q, Sqlite, E, SqliteArguments<'q>>;

/// A table row type the generic accessor can read and write.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
  const TABLE: &'static str;
  /// Human-readable name for not-found errors.
  const NAME: &'static str;
  /// Writable columns, in the order [`Entity::bind_columns`] binds them. `id` is never listed.
  const COLUMNS: &'static [&'static str];

  fn id(&self) -> i64;
  fn set_id(&mut self, id: i64);
  fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// A bound parameter for `query_where`/`delete_where` predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
  Int(i64),
  Text(String),
}

impl From<i64> for SqlValue {
  fn from(v: i64) -> Self {
    SqlValue::Int(v)
  }
}

impl From<&str> for SqlValue {
  fn from(v: &str) -> Self {
    SqlValue::Text(v.to_string())
  }
}

impl From<String> for SqlValue {
  fn from(v: String) -> Self {
    SqlValue::Text(v)
  }
}

impl From<BasketStatus> for SqlValue {
  fn from(v: BasketStatus) -> Self {
    SqlValue::Text(v.as_str().to_string())
  }
}

fn bind_params<'q>(mut query: SqliteQuery<'q>, params: &[SqlValue]) -> SqliteQuery<'q> {
  for param in params {
    query = match param {
      SqlValue::Int(v) => query.bind(*v),
      SqlValue::Text(v) => query.bind(v.clone()),
    };
  }
  query
}

fn bind_params_as<'q, E>(mut query: SqliteQueryAs<'q, E>, params: &[SqlValue]) -> SqliteQueryAs<'q, E> {
  for param in params {
    query = match param {
      SqlValue::Int(v) => query.bind(*v),
      SqlValue::Text(v) => query.bind(v.clone()),
    };
  }
  query
}

fn insert_sql<E: Entity>() -> String {
  let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    E::TABLE,
    E::COLUMNS.join(", "),
    placeholders
  )
}

fn update_sql<E: Entity>() -> String {
  let assignments = E::COLUMNS
    .iter()
    .map(|column| format!("{column} = ?"))
    .collect::<Vec<_>>()
    .join(", ");
  format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments)
}

/// Generic single-table accessor.
pub struct Accessor<E> {
  pool: SqlitePool,
  _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Accessor<E> {
  fn clone(&self) -> Self {
    Self {
      pool: self.pool.clone(),
      _entity: PhantomData,
    }
  }
}

impl<E: Entity> Accessor<E> {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      pool,
      _entity: PhantomData,
    }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  // --- Connection-backed operations ---

  /// Inserts `item` and writes the generated id back onto it.
  pub async fn create_on(conn: &mut SqliteConnection, mut item: E) -> ShopResult<E> {
    let sql = insert_sql::<E>();
    let result = item.bind_columns(sqlx::query(&sql)).execute(&mut *conn).await?;
    item.set_id(result.last_insert_rowid());
    debug!(table = E::TABLE, id = item.id(), "Row created.");
    Ok(item)
  }

  pub async fn delete_on(conn: &mut SqliteConnection, id: i64) -> ShopResult<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
    let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
    debug!(table = E::TABLE, id, rows = result.rows_affected(), "Delete by id.");
    Ok(result.rows_affected() > 0)
  }

  /// Overwrites row `id` with `item`'s columns and returns the re-read row.
  /// `None` unless exactly one row changed.
  pub async fn update_on(conn: &mut SqliteConnection, item: &E, id: i64) -> ShopResult<Option<E>> {
    let sql = update_sql::<E>();
    let result = item.bind_columns(sqlx::query(&sql)).bind(id).execute(&mut *conn).await?;
    if result.rows_affected() != 1 {
      debug!(table = E::TABLE, id, rows = result.rows_affected(), "Update touched no single row.");
      return Ok(None);
    }
    Self::find_on(conn, id).await
  }

  pub async fn find_on(conn: &mut SqliteConnection, id: i64) -> ShopResult<Option<E>> {
    let sql = format!("SELECT * FROM {} WHERE id = ? LIMIT 1", E::TABLE);
    let row = sqlx::query_as::<_, E>(&sql).bind(id).fetch_optional(&mut *conn).await?;
    Ok(row)
  }

  pub async fn find_all_on(conn: &mut SqliteConnection) -> ShopResult<Vec<E>> {
    let sql = format!("SELECT * FROM {}", E::TABLE);
    let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&mut *conn).await?;
    Ok(rows)
  }

  /// `SELECT * FROM table WHERE {predicate}`. The predicate is trusted SQL;
  /// every value goes through `params`.
  pub async fn query_where_on(conn: &mut SqliteConnection, predicate: &str, params: &[SqlValue]) -> ShopResult<Vec<E>> {
    let sql = format!("SELECT * FROM {} WHERE {}", E::TABLE, predicate);
    let rows = bind_params_as(sqlx::query_as::<_, E>(&sql), params)
      .fetch_all(&mut *conn)
      .await?;
    Ok(rows)
  }

  pub async fn delete_where_on(conn: &mut SqliteConnection, predicate: &str, params: &[SqlValue]) -> ShopResult<bool> {
    let sql = format!("DELETE FROM {} WHERE {}", E::TABLE, predicate);
    let result = bind_params(sqlx::query(&sql), params).execute(&mut *conn).await?;
    debug!(table = E::TABLE, rows = result.rows_affected(), "Delete by predicate.");
    Ok(result.rows_affected() > 0)
  }

  pub async fn count_on(conn: &mut SqliteConnection) -> ShopResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
    let count: i64 = sqlx::query_scalar(&sql).fetch_one(&mut *conn).await?;
    Ok(count)
  }

  // --- Pool-backed operations ---

  pub async fn create(&self, item: E) -> ShopResult<E> {
    let mut conn = self.pool.acquire().await?;
    Self::create_on(&mut conn, item).await
  }

  pub async fn delete(&self, id: i64) -> ShopResult<bool> {
    let mut conn = self.pool.acquire().await?;
    Self::delete_on(&mut conn, id).await
  }

  pub async fn update(&self, item: &E, id: i64) -> ShopResult<Option<E>> {
    let mut conn = self.pool.acquire().await?;
    Self::update_on(&mut conn, item, id).await
  }

  pub async fn find(&self, id: i64) -> ShopResult<Option<E>> {
    let mut conn = self.pool.acquire().await?;
    Self::find_on(&mut conn, id).await
  }

  pub async fn find_all(&self) -> ShopResult<Vec<E>> {
    let mut conn = self.pool.acquire().await?;
    Self::find_all_on(&mut conn).await
  }

  pub async fn query_where(&self, predicate: &str, params: &[SqlValue]) -> ShopResult<Vec<E>> {
    let mut conn = self.pool.acquire().await?;
    Self::query_where_on(&mut conn, predicate, params).await
  }

  pub async fn delete_where(&self, predicate: &str, params: &[SqlValue]) -> ShopResult<bool> {
    let mut conn = self.pool.acquire().await?;
    Self::delete_where_on(&mut conn, predicate, params).await
  }

  pub async fn count(&self) -> ShopResult<i64> {
    let mut conn = self.pool.acquire().await?;
    Self::count_on(&mut conn).await
  }
}
