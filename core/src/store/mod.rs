// core/src/store/mod.rs

//! The embedded SQLite store: connection setup, schema, and the generic accessor.

pub mod accessor;
pub mod schema;

pub use accessor::{Accessor, Entity, SqlValue, SqliteQuery};

use crate::config::StoreConfig;
use crate::error::ShopResult;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{info, instrument};

/// Opens the pool described by `config` and makes sure the schema exists.
#[instrument(name = "store::connect", skip(config), fields(url = %config.database_url), err(Display))]
pub async fn connect(config: &StoreConfig) -> ShopResult<SqlitePool> {
  let mut options = SqliteConnectOptions::from_str(&config.database_url)?
    .create_if_missing(true)
    .foreign_keys(true)
    .busy_timeout(config.busy_timeout);

  let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));
  if config.is_in_memory() {
    // The database lives exactly as long as its single connection.
    pool_options = pool_options
      .max_connections(1)
      .min_connections(1)
      .idle_timeout(None)
      .max_lifetime(None);
  } else {
    options = options.journal_mode(SqliteJournalMode::Wal);
  }

  let pool = pool_options.connect_with(options).await?;
  init_schema(&pool).await?;
  info!("Store ready.");
  Ok(pool)
}

/// Creates any missing table or index. Safe to call repeatedly.
pub async fn init_schema(pool: &SqlitePool) -> ShopResult<()> {
  for statement in schema::CREATE_ALL {
    sqlx::query(statement).execute(pool).await?;
  }
  Ok(())
}

/// Drops every table and recreates the empty schema.
#[instrument(name = "store::refresh", skip(pool), err(Display))]
pub async fn refresh(pool: &SqlitePool) -> ShopResult<()> {
  let mut tx = pool.begin().await?;
  for statement in schema::DROP_ALL {
    sqlx::query(statement).execute(&mut *tx).await?;
  }
  for statement in schema::CREATE_ALL {
    sqlx::query(statement).execute(&mut *tx).await?;
  }
  tx.commit().await?;
  info!("Store tables dropped and recreated.");
  Ok(())
}
