// core/src/config.rs

//! Store settings shared by the server and the tests.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StoreConfig {
  /// `sqlite://path/to/file.db` or `sqlite::memory:`.
  pub database_url: String,
  pub max_connections: u32,
  /// How long a statement waits on a locked database before failing with SQLITE_BUSY.
  pub busy_timeout: Duration,
  /// Attempts made at the checkout transaction when the store reports contention.
  pub checkout_attempts: u32,
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      database_url: "sqlite://farmers_first.db".to_string(),
      max_connections: 5,
      busy_timeout: Duration::from_secs(5),
      checkout_attempts: 3,
    }
  }
}

impl StoreConfig {
  /// A private in-memory database. One connection only: every SQLite
  /// connection to `:memory:` would otherwise see its own empty database.
  pub fn in_memory() -> Self {
    Self {
      database_url: "sqlite::memory:".to_string(),
      max_connections: 1,
      ..Self::default()
    }
  }

  pub fn is_in_memory(&self) -> bool {
    self.database_url.contains(":memory:")
  }
}
