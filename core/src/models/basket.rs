// core/src/models/basket.rs

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a basket row. `Pending -> Checked` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketStatus {
  Pending,
  Checked,
}

impl BasketStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      BasketStatus::Pending => "pending",
      BasketStatus::Checked => "checked",
    }
  }
}

impl fmt::Display for BasketStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown basket status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for BasketStatus {
  type Err = UnknownStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(BasketStatus::Pending),
      "checked" => Ok(BasketStatus::Checked),
      other => Err(UnknownStatus(other.to_string())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
  pub id: i64,
  pub user_id: i64,
  pub status: BasketStatus,
}

impl Basket {
  /// An unsaved pending basket for `user_id`.
  pub fn pending_for(user_id: i64) -> Self {
    Self {
      id: 0,
      user_id,
      status: BasketStatus::Pending,
    }
  }

  pub fn is_pending(&self) -> bool {
    self.status == BasketStatus::Pending
  }
}

impl<'r> FromRow<'r, SqliteRow> for Basket {
  fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
    let raw_status: String = row.try_get("status")?;
    let status = raw_status.parse::<BasketStatus>().map_err(|e| sqlx::Error::ColumnDecode {
      index: "status".to_string(),
      source: Box::new(e),
    })?;
    Ok(Self {
      id: row.try_get("id")?,
      user_id: row.try_get("user_id")?,
      status,
    })
  }
}
