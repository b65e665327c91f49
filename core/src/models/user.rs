// core/src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A shopper. Created on first sign-in; the email is unique across the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
  pub id: i64,
  #[sqlx(rename = "email_address")]
  pub email: String,
}

impl User {
  /// An unsaved user; `id` is assigned by the store on create.
  pub fn new(email: impl Into<String>) -> Self {
    Self {
      id: 0,
      email: email.into(),
    }
  }
}
