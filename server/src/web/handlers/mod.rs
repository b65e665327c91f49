// server/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod basket_handlers;
pub mod product_handlers;
pub mod recommendation_handlers;

use crate::errors::AppError;
use actix_web::{FromRequest, HttpRequest};
use tracing::warn;

pub const USER_HEADER: &str = "X-User-ID";

/// The caller, as named by the `X-User-ID` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let user_id = req
      .headers()
      .get(USER_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|raw| raw.trim().parse::<i64>().ok())
      .filter(|id| *id > 0);

    match user_id {
      Some(user_id) => futures_util::future::ready(Ok(AuthenticatedUser { user_id })),
      None => {
        warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
        futures_util::future::ready(Err(AppError::Auth(
          "Missing or invalid X-User-ID header.".to_string(),
        )))
      }
    }
  }
}
