// server/src/web/handlers/recommendation_handlers.rs

use actix_web::http::header;
use actix_web::web::{self, Bytes};
use actix_web::HttpResponse;
use farmersfirst::{track, ShopError};
use futures_util::StreamExt;
use tracing::instrument;

use super::AuthenticatedUser;
use crate::state::AppState;

/// Streams the call's states as newline-delimited JSON: `loading`, then
/// `success` (possibly an empty list) or `error`.
#[instrument(name = "handler::recommendations", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn recommendations_handler(app_state: web::Data<AppState>, auth_user: AuthenticatedUser) -> HttpResponse {
  let baskets = app_state.baskets.clone();
  let recommender = app_state.recommender.clone();
  let user_id = auth_user.user_id;

  let states = track(async move {
    let lines = baskets.fetch_basket_lines(user_id).await?;
    Ok::<_, ShopError>(recommender.recommend_for_user(user_id, &lines).await)
  })
  .map(|state| {
    serde_json::to_vec(&state).map(|mut line| {
      line.push(b'\n');
      Bytes::from(line)
    })
  });

  HttpResponse::Ok()
    .insert_header((header::CONTENT_TYPE, "application/x-ndjson"))
    .streaming(states)
}

