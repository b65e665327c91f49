// server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::RequestIdentity;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct SigninRequestPayload {
  pub email: String,
  /// Identity token issued by the external provider.
  pub token: String,
}

// --- Handler Implementations ---

#[instrument(name = "handler::signin", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn signin_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SigninRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let provider = Arc::new(RequestIdentity::new(payload.email, payload.token));
  let user_id = app_state.auth.with_provider(provider).sign_in_user().await?;

  info!(user_id, "Signin successful.");
  Ok(HttpResponse::Ok().json(json!({
      "message": "Signed in.",
      "user_id": user_id,
  })))
}

#[instrument(name = "handler::signout", skip(app_state))]
pub async fn signout_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let signed_out = app_state.auth.sign_out_user().await?;
  Ok(HttpResponse::Ok().json(json!({ "signed_out": signed_out })))
}

pub async fn session_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let signed_in = app_state.auth.check_if_signed_in().await;
  let user_id = if signed_in {
    app_state.auth.preferences().fetch_id().ok()
  } else {
    None
  };
  Ok(HttpResponse::Ok().json(json!({ "signed_in": signed_in, "user_id": user_id })))
}
