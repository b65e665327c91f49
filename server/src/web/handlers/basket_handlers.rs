// server/src/web/handlers/basket_handlers.rs

use actix_web::{web, HttpResponse};
use farmersfirst::models::{Basket, BasketItem};
use farmersfirst::repository::{aggregate_basket_products, basket_totals, StepDirection};
use farmersfirst::ShopError;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use super::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddItemPayload {
  pub product_id: i64,
  pub quantity: i64,
}

#[derive(Deserialize, Debug)]
pub struct StepPayload {
  pub direction: StepDirection,
}

fn basket_view(lines: &[BasketItem]) -> Result<serde_json::Value, AppError> {
  Ok(json!({
      "lines": lines,
      "totals": basket_totals(lines)?,
  }))
}

async fn line_for_product(app_state: &AppState, user_id: i64, product_id: i64) -> Result<BasketItem, AppError> {
  let lines = app_state.baskets.fetch_basket_lines(user_id).await?;
  lines
    .into_iter()
    .find(|line| line.product.id == product_id)
    .ok_or_else(|| AppError::from(ShopError::not_found("Basket line for product", product_id)))
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_basket", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_basket_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let lines = app_state.baskets.fetch_basket_lines(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(basket_view(&lines)?))
}

#[instrument(
    name = "handler::add_to_basket",
    skip(app_state, req_payload, auth_user),
    fields(user_id = auth_user.user_id, product_id = req_payload.product_id, quantity = req_payload.quantity)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddItemPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let rows = app_state
    .baskets
    .add_item_to_basket(
      auth_user.user_id,
      &Basket::pending_for(auth_user.user_id),
      req_payload.product_id,
      req_payload.quantity,
    )
    .await?;
  let lines = aggregate_basket_products(rows)?;
  info!(lines = lines.len(), "Item added.");
  Ok(HttpResponse::Created().json(basket_view(&lines)?))
}

#[instrument(name = "handler::step_item", skip(app_state, req_payload, auth_user, path), fields(user_id = auth_user.user_id))]
pub async fn step_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<StepPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let line = line_for_product(&app_state, auth_user.user_id, path.into_inner()).await?;
  let updated = app_state.baskets.step_basket_item(&line, req_payload.direction).await?;
  Ok(HttpResponse::Ok().json(json!({ "line": updated })))
}

#[instrument(name = "handler::remove_item", skip(app_state, auth_user, path), fields(user_id = auth_user.user_id))]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let line = line_for_product(&app_state, auth_user.user_id, path.into_inner()).await?;
  app_state.baskets.remove_item_from_basket(&line).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::checkout", skip(app_state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let receipt = app_state.baskets.checkout(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Checkout complete.",
      "receipt": receipt
  })))
}
