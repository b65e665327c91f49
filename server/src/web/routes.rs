// server/src/web/routes.rs

use actix_web::web;

use crate::state::AppState;
use crate::web::handlers::{auth_handlers, basket_handlers, product_handlers, recommendation_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "recommendations_enabled": app_state.config.gemini_api_key.is_some(),
  }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/signin", web::post().to(auth_handlers::signin_handler))
          .route("/signout", web::post().to(auth_handlers::signout_handler))
          .route("/session", web::get().to(auth_handlers::session_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          // Registered before `/{product_id}` so "search" is not read as an id.
          .route("/search", web::get().to(product_handlers::search_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(
        web::scope("/basket")
          .route("", web::get().to(basket_handlers::get_basket_handler))
          .route("/items", web::post().to(basket_handlers::add_item_handler))
          .route("/items/{product_id}", web::patch().to(basket_handlers::step_item_handler))
          .route("/items/{product_id}", web::delete().to(basket_handlers::remove_item_handler))
          .route("/checkout", web::post().to(basket_handlers::checkout_handler))
          .route(
            "/recommendations",
            web::get().to(recommendation_handlers::recommendations_handler),
          ),
      ),
  );
}
