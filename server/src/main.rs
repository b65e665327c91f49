// server/src/main.rs

mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::services::GeminiClient;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use farmersfirst::repository::{CompletionClient, DisabledCompletion, FilePreferences};
use farmersfirst::seed::seed_catalogue;
use farmersfirst::{store, UserPreferences};
use std::io;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
  tracing::error!(error = %err, "{}", context);
  io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting FarmersFirst server...");

  let app_config = Arc::new(AppConfig::from_env().map_err(|e| startup_error("Failed to load configuration", e))?);

  let pool = store::connect(&app_config.store_config())
    .await
    .map_err(|e| startup_error("Failed to open the store", e))?;

  let prefs = FilePreferences::open(&app_config.preferences_path)
    .map_err(|e| startup_error("Failed to open the preference file", e))?;
  let prefs = UserPreferences::new(Arc::new(prefs));

  let completion: Arc<dyn CompletionClient> = match &app_config.gemini_api_key {
    Some(key) => Arc::new(
      GeminiClient::new(&app_config.gemini_base_url, &app_config.gemini_model, key)
        .map_err(|e| startup_error("Failed to build the completion client", e))?,
    ),
    None => {
      tracing::warn!("GEMINI_API_KEY not set, recommendations are disabled.");
      Arc::new(DisabledCompletion)
    }
  };

  let app_state = AppState::new(pool, app_config.clone(), prefs, completion);

  if app_config.seed_db {
    let inserted = seed_catalogue(&app_state.products)
      .await
      .map_err(|e| startup_error("Failed to seed the catalogue", e))?;
    tracing::info!(inserted, "Catalogue seed finished.");
  }

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
