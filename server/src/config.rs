// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use farmersfirst::StoreConfig;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub checkout_attempts: u32,

  // Load the starter catalogue into an empty store on startup.
  pub seed_db: bool,

  // Where the signed-in session is kept between restarts.
  pub preferences_path: String,

  // Text completion. No key means recommendations are switched off.
  pub gemini_api_key: Option<String>,
  pub gemini_model: String,
  pub gemini_base_url: String,
}

fn parse_var<T>(name: &str, raw: String) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let or_default = |var_name: &str, default: &str| get_env(var_name).unwrap_or_else(|| default.to_string());

    let server_host = or_default("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var::<u16>("SERVER_PORT", or_default("SERVER_PORT", "8080"))?;
    let database_url = or_default("DATABASE_URL", "sqlite://farmers_first.db");
    let db_max_connections = parse_var::<u32>("DB_MAX_CONNECTIONS", or_default("DB_MAX_CONNECTIONS", "5"))?;
    let checkout_attempts = parse_var::<u32>("CHECKOUT_ATTEMPTS", or_default("CHECKOUT_ATTEMPTS", "3"))?;
    if db_max_connections == 0 || checkout_attempts == 0 {
      return Err(AppError::Config(
        "DB_MAX_CONNECTIONS and CHECKOUT_ATTEMPTS must be at least 1".to_string(),
      ));
    }
    let seed_db = parse_var::<bool>("SEED_DB", or_default("SEED_DB", "false"))?;
    let preferences_path = or_default("PREFERENCES_PATH", "farmers_first.prefs.json");

    let gemini_api_key = get_env("GEMINI_API_KEY");
    let gemini_model = or_default("GEMINI_MODEL", "gemini-pro");
    let gemini_base_url = or_default("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com");

    tracing::info!(
      recommendations_enabled = gemini_api_key.is_some(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      checkout_attempts,
      seed_db,
      preferences_path,
      gemini_api_key,
      gemini_model,
      gemini_base_url,
    })
  }

  pub fn store_config(&self) -> StoreConfig {
    StoreConfig {
      database_url: self.database_url.clone(),
      max_connections: self.db_max_connections,
      checkout_attempts: self.checkout_attempts,
      ..StoreConfig::default()
    }
  }
}
