// core/src/repository/preferences.rs

//! Key/value session storage: who is signed in on this install.

use crate::error::{ShopError, ShopResult};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, instrument};

const USER_TOKEN: &str = "user_token";
const USER_ID: &str = "user_id";

pub trait PreferenceStore: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str) -> ShopResult<()>;
  fn remove(&self, key: &str) -> ShopResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferences {
  values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferences {
  pub fn new() -> Self {
    Self::default()
  }
}

impl PreferenceStore for MemoryPreferences {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) -> ShopResult<()> {
    self.values.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> ShopResult<()> {
    self.values.lock().remove(key);
    Ok(())
  }
}

/// A JSON object on disk, rewritten in full on every change.
#[derive(Debug)]
pub struct FilePreferences {
  path: PathBuf,
  values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferences {
  /// Loads `path` if it exists; a missing file starts empty.
  pub fn open(path: impl AsRef<Path>) -> ShopResult<Self> {
    let path = path.as_ref().to_path_buf();
    let values = if path.exists() {
      let raw = fs::read_to_string(&path)?;
      serde_json::from_str(&raw).map_err(std::io::Error::from)?
    } else {
      BTreeMap::new()
    };
    debug!(path = %path.display(), "Preferences loaded.");
    Ok(Self {
      path,
      values: Mutex::new(values),
    })
  }

  fn temp_path(&self) -> PathBuf {
    self.path.with_extension("json.tmp")
  }

  /// Writes a sibling temp file and renames it over `path`, so a reader
  /// sees either the old object or the new one.
  fn persist(&self, values: &BTreeMap<String, String>) -> ShopResult<()> {
    let raw = serde_json::to_string_pretty(values).map_err(std::io::Error::from)?;
    let temp_path = self.temp_path();
    fs::write(&temp_path, raw)?;
    fs::rename(&temp_path, &self.path)?;
    Ok(())
  }
}

impl PreferenceStore for FilePreferences {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) -> ShopResult<()> {
    let mut values = self.values.lock();
    values.insert(key.to_string(), value.to_string());
    self.persist(&values)
  }

  fn remove(&self, key: &str) -> ShopResult<()> {
    let mut values = self.values.lock();
    if values.remove(key).is_some() {
      self.persist(&values)?;
    }
    Ok(())
  }
}

/// The signed-in user's token and id.
#[derive(Clone)]
pub struct UserPreferences {
  store: Arc<dyn PreferenceStore>,
}

impl UserPreferences {
  pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
    Self { store }
  }

  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryPreferences::new()))
  }

  #[instrument(name = "prefs::add_user", skip(self, token), err(Display))]
  pub fn add_user_to_store(&self, token: &str, user_id: i64) -> ShopResult<()> {
    self.store.set(USER_TOKEN, token)?;
    self.store.set(USER_ID, &user_id.to_string())
  }

  #[instrument(name = "prefs::remove_user", skip(self), err(Display))]
  pub fn remove_user_from_store(&self) -> ShopResult<()> {
    self.store.remove(USER_TOKEN)?;
    self.store.remove(USER_ID)
  }

  pub fn fetch_token(&self) -> ShopResult<String> {
    self
      .store
      .get(USER_TOKEN)
      .ok_or_else(|| ShopError::not_found("Preference", USER_TOKEN))
  }

  pub fn fetch_id(&self) -> ShopResult<i64> {
    let raw = self
      .store
      .get(USER_ID)
      .ok_or_else(|| ShopError::not_found("Preference", USER_ID))?;
    raw
      .parse()
      .map_err(|_| ShopError::validation(format!("stored user id {raw:?} is not a number")))
  }
}
