// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset.

use async_trait::async_trait;
use farmersfirst::models::{Product, User};
use farmersfirst::repository::{CompletionClient, Identity, IdentityError, IdentityProvider};
use farmersfirst::store::{self, Accessor};
use farmersfirst::StoreConfig;
use parking_lot::Mutex;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Stores ---
pub async fn memory_pool() -> SqlitePool {
  setup_tracing();
  store::connect(&StoreConfig::in_memory())
    .await
    .expect("in-memory store should open")
}

pub async fn file_pool(path: &std::path::Path, max_connections: u32) -> SqlitePool {
  setup_tracing();
  let config = StoreConfig {
    database_url: format!("sqlite://{}", path.display()),
    max_connections,
    ..StoreConfig::default()
  };
  store::connect(&config).await.expect("file store should open")
}

// --- Fixtures ---
pub async fn insert_user(pool: &SqlitePool, email: &str) -> User {
  Accessor::<User>::new(pool.clone())
    .create(User::new(email))
    .await
    .expect("user insert")
}

pub async fn insert_product(pool: &SqlitePool, name: &str, stock: i64, price_cents: i64) -> Product {
  Accessor::<Product>::new(pool.clone())
    .create(Product::new(name, format!("{name} for the farm"), stock, price_cents, ""))
    .await
    .expect("product insert")
}

// --- Collaborator fakes ---

/// Replies with queued answers in order; errors once the queue is empty.
#[derive(Default)]
pub struct ScriptedCompletion {
  replies: Mutex<VecDeque<anyhow::Result<String>>>,
  pub prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
  pub fn replying(reply: &str) -> Arc<Self> {
    let fake = Self::default();
    fake.replies.lock().push_back(Ok(reply.to_string()));
    Arc::new(fake)
  }

  pub fn failing(message: &str) -> Arc<Self> {
    let fake = Self::default();
    fake.replies.lock().push_back(Err(anyhow::anyhow!(message.to_string())));
    Arc::new(fake)
  }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
  async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
    self.prompts.lock().push(prompt.to_string());
    self
      .replies
      .lock()
      .pop_front()
      .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply left")))
  }
}

/// Knows one account, optionally hidden behind the authorized-accounts filter.
pub struct FakeIdentity {
  pub identity: Identity,
  pub only_unfiltered: bool,
  pub calls: AtomicUsize,
}

impl FakeIdentity {
  pub fn new(email: &str, token: &str, only_unfiltered: bool) -> Arc<Self> {
    Arc::new(Self {
      identity: Identity {
        email: email.to_string(),
        token: token.to_string(),
      },
      only_unfiltered,
      calls: AtomicUsize::new(0),
    })
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
  async fn sign_in(&self, filter_by_authorized_accounts: bool) -> Result<Identity, IdentityError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if filter_by_authorized_accounts && self.only_unfiltered {
      return Err(IdentityError::NoCredential);
    }
    Ok(self.identity.clone())
  }
}

/// Never finds an account.
pub struct NoAccounts {
  pub calls: AtomicUsize,
}

#[async_trait]
impl IdentityProvider for NoAccounts {
  async fn sign_in(&self, _filter: bool) -> Result<Identity, IdentityError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(IdentityError::NoCredential)
  }
}
