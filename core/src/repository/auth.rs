// core/src/repository/auth.rs

//! Sign-in against an external identity provider, session kept in preferences.

use super::preferences::UserPreferences;
use crate::dao::{BasketDao, UserDao};
use crate::error::{ShopError, ShopResult};
use crate::models::User;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// What the provider vouches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub email: String,
  pub token: String,
}

#[derive(Debug, Error)]
pub enum IdentityError {
  /// No account matched the request. Worth retrying with a wider account filter.
  #[error("no credential available")]
  NoCredential,
  #[error("identity provider failed: {0}")]
  Failed(#[source] anyhow::Error),
}

impl From<IdentityError> for ShopError {
  fn from(err: IdentityError) -> Self {
    match err {
      IdentityError::NoCredential => ShopError::Unauthenticated(err.to_string()),
      IdentityError::Failed(source) => ShopError::UpstreamUnavailable { source },
    }
  }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
  /// `filter_by_authorized_accounts` restricts the lookup to accounts that
  /// already signed in on this install.
  async fn sign_in(&self, filter_by_authorized_accounts: bool) -> Result<Identity, IdentityError>;
}

#[derive(Clone)]
pub struct AuthService {
  users: UserDao,
  baskets: BasketDao,
  prefs: UserPreferences,
  provider: Arc<dyn IdentityProvider>,
}

impl AuthService {
  pub fn new(pool: SqlitePool, prefs: UserPreferences, provider: Arc<dyn IdentityProvider>) -> Self {
    Self {
      users: UserDao::new(pool.clone()),
      baskets: BasketDao::new(pool),
      prefs,
      provider,
    }
  }

  /// Same service, different provider. Used when every request carries its own assertion.
  pub fn with_provider(&self, provider: Arc<dyn IdentityProvider>) -> Self {
    Self {
      provider,
      ..self.clone()
    }
  }

  async fn identify(&self) -> ShopResult<Identity> {
    match self.provider.sign_in(true).await {
      Err(IdentityError::NoCredential) => {
        warn!("No authorized account, retrying with every account.");
        Ok(self.provider.sign_in(false).await?)
      }
      other => Ok(other?),
    }
  }

  /// Resolves the provider's identity to a user (created on first sign-in
  /// together with their first pending basket) and stores the session.
  /// Returns the user id.
  #[instrument(name = "auth::sign_in", skip(self), err(Display))]
  pub async fn sign_in_user(&self) -> ShopResult<i64> {
    let identity = self.identify().await?;
    let email = identity.email.trim();
    if email.is_empty() || !email.contains('@') {
      return Err(ShopError::validation(format!("{email:?} is not an email address")));
    }

    let user = match self.users.find_by_email(email).await? {
      Some(user) => user,
      None => {
        let user = self.users.create(User::new(email)).await?;
        let basket = self.baskets.open_pending(user.id).await?;
        info!(user_id = user.id, basket_id = basket.id, "New user registered.");
        user
      }
    };

    self.prefs.add_user_to_store(&identity.token, user.id)?;
    info!(user_id = user.id, "User signed in.");
    Ok(user.id)
  }

  #[instrument(name = "auth::sign_out", skip(self), err(Display))]
  pub async fn sign_out_user(&self) -> ShopResult<bool> {
    self.prefs.remove_user_from_store()?;
    Ok(true)
  }

  /// Signed in means a token is stored.
  pub async fn check_if_signed_in(&self) -> bool {
    self.prefs.fetch_token().is_ok()
  }

  pub fn preferences(&self) -> &UserPreferences {
    &self.prefs
  }
}
