// server/src/services/identity.rs

//! Identity assertions carried in a sign-in request body.

use async_trait::async_trait;
use farmersfirst::repository::{Identity, IdentityError, IdentityProvider};

/// Vouches for whatever the request asserted. With no assertion it knows no account.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
  asserted: Option<Identity>,
}

impl RequestIdentity {
  pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      asserted: Some(Identity {
        email: email.into(),
        token: token.into(),
      }),
    }
  }

  pub fn anonymous() -> Self {
    Self::default()
  }
}

#[async_trait]
impl IdentityProvider for RequestIdentity {
  async fn sign_in(&self, _filter_by_authorized_accounts: bool) -> Result<Identity, IdentityError> {
    match &self.asserted {
      Some(identity) if !identity.token.trim().is_empty() => Ok(identity.clone()),
      _ => Err(IdentityError::NoCredential),
    }
  }
}
