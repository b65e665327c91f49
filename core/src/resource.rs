// core/src/resource.rs

//! The loading / success / error contract consumers observe for every
//! domain-service call.

use futures_util::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;

/// One observable state of an in-flight call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum Resource<T> {
  Loading,
  Success(T),
  /// A human-readable message, rendered verbatim.
  Error(String),
}

impl<T> Resource<T> {
  pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Resource::Success(value),
      Err(err) => Resource::Error(err.to_string()),
    }
  }

  pub fn is_terminal(&self) -> bool {
    !matches!(self, Resource::Loading)
  }

  pub fn data(&self) -> Option<&T> {
    match self {
      Resource::Success(value) => Some(value),
      _ => None,
    }
  }

  pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resource<U> {
    match self {
      Resource::Loading => Resource::Loading,
      Resource::Success(value) => Resource::Success(f(value)),
      Resource::Error(message) => Resource::Error(message),
    }
  }
}

/// Emits `Loading`, then exactly one terminal state once `call` resolves.
///
/// Dropping the stream drops `call`, which is how a consumer cancels.
pub fn track<T, E, F>(call: F) -> BoxStream<'static, Resource<T>>
where
  T: Send + 'static,
  E: Display + Send + 'static,
  F: Future<Output = Result<T, E>> + Send + 'static,
{
  stream::once(async { Resource::Loading })
    .chain(stream::once(async move { Resource::from_result(call.await) }))
    .boxed()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ShopError;

  #[tokio::test]
  async fn success_follows_loading() {
    let states: Vec<_> = track(async { Ok::<_, ShopError>(vec![1, 2]) }).collect().await;
    assert_eq!(states, vec![Resource::Loading, Resource::Success(vec![1, 2])]);
  }

  #[tokio::test]
  async fn errors_become_messages() {
    let states: Vec<_> = track(async { Err::<(), _>(ShopError::validation("basket is empty")) })
      .collect()
      .await;
    assert_eq!(states.len(), 2);
    assert_eq!(states[1], Resource::Error("Validation failed: basket is empty".to_string()));
    assert!(states[1].is_terminal());
  }

  #[tokio::test]
  async fn empty_results_are_success_not_error() {
    let states: Vec<_> = track(async { Ok::<Vec<u8>, ShopError>(Vec::new()) }).collect().await;
    assert_eq!(states[1], Resource::Success(Vec::new()));
  }

  #[test]
  fn serializes_with_state_tag() {
    let json = serde_json::to_value(Resource::Success(3)).unwrap();
    assert_eq!(json, serde_json::json!({"state": "success", "data": 3}));
    let json = serde_json::to_value(Resource::<u8>::Loading).unwrap();
    assert_eq!(json, serde_json::json!({"state": "loading"}));
  }
}
