// server/src/services/mod.rs

//! Adapters for the shop's external collaborators.

pub mod gemini_client;
pub mod identity;

pub use gemini_client::GeminiClient;
pub use identity::RequestIdentity;
