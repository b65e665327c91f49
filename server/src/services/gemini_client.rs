// server/src/services/gemini_client.rs

//! `CompletionClient` over the Gemini `generateContent` REST endpoint.

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use farmersfirst::repository::CompletionClient;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct GenerateRequest<'a> {
  contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
  parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
  text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

pub struct GeminiClient {
  client: Client,
  base_url: String,
  model: String,
  api_key: String,
}

impl GeminiClient {
  pub fn new(base_url: &str, model: &str, api_key: &str) -> anyhow::Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("building HTTP client")?;
    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
      model: model.to_string(),
      api_key: api_key.to_string(),
    })
  }

  fn endpoint(&self) -> String {
    format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
  }
}

#[async_trait]
impl CompletionClient for GeminiClient {
  #[instrument(name = "gemini::generate", skip(self, prompt), fields(model = %self.model), err(Display))]
  async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
    let request = GenerateRequest {
      contents: [RequestContent {
        parts: [RequestPart { text: prompt }],
      }],
    };

    let response = self
      .client
      .post(self.endpoint())
      .query(&[("key", self.api_key.as_str())])
      .json(&request)
      .send()
      .await
      .context("completion request failed")?;

    let status = response.status();
    if !status.is_success() {
      bail!("completion endpoint returned {}", status);
    }

    let body: GenerateResponse = response.json().await.context("unreadable completion response")?;
    let text = body
      .candidates
      .into_iter()
      .next()
      .and_then(|candidate| candidate.content)
      .and_then(|content| content.parts.into_iter().next())
      .and_then(|part| part.text)
      .filter(|text| !text.trim().is_empty())
      .ok_or_else(|| anyhow!("completion response carried no text"))?;

    debug!(reply_len = text.len(), "Completion received.");
    Ok(text)
  }
}
