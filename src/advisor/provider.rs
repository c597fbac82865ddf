// LLM text-completion provider used by the proxy

use crate::config::ProxyConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No provider API key configured")]
    MissingApiKey,
    #[error("Provider request failed")]
    Transport(#[source] reqwest::Error),
    #[error("Provider responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Provider returned no text")]
    EmptyResponse,
}

/// An opaque text-completion service
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Text of the first candidate, all parts joined
fn response_text(response: GenerateResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Google Generative Language API (`generateContent`)
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiProvider {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, model)
    }
}

#[async_trait]
impl TextCompletion for GeminiProvider {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        debug!(model, prompt_len = prompt.len(), "Calling provider");

        let response = self
            .http
            .post(self.url(model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(ProviderError::Transport)?;
        response_text(parsed).ok_or(ProviderError::EmptyResponse)
    }
}
