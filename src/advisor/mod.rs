//! Chart-type advisor: the client side that asks the proxy for a suggestion
//! and the provider side the proxy forwards prompts to.

pub mod client;
pub mod provider;

use crate::data::Dataset;
use async_trait::async_trait;
use thiserror::Error;

pub use client::AdvisorClient;
pub use provider::{GeminiProvider, ProviderError, TextCompletion};

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The proxy rejected the request because it carried no dataset
    #[error("No dataset provided")]
    MissingDataset,
    #[error("Advisor request failed")]
    Request(#[source] reqwest::Error),
    #[error("Advisor responded with status {status}: {message}")]
    Server { status: u16, message: String },
}

/// Anything that can name a chart type for a dataset
#[async_trait]
pub trait ChartAdvisor: Send + Sync {
    /// Returns the suggestion as free text, trimmed
    async fn suggest(&self, dataset: &Dataset) -> Result<String, AdvisorError>;
}

/// Advisor that always answers with the same chart type, used when the
/// caller already knows what to draw
#[derive(Debug, Clone)]
pub struct StaticAdvisor {
    answer: String,
}

impl StaticAdvisor {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl ChartAdvisor for StaticAdvisor {
    async fn suggest(&self, _dataset: &Dataset) -> Result<String, AdvisorError> {
        Ok(self.answer.trim().to_string())
    }
}

/// The instruction sent to the provider, with the dataset embedded as
/// compact JSON
pub fn build_prompt(dataset: &serde_json::Value) -> String {
    format!(
        "Given the dataset: {}, which type of chart (Bar, Line, Pie, Scatter, etc...) best represents this data? Respond with the chart type only.",
        dataset
    )
}
