// HTTP client for the chart-type proxy

use super::{AdvisorError, ChartAdvisor};
use crate::data::Dataset;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const CHART_TYPE_PATH: &str = "/api/getChartType";

#[derive(Serialize)]
struct SuggestRequest<'a> {
    dataset: &'a Dataset,
}

#[derive(Deserialize)]
struct SuggestResponse {
    #[serde(rename = "chartType")]
    chart_type: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts the dataset to a running proxy and reads back `{ chartType }`
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    http: reqwest::Client,
    url: String,
}

impl AdvisorClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), CHART_TYPE_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChartAdvisor for AdvisorClient {
    async fn suggest(&self, dataset: &Dataset) -> Result<String, AdvisorError> {
        debug!(url = %self.url, rows = dataset.len(), "Requesting chart suggestion");
        let response = self
            .http
            .post(&self.url)
            .json(&SuggestRequest { dataset })
            .send()
            .await
            .map_err(AdvisorError::Request)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(AdvisorError::MissingDataset);
        }
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            warn!(status = status.as_u16(), %message, "Advisor proxy returned an error");
            return Err(AdvisorError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: SuggestResponse = response.json().await.map_err(AdvisorError::Request)?;
        let suggestion = body.chart_type.trim().to_string();
        debug!(%suggestion, "Received chart suggestion");
        Ok(suggestion)
    }
}
