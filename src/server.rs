//! HTTP proxy between the advisor client and the LLM provider

use crate::advisor::{build_prompt, TextCompletion};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Proxy state
pub struct ProxyState {
    pub provider: Arc<dyn TextCompletion>,
    pub model: String,
}

/// Create the proxy router
pub fn create_router(state: Arc<ProxyState>) -> Router {
    Router::new()
        .route("/api/getChartType", post(get_chart_type))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: SocketAddr, state: Arc<ProxyState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, model = %state.model, "Chart-type proxy listening");
    axum::serve(listener, create_router(state))
        .await
        .context("Server error")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn internal_error() -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// JSON values that do not count as a dataset
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Chart-type suggestion endpoint
async fn get_chart_type(State(state): State<Arc<ProxyState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) => {
            error!("Error fetching chart type: request body is null");
            return internal_error();
        }
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Error fetching chart type: invalid request body");
            return internal_error();
        }
    };

    let dataset = match payload.get("dataset") {
        Some(dataset) if !is_falsy(dataset) => dataset,
        _ => return error_response(StatusCode::BAD_REQUEST, "No dataset provided"),
    };

    let prompt = build_prompt(dataset);
    match state.provider.complete(&state.model, &prompt).await {
        Ok(chart_type) => Json(json!({ "chartType": chart_type })).into_response(),
        Err(e) => {
            error!(error = %e, "Error fetching chart type");
            internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::ProviderError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct MockProvider {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl MockProvider {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextCompletion for MockProvider {
        async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
            self.prompts
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            self.reply.clone().map_err(|_| ProviderError::EmptyResponse)
        }
    }

    fn router(provider: Arc<MockProvider>) -> Router {
        create_router(Arc::new(ProxyState {
            provider,
            model: "gemini-2.0-flash".to_string(),
        }))
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/getChartType")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_dataset_is_400() {
        let provider = MockProvider::answering("Bar");
        let (status, body) = post_json(router(provider.clone()), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No dataset provided" }));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_falsy_dataset_is_400() {
        for body in [
            r#"{"dataset": null}"#,
            r#"{"dataset": ""}"#,
            r#"{"dataset": 0}"#,
            r#"{"dataset": false}"#,
        ] {
            let (status, _) = post_json(router(MockProvider::answering("Bar")), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        }
    }

    #[tokio::test]
    async fn test_valid_dataset_returns_provider_text() {
        let provider = MockProvider::answering("Bar");
        let (status, body) = post_json(
            router(provider.clone()),
            r#"{"dataset":[{"name":"A","score":10},{"name":"B","score":5}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "chartType": "Bar" }));

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, "gemini-2.0-flash");
        assert!(prompts[0]
            .1
            .starts_with(r#"Given the dataset: [{"name":"A","score":10},{"name":"B","score":5}],"#));
    }

    #[tokio::test]
    async fn test_provider_text_is_not_validated() {
        let (status, body) = post_json(
            router(MockProvider::answering("Histogram\n")),
            r#"{"dataset":[{"a":1}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "chartType": "Histogram\n" }));
    }

    #[tokio::test]
    async fn test_empty_array_counts_as_dataset() {
        let (status, _) =
            post_json(router(MockProvider::answering("Bar")), r#"{"dataset":[]}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_provider_failure_is_500() {
        let (status, body) =
            post_json(router(MockProvider::failing()), r#"{"dataset":[{"a":1}]}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let (status, body) = post_json(router(MockProvider::answering("Bar")), "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal Server Error" }));
    }
}
