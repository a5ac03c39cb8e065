// Service metadata routes: API summary and health check

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service name reported by the health check
pub const SERVICE_NAME: &str = "ssedemo-api";

/// Paths of the streaming endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointIndex {
    pub basic_stream: String,
    pub llm_stream: String,
    pub progress_stream: String,
    pub post_stream: String,
}

/// GET / response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiSummary {
    pub message: String,
    pub version: String,
    pub endpoints: EndpointIndex,
    pub docs: String,
    pub health: String,
    pub demo: String,
}

/// GET /health response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// RFC 3339 time the check was answered
    pub timestamp: String,
    #[schema(example = "ssedemo-api")]
    pub service: String,
}

/// Create service routes; stream paths in the summary carry `api_prefix`
pub fn routes(api_prefix: &str) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(Arc::new(summary(api_prefix)))
}

fn summary(api_prefix: &str) -> ApiSummary {
    ApiSummary {
        message: "SSE Streaming Demo API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointIndex {
            basic_stream: format!("{}/stream", api_prefix),
            llm_stream: format!("{}/stream/llm", api_prefix),
            progress_stream: format!("{}/stream/progress/{{task_name}}", api_prefix),
            post_stream: format!("{}/stream/post", api_prefix),
        },
        docs: "/docs".to_string(),
        health: "/health".to_string(),
        demo: "/demo".to_string(),
    }
}

/// GET / - Summary of available endpoints
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API summary", body = ApiSummary)
    ),
    tag = "service"
)]
pub async fn root(State(summary): State<Arc<ApiSummary>>) -> Json<ApiSummary> {
    Json(summary.as_ref().clone())
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "service"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.to_string(),
    })
}
