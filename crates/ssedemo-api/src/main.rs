// SSE Streaming Demo API server
// Decision: Each streaming request owns its generator; nothing is shared between streams
// Decision: Configuration comes from the environment (optionally a .env file)

mod config;
mod demo;
mod service;
mod sse;
mod streams;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use ssedemo_core::{
    ChatRequest, ChunkMetadata, CompletionNotice, EchoChunk, EchoComplete, EchoFailure,
    GenerationChunk, ProgressUpdate, StreamMessage, TaskStatus,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::ServerConfig;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        service::root,
        service::health,
        demo::demo_page,
        streams::basic_stream,
        streams::llm_stream,
        streams::task_progress_stream,
        streams::post_stream,
    ),
    components(
        schemas(
            service::ApiSummary, service::EndpointIndex, service::HealthResponse,
            StreamMessage, GenerationChunk, ChunkMetadata,
            ProgressUpdate, TaskStatus, CompletionNotice,
            ChatRequest, EchoChunk, EchoComplete, EchoFailure,
        )
    ),
    tags(
        (name = "service", description = "Service metadata endpoints"),
        (name = "streams", description = "Event streaming endpoints (SSE)")
    ),
    info(
        title = "SSE Streaming Demo API",
        version = "0.1.0",
        description = "Demonstration endpoints streaming Server-Sent Events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ssedemo_api=debug,ssedemo_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ssedemo-api starting...");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        counter_interval = ?config.streams.counter_interval,
        chunk_interval = ?config.streams.chunk_interval,
        progress_interval = ?config.streams.progress_interval,
        echo_interval = ?config.streams.echo_interval,
        "Stream pacing configured"
    );

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    if config.cors_origins.is_empty() {
        tracing::info!("CORS allows any origin");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let app = build_app(&config);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("ssedemo-api stopped");
    Ok(())
}

/// Assemble every route and layer
fn build_app(config: &ServerConfig) -> Router {
    let api_routes = streams::routes(streams::AppState::new(config.streams.clone()));

    // Health, docs, and the demo page are never prefixed
    let app = Router::new()
        .merge(service::routes(&config.api_prefix))
        .merge(demo::routes(&config.api_prefix))
        .merge(build_router_with_prefix(api_routes, &config.api_prefix))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    app.layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

/// CORS for the demo client; any origin unless a list is configured
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
