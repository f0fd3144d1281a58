use crate::config::{AppState, ServerConfig};
use anyhow::Result;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

mod handlers;
mod mcp;
mod prompt;

/// Start the API server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
fn create_router(state: AppState) -> Router {
    Router::new()
        // MCP endpoint
        .route(
            "/mcp",
            post(mcp::handle_mcp)
                .get(mcp::method_not_allowed)
                .delete(mcp::method_not_allowed),
        )
        // Service routes
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/prompt", get(prompt::usage_prompt))
        // REST mirrors
        .route("/classes", get(handlers::list_classes))
        .route("/classes/{name}", get(handlers::get_class))
        .route("/docs", get(handlers::list_docs))
        .route("/docs/search", post(handlers::search_docs))
        .route("/docs/{slug}", get(handlers::get_doc))
        .route("/rules", get(handlers::list_rules))
        .route("/rules/checklist", get(handlers::get_checklist))
        .route("/patterns", get(handlers::list_patterns))
        .route("/patterns/{type}", get(handlers::get_pattern))
        .route("/context", post(handlers::build_context))
        .route("/validate", post(handlers::validate_code))
        .fallback(not_found)
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Service information
async fn service_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tools: Vec<&str> = state
        .mcp
        .registry()
        .list_schemas()
        .into_iter()
        .map(|schema| schema.name)
        .collect();

    Json(serde_json::json!({
        "service": "Malgn Framework MCP Server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "mcp": "POST /mcp",
        "tools": tools,
    }))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not Found",
            "path": uri.path(),
        })),
    )
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Custom error type for API handlers
pub struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_msg = self.error.to_string();
        let details = self
            .error
            .chain()
            .skip(1)
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(": ");

        let response = if details.is_empty() {
            ErrorResponse::new(error_msg)
        } else {
            ErrorResponse::with_details(error_msg, details)
        };

        if self.status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.error);
        }

        (self.status, Json(response)).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
