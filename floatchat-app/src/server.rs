//! HTTP front for the profile generator.
//!
//! `GET /` reports health, `POST /query` returns a one-element array of
//! profiles, and `OPTIONS /query` answers browser preflight. Every response
//! carries permissive CORS headers.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use floatchat_core::pipeline::ProfileBuilder;
use floatchat_schemas::{
    api::{ErrorResponse, HealthStatus, PreflightStatus, QueryRequest},
    profile::ProfileRecord,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::AppConfig;

/// Any failure while answering a query. Rendered as `{"error": ...}` with 500.
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = format!("Query processing error: {}", self.0);
        error!("{}", message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error: message }),
        )
            .into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub default_query: Arc<str>,
}

impl AppState {
    pub fn new(default_query: &str) -> Self {
        Self {
            default_query: Arc::from(default_query),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/query", post(handle_query).options(preflight))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type,Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,PUT,POST,DELETE,OPTIONS"),
        ))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &AppConfig) -> Result<()> {
    let addr = config.bind_address();
    let app = router(AppState::new(&config.default_query));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🌊 FloatChat API listening on http://{}", addr);
    axum::serve(listener, app).await.context("Server stopped unexpectedly")?;
    Ok(())
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        message: "FloatChat API is running! 🌊".to_string(),
        status: "healthy".to_string(),
        version: "1.0".to_string(),
    })
}

async fn preflight() -> Json<PreflightStatus> {
    Json(PreflightStatus {
        status: "ok".to_string(),
    })
}

// The body is parsed by hand so that an empty body behaves like `{}`.
async fn handle_query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ProfileRecord>>, ServerError> {
    let request = parse_request(&body)?;
    let query = request.query_or(&state.default_query).to_string();
    info!("📊 Processing: {}", query);

    let profile = ProfileBuilder::new().with_query(query).build()?;
    info!(
        "✅ Returning profile with {} depth levels",
        profile.depth_levels.len()
    );
    Ok(Json(vec![profile.to_record()]))
}

fn parse_request(body: &[u8]) -> Result<QueryRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QueryRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| anyhow::anyhow!("invalid request body: {}", e))
}
