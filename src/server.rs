//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/advisories` | All stored enriched advisories |
//! | `POST` | `/advisories/process` | Run one ingestion invocation (`GET` also accepted) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "fetch_failed", "message": "upstream returned HTTP 503" } }
//! ```
//!
//! Error codes, all `500`: `fetch_failed`, `store_unavailable`,
//! `config_error`, `internal`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::{Config, ConfigError};
use crate::get::{list_advisories, AdvisoryList};
use crate::ingest::{run_ingest, InvocationError};

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Build the router without binding. Used by [`run_server`] and by tests.
pub fn router(config: &Config) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/advisories", get(handle_list))
        .route(
            "/advisories/process",
            get(handle_process).post(handle_process),
        )
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

/// Bind to `[server].bind` and serve until the process is terminated.
///
/// When `[server].refresh_interval_secs` is set, a background task also runs
/// one ingestion invocation per period.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    if let Some(secs) = config.server.refresh_interval_secs {
        tokio::spawn(refresh_loop(Arc::new(config.clone()), secs));
    }

    let app = router(config);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(bind = %config.server.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn refresh_loop(config: Arc<Config>, secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    loop {
        ticker.tick().await;
        // run_ingest logs every failure with error!; the next tick retries.
        let _ = run_ingest(&config).await;
    }
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn server_error(code: &'static str, message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code,
        message: message.into(),
    }
}

impl From<InvocationError> for AppError {
    fn from(err: InvocationError) -> Self {
        let code = match &err {
            InvocationError::Config(_) => "config_error",
            InvocationError::Fetch(_) => "fetch_failed",
            InvocationError::Store(_) => "store_unavailable",
        };
        server_error(code, err.to_string())
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /advisories ============

async fn handle_list(State(state): State<AppState>) -> Result<Json<AdvisoryList>, AppError> {
    list_advisories(&state.config).await.map(Json).map_err(|e| {
        error!(error = %format!("{:#}", e), "failed to read advisories");
        if e.is::<ConfigError>() {
            server_error("config_error", e.to_string())
        } else if e.chain().any(|cause| cause.is::<sqlx::Error>()) {
            server_error("store_unavailable", format!("{:#}", e))
        } else {
            server_error("internal", format!("{:#}", e))
        }
    })
}

// ============ POST /advisories/process ============

#[derive(Serialize)]
struct ProcessResponse {
    message: String,
}

async fn handle_process(State(state): State<AppState>) -> Result<Json<ProcessResponse>, AppError> {
    run_ingest(&state.config).await?;
    Ok(Json(ProcessResponse {
        message: "Advisories processed".to_string(),
    }))
}
