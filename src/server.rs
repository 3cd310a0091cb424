use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, info, warn};

use crate::bridge::BridgeOrchestrator;
use crate::error::BridgeError;
use crate::planner::TripInput;

pub const GENERATE_PATH: &str = "/generate-travel";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Wire form of every failure: 500 with `{"error": message}`.
pub struct AppError {
    message: String,
}

impl From<BridgeError> for AppError {
    fn from(error: BridgeError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<BridgeOrchestrator>,
}

pub fn build_router(orchestrator: Arc<BridgeOrchestrator>) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate_travel).options(preflight))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(AppState { orchestrator })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(orchestrator: Arc<BridgeOrchestrator>, bind: &str, port: u16) -> Result<()> {
    let app = build_router(orchestrator);
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {bind}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("trip-planner listening on http://{addr}{GENERATE_PATH}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;
    info!("trip-planner shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl+C, shutting down");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn generate_travel(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let input: TripInput = serde_json::from_slice(&body).map_err(|err| {
        BridgeError::Unexpected(format!("Invalid request body: {err}"))
    })?;

    // Dropping this future (client went away) drops the in-flight call with it.
    let run = state
        .orchestrator
        .run(input, CancellationToken::new())
        .await;
    debug!(events = ?run.events, "generate-travel: run finished");
    if let Some(stage) = run.outcome.failed_stage() {
        debug!(stage = %stage, "generate-travel: answering with error");
    }
    let plan = run.into_result()?;
    Ok(Json(plan).into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
