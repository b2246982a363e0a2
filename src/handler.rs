//! The invocation envelope: decode, create, encode.
//!
//! [`handle`] is transport-agnostic; [`router`] exposes it over HTTP.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::store::SecretStore;
use crate::{batch, codec};

/// Shared state for the HTTP surface.
pub struct AppState {
    pub store: Arc<dyn SecretStore>,
    pub ops_per_sec: u32,
}

/// A whole-invocation failure. Per-item remote failures are not errors here;
/// they ride back inside the 200 body.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid request body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl IntoResponse for HandlerError {
    /// Decode failures are the client's fault, encode failures ours. The
    /// body is the raw error text in both cases.
    fn into_response(self) -> Response {
        let status = match self {
            HandlerError::Decode(_) => StatusCode::BAD_REQUEST,
            HandlerError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Runs one invocation: decode the batch, create every secret under the
/// rate limit, encode the index-aligned results.
///
/// A decode failure returns before any remote call is made.
pub async fn handle(
    store: &dyn SecretStore,
    ops_per_sec: u32,
    body: &str,
) -> Result<String, HandlerError> {
    let defs = codec::decode_batch(body).map_err(HandlerError::Decode)?;
    info!(count = defs.len(), "decoded secret batch");

    let results = batch::create_all(store, &defs, ops_per_sec).await;
    codec::encode_results(&results).map_err(HandlerError::Encode)
}

async fn create_secrets(State(state): State<Arc<AppState>>, body: String) -> Response {
    match handle(state.store.as_ref(), state.ops_per_sec, &body).await {
        Ok(encoded) => (StatusCode::OK, encoded).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Builds the HTTP surface: the batch-create endpoint plus a health probe.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/secrets", post(create_secrets))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
