//! HTTP server for form webhooks.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use notify::Notifier;
use serde_json::{json, Value};
use sheets::SpreadsheetApi;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::payload::parse_webhook;
use crate::pipeline::Relay;

/// Body of every accepted webhook response.
pub const ACKNOWLEDGEMENT: &str = "Данные получены";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Configuration.
    pub config: Arc<Config>,
    /// Spreadsheet API client.
    pub sheets: Arc<dyn SpreadsheetApi>,
    /// Chat notifier.
    pub notifier: Arc<Notifier>,
}

/// Build the HTTP router for the form relay.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook_handler))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handle an incoming form submission.
///
/// Unparseable bodies get `400`. Anything that parses is acknowledged with
/// `200`, and relay failures are only logged so the form does not resend.
async fn webhook_handler(State(state): State<AppState>, body: Bytes) -> (StatusCode, String) {
    debug!(bytes = body.len(), "Received form webhook");

    let submission = match parse_webhook(&body) {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "Rejected malformed webhook body");
            return (StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let relay = Relay::new(
        state.sheets.as_ref(),
        state.notifier.as_ref(),
        state.config.header_rows(),
    );

    match relay.process(&submission).await {
        Ok(outcome) => {
            info!(
                range = %outcome.written.range,
                notified = outcome.notified,
                "Submission relayed"
            );
        }
        Err(e) => {
            error!(error = %e, "Failed to relay submission");
        }
    }

    (StatusCode::OK, ACKNOWLEDGEMENT.to_string())
}
