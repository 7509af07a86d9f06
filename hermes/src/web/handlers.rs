//! Endpoint handlers.
//!
//! The event handler does the whole forwarding pipeline for one request:
//! 1. Count the request
//! 2. Read the body
//! 3. Publish it unchanged to the topic
//! 4. Map the outcome to a status code
//!
//! Counters and logs are always updated before the response is returned.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::classify::classify;
use crate::config::{Config, DEFAULT_MAX_BODY_BYTES};
use crate::metrics::Metrics;
use crate::publish::Publisher;
use crate::topic::TopicArn;

/// Body written with every failing response.
const ERROR_BODY: &str = "ERR";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub topic: Arc<TopicArn>,
    pub publisher: Arc<dyn Publisher>,
    pub metrics: Metrics,
    /// Log every body at debug level. Bodies are not redacted.
    pub debug: bool,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(topic: TopicArn, publisher: Arc<dyn Publisher>, metrics: Metrics) -> Self {
        Self {
            topic: Arc::new(topic),
            publisher,
            metrics,
            debug: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Apply the runtime switches from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.debug = config.debug;
        self.max_body_bytes = config.max_body_bytes;
        self
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Metrics
// =============================================================================

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.gather(),
    )
}

// =============================================================================
// Event
// =============================================================================

/// Event endpoint.
///
/// Responds 204 once the body is published, 500 or 502 when publishing
/// fails, and 400 when the body cannot be read. Nothing is retried.
pub async fn event(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    // Counts attempts, not successes.
    state.metrics.inc_received();

    let body = match body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(orig_err = %e, "could_not_read_request_body");
            state.metrics.inc_errored();
            return (StatusCode::BAD_REQUEST, ERROR_BODY).into_response();
        }
    };

    if state.debug {
        debug!(
            client = %client_ip(&headers, peer.as_ref()),
            body = %String::from_utf8_lossy(&body),
            "received_request"
        );
    }

    match state.publisher.publish(&state.topic, &body).await {
        Ok(ack) => {
            info!(
                body = %String::from_utf8_lossy(&body),
                message_id = ack.message_id.as_deref().unwrap_or(""),
                "successfully_forwarded_message"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(failure) => {
            let status = classify(&failure);
            state.metrics.inc_errored();
            (status, ERROR_BODY).into_response()
        }
    }
}

/// Best-effort client address: proxy headers first, then the TCP peer.
fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header_value("x-forwarded-for")
        .or_else(|| header_value("x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
