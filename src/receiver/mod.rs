//! HTTP receiver service.
//!
//! # Responsibilities
//! - Accept `POST /process`, extract the propagation carrier from the
//!   request headers, and echo the observed baggage in the response
//! - Serve `GET /health`
//! - Shape the error surface: 404 `{"error":"Not found"}` for unmatched
//!   routes, 500 `{"error":"Internal server error"}` for handler failures

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::message::{ProcessRequest, ProcessResponse};
use crate::propagation::{self, Carrier};

/// Handler failure mapped to the service's 500 body shape.
struct InternalError;

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Internal server error"})),
        )
            .into_response()
    }
}

/// Build the receiver router. Exposed separately from [`run`] so tests
/// can serve it on an ephemeral port.
pub fn build_router() -> Router {
    Router::new()
        .route("/process", post(process_handler))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

/// Run the receiver until shutdown (Ctrl+C).
pub async fn run(listen_addr: &str) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(listen_addr).await?;
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Receiver listening");

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Receiver stopped");
    Ok(())
}

async fn process_handler(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProcessResponse>, InternalError> {
    let request: ProcessRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse /process body");
        InternalError
    })?;

    let context = propagation::decode(&extract_carrier(&headers));
    tracing::info!(
        message_id = request.message_id,
        baggage = ?context.baggage(),
        "Processing request with propagated baggage"
    );

    Ok(Json(ProcessResponse {
        success: true,
        message_id: request.message_id,
        processed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        baggage_received: context.baggage().clone(),
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not found"}))).into_response()
}

/// Extract a carrier from HTTP request headers. Values that are not
/// valid UTF-8 are skipped.
fn extract_carrier(headers: &HeaderMap) -> Carrier {
    let mut carrier = Carrier::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            carrier.insert(name.as_str().to_string(), value.to_string());
        }
    }
    carrier
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn carrier_extraction_keeps_all_string_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("baggage-user.id", HeaderValue::from_static("user-1001"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let carrier = extract_carrier(&headers);
        assert_eq!(
            carrier.get("baggage-user.id").map(String::as_str),
            Some("user-1001")
        );
        // unknown keys stay in the carrier; the codec ignores them
        assert!(carrier.contains_key("content-type"));
    }

    #[test]
    fn non_utf8_header_values_are_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "baggage-bin",
            HeaderValue::from_bytes(&[0xfe, 0xff]).unwrap(),
        );
        headers.insert("baggage-ok", HeaderValue::from_static("v"));

        let carrier = extract_carrier(&headers);
        assert_eq!(carrier.len(), 1);
        assert!(carrier.contains_key("baggage-ok"));
    }
}
