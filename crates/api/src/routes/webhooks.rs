//! Webhook routes

use axum::{body::Bytes, extract::State, http::HeaderMap};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ApiResult;
use crate::state::AppState;
use github::{resolve_event_type, WebhookPayload};

const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";
/// Set by the Knative GitHub source; only read when the GitHub header is missing
const LEGACY_EVENT_TYPE_HEADER: &str = "ce-eventtype";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub async fn github(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<String> {
    let event_type = resolve_event_type(
        header_str(&headers, GITHUB_EVENT_HEADER),
        header_str(&headers, LEGACY_EVENT_TYPE_HEADER),
    )
    .ok_or_else(|| {
        warn!("Missing {} header", GITHUB_EVENT_HEADER);
        common::Error::MissingEventType
    })?;

    let payload = WebhookPayload::parse(&event_type, &body).map_err(|e| {
        warn!("Failed to parse {} webhook: {}", event_type, e);
        common::Error::MalformedPayload(e.to_string())
    })?;

    let payload_kind = payload.kind();
    let kind = state.event_handler.handle(payload).await.map_err(|e| {
        // Rejections of unknown kinds are already logged by the router
        if !e.is_client_error() {
            error!(
                "Failed to handle {} event: {}",
                payload_kind.map_or(event_type.as_str(), |k| k.as_str()),
                e
            );
        }
        e
    })?;

    info!("Successfully processed {} event", kind);
    Ok(format!("Handled {}", kind))
}
