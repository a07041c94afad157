//! API routes

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod health;
pub mod webhooks;

/// Webhook deliveries are accepted on `/`
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(webhooks::github))
        .route("/health", get(health::health))
        .with_state(state)
}
