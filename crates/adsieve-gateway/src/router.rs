//! Axum router wiring.
//!
//! Exposes the intercept hook, list management, and ops endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::config::schema::MAX_PAYLOAD_CEILING;
use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/intercept", post(transport::http::intercept))
        .route("/v1/lists", get(transport::http::get_lists))
        .route("/v1/lists/allow", post(transport::http::allow))
        .route("/v1/lists/deny", post(transport::http::deny))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_CEILING))
        .with_state(state)
}
