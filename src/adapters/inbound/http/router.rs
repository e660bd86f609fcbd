use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{health, replicate_object};
use crate::ports::services::ReplicationService;

/// Application state shared with every handler
#[derive(Clone)]
pub struct AppState {
    pub replication_service: Arc<dyn ReplicationService>,
}

impl AppState {
    pub fn new(replication_service: Arc<dyn ReplicationService>) -> Self {
        Self {
            replication_service,
        }
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/replicate", post(replicate_object))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
