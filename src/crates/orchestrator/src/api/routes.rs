//! API route definitions
//!
//! Defines the full set of routes and wires them to the shared graph/KV
//! state every handler needs.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use langgraph_core::graph::Graph;
use langgraph_core::kv::KvClient;

use crate::api::{handlers, middleware::{cors_layer, logging_layer}};

/// Shared application state: the wired graph and the KV client backing
/// task status and cancellation.
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<Graph>,
    pub kv: Arc<dyn KvClient>,
}

/// Build the complete API router
pub fn create_router(graph: Arc<Graph>, kv: Arc<dyn KvClient>) -> Router {
    let app_state = AppState { graph, kv };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/run-reasoning-agent", post(handlers::run_reasoning_agent))
        .route("/cancel-reasoning-agent/:task_id", post(handlers::cancel_reasoning_agent))
        .layer(logging_layer())
        .layer(cors_layer())
        .with_state(app_state)
}
