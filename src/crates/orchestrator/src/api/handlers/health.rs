//! Health check endpoint handler
//!
//! Provides a liveness check for the API. There is no database to probe —
//! the server's only external dependency is the KV client, and a traversal
//! already surfaces KV failures per-request rather than through a side
//! channel, so this endpoint reports process liveness only.

use serde::{Deserialize, Serialize};

use crate::api::response;

/// Health check response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            version: crate::version().to_string(),
        }
    }
}

/// Handler for GET /health
pub async fn health() -> impl axum::response::IntoResponse {
    response::ok(HealthResponse::new("ok"))
}
