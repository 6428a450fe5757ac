//! HTTP front end for a streaming directed-graph executor.
//!
//! This crate is the "request pipeline": it turns an HTTP request into a
//! [`langgraph_core::graph::Graph::traverse`] call and streams the result
//! back to the caller as server-sent events. Everything task-tracking
//! related — status, cancellation — is delegated to
//! [`langgraph_core::kv::KvClient`]; this crate has no task model of its own.

pub mod api;
pub mod config;
pub mod graph_wiring;
pub mod version;

use thiserror::Error;

/// Errors that can occur during orchestration
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// General error, typically configuration or startup failures
    #[error("Orchestrator error: {0}")]
    General(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }
}
