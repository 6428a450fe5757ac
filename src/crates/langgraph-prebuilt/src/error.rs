//! Error types for the prebuilt node implementations.

use thiserror::Error;

/// Result type for prebuilt operations
pub type Result<T> = std::result::Result<T, PrebuiltError>;

/// Errors that can occur in a prebuilt node's own logic, before it becomes a
/// [`langgraph_core::GraphError`] at the `process` boundary.
#[derive(Error, Debug)]
pub enum PrebuiltError {
    /// The LLM's response could not be parsed as the JSON object a node expects.
    #[error("model response was not valid JSON for {node}: {error}")]
    MalformedJson { node: String, error: String },

    /// A tool invocation failed.
    #[error("tool execution failed: {0}")]
    ToolExecution(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying graph error.
    #[error("graph error: {0}")]
    Graph(#[from] langgraph_core::GraphError),
}

impl From<PrebuiltError> for langgraph_core::GraphError {
    fn from(err: PrebuiltError) -> Self {
        match err {
            PrebuiltError::Graph(e) => e,
            other => langgraph_core::GraphError::Execution(other.to_string()),
        }
    }
}
