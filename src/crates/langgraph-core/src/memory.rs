//! Traversal-scoped memory carried through a graph walk.
//!
//! `Memory` travels inside a node's input payload rather than alongside it —
//! nodes read `input["memory"]`, mutate it, and hand it to [`Graph::traverse`]
//! when they name successors. The one invariant that matters: when a node fans
//! out to more than one successor, each successor must receive a structurally
//! independent copy. A mutation made while processing successor B must never
//! be observable from successor A's view, even though both started from the
//! same parent memory.
//!
//! [`Graph::traverse`]: crate::graph::Graph::traverse

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in the tool-output cache: a record of a prior tool invocation,
/// threaded through the conversation so later nodes (routing, customer
/// response) can reference what has already been done without re-deriving it
/// from the raw message history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool: String,
    pub input: Value,
    pub output: Value,
    /// Human-readable summary used when synthesizing the "tools used" prose
    /// header over in the request pipeline's result formatter.
    pub description: String,
}

/// Transient, per-traversal state threaded through node inputs.
///
/// `Memory` is plain data — cloning it is a deep copy by construction, since
/// every field is itself owned data (no shared interior-mutable handles). This
/// makes the fan-out invariant trivial to uphold: `memory.clone()` per
/// successor is sufficient and is exactly what [`crate::graph::Graph::traverse`]
/// does before dispatching each successor's activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    #[serde(rename = "tool-output-cache", default)]
    pub tool_output_cache: Vec<ToolInvocation>,

    /// Set by a routing node when no tool has run yet, so a downstream node
    /// knows to narrate "working on it" to the customer before a tool result
    /// exists to describe.
    #[serde(rename = "task-description-to-customer", default, skip_serializing_if = "Option::is_none")]
    pub task_description_to_customer: Option<bool>,

    /// Catch-all for flags a specific node family needs that the core has no
    /// opinion about. Kept as JSON so node implementations outside this crate
    /// can extend memory without a core change.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_tool_invocation(&mut self, invocation: ToolInvocation) {
        self.tool_output_cache.push(invocation);
    }

    pub fn has_tool_output(&self) -> bool {
        !self.tool_output_cache.is_empty()
    }
}
