//! The node abstraction: the unit of work in a traversal.
//!
//! A node is identified by a string `id`, unique within its [`crate::graph::Graph`].
//! It exposes three operations described in full in the module-level docs of
//! `graph.rs`: `process` (a lazy result stream), `get_successors` (fan-out),
//! and `check_for_continue` (cooperative cancellation check). Concrete node
//! business logic — tool-choice prompting, natural-language conversion,
//! customer-response generation, and the like — lives outside this crate in
//! `langgraph-prebuilt`; this module only defines the capability every node
//! must implement.

use crate::error::Result;
use crate::kv::KvClient;
use crate::memory::Memory;
use crate::messages::Message;
use crate::session::SharedSession;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// The per-activation payload a node receives alongside the conversation.
///
/// Carries `memory` (copied independently per fan-out, see [`crate::memory`])
/// plus whatever extra fields a particular node family needs (e.g. `tool` and
/// `parameters` for an execute-tool activation). Kept as a flattened JSON map
/// so node implementations outside this crate can add fields without a core
/// change — exactly the polymorphism problem called out in the
/// specification's design notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInput {
    #[serde(default)]
    pub memory: Memory,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl NodeInput {
    pub fn new(memory: Memory) -> Self {
        Self {
            memory,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// One result produced by a node's `process` stream.
///
/// `node` is required; `output`, `reason`, and `memory` are the recommended
/// keys the specification names. `memory` defaults to empty rather than
/// `Option` because every node that wants successors to see a tool-output
/// cache must populate it explicitly — there is no meaningful "missing"
/// state distinct from "empty".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeResult {
    pub node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub memory: Memory,
}

impl NodeResult {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            ..Default::default()
        }
    }

    pub fn with_output(mut self, output: impl Into<Value>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_memory(mut self, memory: Memory) -> Self {
        self.memory = memory;
        self
    }
}

/// Context threaded into every node activation.
///
/// This is the redesign the specification's design notes call for: rather
/// than a dynamically-scoped `session` variable, the session (along with the
/// task ID and KV client every node needs for `check_for_continue`) is an
/// explicit argument. `memory` is deliberately *not* here — it lives on
/// [`NodeInput`] because it is per-activation, not per-traversal.
#[derive(Clone)]
pub struct NodeContext {
    pub task_id: String,
    pub kv: Arc<dyn KvClient>,
    pub session: SharedSession,
}

impl NodeContext {
    pub fn new(task_id: impl Into<String>, kv: Arc<dyn KvClient>, session: SharedSession) -> Self {
        Self {
            task_id: task_id.into(),
            kv,
            session,
        }
    }
}

/// A stream of results a node yields from one `process` call.
///
/// Per the specification's design notes, a lazy sequence may be realized as a
/// channel, a callback, or — for nodes known to produce exactly one result —
/// a single-item stream. `futures::stream::once` covers the common case
/// cheaply; nodes that genuinely stream (e.g. token-by-token LLM output)
/// build a real channel-backed stream instead.
pub type NodeResultStream = BoxStream<'static, Result<NodeResult>>;

/// One fan-out target: the successor's identifier and the input it receives.
pub type Successor = (String, NodeInput);

/// The unit of work in a traversal.
///
/// Implementations must be `Send + Sync`: a single `Arc<dyn Node>` is shared
/// across every concurrent activation the executor launches for that node
/// identifier.
#[async_trait]
pub trait Node: Send + Sync {
    /// This node's identifier, unique within its graph.
    fn id(&self) -> &str;

    /// Produce a lazy sequence of results for one activation.
    ///
    /// May yield zero, one, or many results. The executor enqueues every
    /// result it sees and remembers the *last* one as input to
    /// `get_successors`. A `Result::Err` item (or an error returned from the
    /// stream-producing future itself) is treated as a node failure: the
    /// executor converts it to a single `{error: ...}` frame and terminates
    /// the traversal.
    async fn process(&self, ctx: &NodeContext, messages: &[Message], input: NodeInput) -> NodeResultStream;

    /// Given the last result this activation produced, name the successors
    /// to fan out to. An empty vector marks this path terminal.
    async fn get_successors(&self, last_result: &NodeResult) -> Vec<Successor>;

    /// Cooperative cancellation check, run after `process` completes and
    /// before `get_successors` is consulted. The default implementation
    /// polls the KV client for the `cancelled` marker; nodes rarely need to
    /// override this.
    async fn check_for_continue(&self, ctx: &NodeContext) -> bool {
        !ctx.kv.is_cancelled(&ctx.task_id).await.unwrap_or(false)
    }
}

/// Wrap a single result as a one-item [`NodeResultStream`] — the common case
/// for nodes that make one LLM call and yield once.
pub fn single_result(result: Result<NodeResult>) -> NodeResultStream {
    Box::pin(futures::stream::once(async move { result }))
}
