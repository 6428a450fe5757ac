//! # langgraph-core — streaming graph executor for conversational reasoning agents
//!
//! `langgraph-core` is the runtime underneath a reasoning-agent HTTP pipeline:
//! given a directed graph of [`Node`](node::Node) implementations, it walks
//! that graph concurrently from a starting node, streaming each node's
//! results back to the caller as they are produced and stopping early on
//! either a node failure or a cooperative cancellation signal.
//!
//! It intentionally does *not* do what a general workflow engine does:
//! there is no checkpointing, no resumable state, no cycles, no
//! human-in-the-loop interrupt/resume protocol. A traversal runs once,
//! start to finish (or to first error, or to cancellation), and that is the
//! whole lifecycle. See `DESIGN.md` at the repository root for the full
//! rationale.
//!
//! ## Core pieces
//!
//! - [`graph::Graph`] — a node/edge index plus [`graph::Graph::traverse`],
//!   the concurrent depth-fan-out executor.
//! - [`node::Node`] — the trait every node implements: `process` (a lazy
//!   result stream), `get_successors` (fan-out), `check_for_continue`
//!   (cooperative cancellation).
//! - [`memory::Memory`] — traversal-scoped state copied independently on
//!   every fan-out, so sibling branches can never alias each other's writes.
//! - [`session::Session`] / [`session::SharedSession`] — request-scoped
//!   state threaded explicitly through [`node::NodeContext`], replacing the
//!   dynamically-scoped session variable the system this crate reimplements
//!   relies on.
//! - [`kv`] — the external key-value contract (task status, cancellation
//!   marker) a traversal and its surrounding request pipeline share.
//! - [`messages`] — chat message types and history utilities.
//! - [`tool`] — tool-call abstractions nodes use to invoke external actions.
//! - [`llm`] — the [`llm::ChatModel`] trait nodes use to call a language
//!   model.
//! - [`retry`] — retry policies for node implementations that wrap flaky
//!   calls.
//!
//! Concrete node business logic (tool-choice prompting, natural-language
//! conversion, customer-response generation, and the like) is deliberately
//! out of scope for this crate — see `langgraph-prebuilt` for illustrative
//! implementations. Swapping in different node logic should never require a
//! change here.

pub mod error;
pub mod graph;
pub mod kv;
pub mod llm;
pub mod memory;
pub mod messages;
pub mod node;
pub mod retry;
pub mod session;
pub mod tool;

pub use error::{GraphError, Result};
pub use graph::{Frame, Graph, DEFAULT_MAX_NODES};
pub use kv::{status, KvClient, KvError};
pub use memory::{Memory, ToolInvocation};
pub use messages::{
    add_message_likes, add_messages, convert_to_messages, filter_by_role, get_last_message,
    get_messages_by_id, merge_consecutive_messages, trim_messages, truncate_messages, ContentPart,
    Message, MessageContent, MessageLike, MessageRole, RemoveMessage, TrimOptions, TrimStrategy,
};
pub use node::{Node, NodeContext, NodeInput, NodeResult, NodeResultStream, Successor};
pub use retry::{RetryPolicy, RetryState};
pub use session::{SharedSession, Session};
pub use tool::{Tool, ToolCall, ToolCallResult, ToolError, ToolOutput, ToolRegistry, ToolResult, ToolRuntime};
