//! Graph container and the concurrent depth-fan-out executor.
//!
//! This module holds both the passive node/edge index and the executor,
//! because the executor's `traverse` is the one operation the graph exposes
//! beyond plain storage — splitting it into a separate file would only
//! separate two halves of one algorithm.
//!
//! # The algorithm
//!
//! `Graph::traverse` performs a *concurrent depth-fan-out* walk starting from
//! one node identifier:
//!
//! 1. A single MPSC result queue and a shared [`TraversalState`] (active-task
//!    counter, visited-node counter, visit cap) are created.
//! 2. One activation of the start node is spawned as a tokio task.
//! 3. Each activation: bumps `active_tasks`; checks the visit cap; runs the
//!    node's `process` stream, forwarding every result onto the queue and
//!    remembering the last one; polls `check_for_continue`; on `true`, asks
//!    the node for successors and spawns one activation per successor,
//!    awaiting all of them; decrements `active_tasks` on the way out.
//! 4. The consumer (this function's returned stream) drains the queue,
//!    forwarding every frame to the caller, and returns immediately on the
//!    first error frame — it does not wait for in-flight siblings.
//! 5. On a normal (non-error) drain, once every activation has finished the
//!    channel closes on its own (each activation holds one sender clone for
//!    its lifetime); the consumer then writes the terminal success status.
//!
//! Rust's channel-close semantics subsume the "done-signal set AND queue
//! empty" termination condition described in more primitive terms elsewhere
//! (an explicit done-flag plus polling) — `mpsc::Receiver::recv` already
//! returns `None` exactly when the last sender has dropped and the buffer is
//! drained, so no separate done-flag is needed for that path. An explicit
//! `active_tasks` counter is still kept as an independently observable
//! property, not merely an implementation detail.
//!
//! Status writes follow the asymmetric key layout documented in
//! [`crate::kv`]: `finished-with-success` / `finished-with-error` are written
//! under the bare task ID, never under the `task-<id>` cancellation key, on
//! every terminal path including a visit-cap breach.

use crate::kv::{status, KvClient};
use crate::messages::Message;
use crate::node::{Node, NodeContext, NodeInput, NodeResult, Successor};
use crate::session::SharedSession;
use async_stream::stream;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Default bound on total node activations per traversal.
pub const DEFAULT_MAX_NODES: usize = 40;

/// One unit the consumer receives from [`Graph::traverse`].
///
/// `Error` becomes the outbound `{"error": ...}` SSE frame; `Result` is
/// shaped into the full wire frame by the result formatter living in the
/// request pipeline, outside this crate's scope (see `DESIGN.md`).
#[derive(Debug, Clone)]
pub enum Frame {
    Result(NodeResult),
    Error(String),
}

/// Shared counters for one traversal. Mutated concurrently by every
/// in-flight activation; all access goes through atomics.
struct TraversalState {
    active_tasks: AtomicI64,
    visited_nodes: AtomicUsize,
    max_nodes: usize,
}

/// A directed graph of nodes, looked up by identifier.
///
/// Edges are advisory only: `traverse` dispatches strictly on what each
/// node's `get_successors` returns, never on the static edge list. Edges
/// exist so a caller can validate the graph shape or render it.
pub struct Graph {
    nodes: HashMap<String, Arc<dyn Node>>,
    edges: Vec<(String, String)>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Register a node. Re-adding the same identifier replaces the previous
    /// node object.
    pub fn add_node(&mut self, node: Arc<dyn Node>) {
        self.nodes.insert(node.id().to_string(), node);
    }

    /// Record an advisory edge for validation/visualization purposes.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.push((from.into(), to.into()));
    }

    pub fn get_node(&self, id: &str) -> Option<Arc<dyn Node>> {
        self.nodes.get(id).cloned()
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Walk the graph from `start`, using the default visit cap.
    pub fn traverse(
        self: Arc<Self>,
        task_id: String,
        kv: Arc<dyn KvClient>,
        session: SharedSession,
        start: impl Into<String>,
        messages: Vec<Message>,
        input: NodeInput,
    ) -> BoxStream<'static, Frame> {
        self.traverse_with_cap(task_id, kv, session, start, messages, input, DEFAULT_MAX_NODES)
    }

    /// Walk the graph from `start` with an explicit visit cap. Exposed
    /// separately so tests can exercise the cap-breach path without waiting
    /// on a 40-node chain.
    pub fn traverse_with_cap(
        self: Arc<Self>,
        task_id: String,
        kv: Arc<dyn KvClient>,
        session: SharedSession,
        start: impl Into<String>,
        messages: Vec<Message>,
        input: NodeInput,
        max_nodes: usize,
    ) -> BoxStream<'static, Frame> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Frame>();
        let state = Arc::new(TraversalState {
            active_tasks: AtomicI64::new(0),
            visited_nodes: AtomicUsize::new(0),
            max_nodes,
        });
        let messages = Arc::new(messages);
        let ctx = NodeContext::new(task_id.clone(), kv.clone(), session);

        tokio::spawn(execute_node(
            self,
            state,
            tx,
            ctx,
            messages,
            start.into(),
            input,
        ));

        Box::pin(stream! {
            loop {
                match rx.recv().await {
                    Some(Frame::Error(message)) => {
                        yield Frame::Error(message);
                        // The consumer returns on the first error frame without
                        // waiting for in-flight siblings.
                        return;
                    }
                    Some(frame) => yield frame,
                    None => break,
                }
            }
            let _ = kv.set(&task_id, status::FINISHED_WITH_SUCCESS).await;
        })
    }
}

async fn execute_node(
    graph: Arc<Graph>,
    state: Arc<TraversalState>,
    tx: mpsc::UnboundedSender<Frame>,
    ctx: NodeContext,
    messages: Arc<Vec<Message>>,
    node_id: String,
    input: NodeInput,
) {
    state.active_tasks.fetch_add(1, Ordering::SeqCst);

    let visited = state.visited_nodes.fetch_add(1, Ordering::SeqCst);
    if visited > state.max_nodes {
        let message = format!(
            "Number of nodes in the search exceeds {}. Breaking the search.",
            state.max_nodes
        );
        let _ = tx.send(Frame::Error(message));
        let _ = ctx.kv.set(&ctx.task_id, status::FINISHED_WITH_ERROR).await;
        state.active_tasks.fetch_sub(1, Ordering::SeqCst);
        return;
    }

    let node = match graph.get_node(&node_id) {
        Some(node) => node,
        None => {
            let _ = tx.send(Frame::Error(format!("unknown node id: {node_id}")));
            let _ = ctx.kv.set(&ctx.task_id, status::FINISHED_WITH_ERROR).await;
            state.active_tasks.fetch_sub(1, Ordering::SeqCst);
            return;
        }
    };

    let mut result_stream = node.process(&ctx, &messages, input).await;
    let mut last_result: Option<NodeResult> = None;
    while let Some(item) = result_stream.next().await {
        match item {
            Ok(result) => {
                last_result = Some(result.clone());
                if tx.send(Frame::Result(result)).is_err() {
                    // Consumer already returned on an earlier error; no point continuing.
                    state.active_tasks.fetch_sub(1, Ordering::SeqCst);
                    return;
                }
            }
            Err(_) => {
                let _ = tx.send(Frame::Error(format!("An error occurred in node {}", node.id())));
                let _ = ctx.kv.set(&ctx.task_id, status::FINISHED_WITH_ERROR).await;
                state.active_tasks.fetch_sub(1, Ordering::SeqCst);
                return;
            }
        }
    }

    let should_continue = node.check_for_continue(&ctx).await;
    let successors: Vec<Successor> = if should_continue {
        match &last_result {
            Some(result) => node.get_successors(result).await,
            None => Vec::new(),
        }
    } else {
        Vec::new()
    };

    let mut handles = Vec::with_capacity(successors.len());
    for (successor_id, successor_input) in successors {
        handles.push(tokio::spawn(execute_node(
            graph.clone(),
            state.clone(),
            tx.clone(),
            ctx.clone(),
            messages.clone(),
            successor_id,
            successor_input,
        )));
    }
    for handle in handles {
        let _ = handle.await;
    }

    state.active_tasks.fetch_sub(1, Ordering::SeqCst);
}
