//! # langgraph-prebuilt — illustrative nodes for a storefront agent
//!
//! `langgraph-core` deliberately ships no node business logic of its own —
//! see that crate's module docs. This crate fills that gap with one
//! worked example: the node set for a Shopify-style customer-service agent,
//! ported from a production storefront assistant.
//!
//! None of this is special to `langgraph-core`; every node here is a plain
//! [`langgraph_core::node::Node`] implementation, built the same way an
//! application's own nodes would be. Use it as a reference when wiring up a
//! graph, or depend on it directly if these nodes happen to fit.
//!
//! ## Nodes
//!
//! See [`nodes`] for the full node set and how they wire together.
//!
//! ## Shared plumbing
//!
//! - [`context::StoreContext`] — the store description and customer-service
//!   mandate spliced into every node's system prompt.
//! - [`conversation`] — renders a message transcript plus the tool-output
//!   cache into the text block each prompt expects.
//! - [`json_llm`] — sends a system prompt to a [`langgraph_core::llm::ChatModel`]
//!   and parses the reply as the JSON object these prompts all request.
//! - [`error::PrebuiltError`] — errors raised while building a prompt or
//!   parsing a model response, convertible into [`langgraph_core::GraphError`].

pub mod context;
pub mod conversation;
pub mod error;
pub mod json_llm;
pub mod nodes;

pub use context::StoreContext;
pub use error::{PrebuiltError, Result};
pub use nodes::{ChooseToolNode, CustomerResponseNode, ExecuteToolNode, RoutingNode, TaskDescriptionResponseNode, WidgetNode};
