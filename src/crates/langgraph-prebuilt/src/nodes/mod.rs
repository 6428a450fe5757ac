//! Illustrative [`Node`](langgraph_core::node::Node) implementations for a
//! storefront conversational agent, ported from a Shopify customer-service
//! assistant. Together they form one acyclic graph:
//!
//! ```text
//! Routing ──respond-to-customer──────────────► CustomerResponse
//!    │
//!    └──call-tool──► TaskDescriptionResponse (terminal)
//!    └──call-tool──► ChooseTool ──► ExecuteTool ──► Widget (conditional, terminal)
//!                                       │
//!                                       └──────────► CustomerResponse
//! ```
//!
//! `Routing` decides whether enough information already exists to answer the
//! customer; `ChooseTool` and `ExecuteTool` together fetch what's missing;
//! `Widget` renders any tool output that has a visual counterpart while
//! `CustomerResponse` produces the words that accompany it. None of this is
//! wired into `langgraph-core` itself — callers assemble a
//! [`langgraph_core::graph::Graph`] from these nodes (and their own edges)
//! exactly as they would with custom nodes of their own.

pub mod choose_tool;
pub mod customer_response;
pub mod execute_tool;
pub mod routing;
pub mod task_description_response;
pub mod widget;

pub use choose_tool::ChooseToolNode;
pub use customer_response::CustomerResponseNode;
pub use execute_tool::ExecuteToolNode;
pub use routing::RoutingNode;
pub use task_description_response::TaskDescriptionResponseNode;
pub use widget::WidgetNode;
