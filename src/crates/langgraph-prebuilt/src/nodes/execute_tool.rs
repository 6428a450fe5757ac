//! Runs a single tool call chosen by [`ChooseToolNode`](super::choose_tool::ChooseToolNode)
//! and records it in the traversal's tool-output cache.

use async_trait::async_trait;
use langgraph_core::error::{GraphError, Result};
use langgraph_core::memory::ToolInvocation;
use langgraph_core::messages::Message;
use langgraph_core::node::{single_result, Node, NodeContext, NodeInput, NodeResult, NodeResultStream, Successor};
use langgraph_core::tool::{ToolCall, ToolOutput, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;

/// Tools whose output should also be rendered as a widget for the customer
/// to see, alongside the spoken response. Mirrors the tool list a Shopify
/// storefront agent routes to its widget-rendering step.
const WIDGET_TOOLS: &[&str] = &[
    "get_products",
    "get_product_details",
    "add_item_to_cart",
    "delete_item_from_cart",
    "get_cart_summary",
    "submit_cart_for_order",
    "get_order_status",
];

pub struct ExecuteToolNode {
    registry: Arc<ToolRegistry>,
}

impl ExecuteToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Node for ExecuteToolNode {
    fn id(&self) -> &str {
        "ExecuteTool"
    }

    async fn process(&self, _ctx: &NodeContext, _messages: &[Message], input: NodeInput) -> NodeResultStream {
        single_result(run(self, input).await)
    }

    async fn get_successors(&self, last_result: &NodeResult) -> Vec<Successor> {
        let tool = last_result.output.as_ref().and_then(|v| v.get("tool")).and_then(Value::as_str).unwrap_or_default();
        let parameters = last_result
            .output
            .as_ref()
            .and_then(|v| v.get("parameters"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let output = last_result.output.as_ref().and_then(|v| v.get("output")).cloned().unwrap_or(Value::Null);

        let mut successors = Vec::new();

        if WIDGET_TOOLS.contains(&tool) {
            let widget_input = NodeInput::new(last_result.memory.clone())
                .with_field("tool", Value::String(tool.to_string()))
                .with_field("parameters", parameters.clone())
                .with_field("output", output.clone());
            successors.push(("Widget".to_string(), widget_input));
        }

        successors.push(("CustomerResponse".to_string(), NodeInput::new(last_result.memory.clone())));

        successors
    }
}

async fn run(node: &ExecuteToolNode, input: NodeInput) -> Result<NodeResult> {
    let tool_name = input.get("tool").and_then(Value::as_str).unwrap_or_default().to_string();
    let parameters = input.get("parameters").cloned().unwrap_or_else(|| Value::Object(Default::default()));

    let tool_call = ToolCall {
        id: uuid::Uuid::new_v4().to_string(),
        name: tool_name.clone(),
        args: parameters.clone(),
    };

    let call_result = node.registry.execute_tool_call(&tool_call, None).await;
    let tool_output = match call_result.output {
        ToolOutput::Success { content } => content,
        ToolOutput::Error { error } => {
            tracing::warn!(tool = %tool_name, %error, "tool call failed");
            return Err(GraphError::node_execution(node.id(), error));
        }
    };

    let mut memory = input.memory;
    memory.push_tool_invocation(ToolInvocation {
        tool: tool_name.clone(),
        input: parameters.clone(),
        output: tool_output.clone(),
        description: format!("called {tool_name} with {parameters}"),
    });

    Ok(NodeResult::new(node.id())
        .with_output(serde_json::json!({
            "tool": tool_name,
            "parameters": parameters,
            "output": tool_output,
        }))
        .with_reason("ran the selected tool")
        .with_memory(memory))
}
