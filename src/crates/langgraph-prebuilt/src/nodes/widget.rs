//! Maps a tool's output onto the widget shown to the customer alongside the
//! spoken response — a product list, a cart summary, an order confirmation.
//!
//! This node is always terminal: it renders a visual, it does not continue
//! the conversation.

use async_trait::async_trait;
use langgraph_core::messages::Message;
use langgraph_core::node::{single_result, Node, NodeContext, NodeInput, NodeResult, NodeResultStream, Successor};
use serde_json::{json, Value};

pub struct WidgetNode {
    shop_gid: String,
}

impl WidgetNode {
    pub fn new(shop_gid: impl Into<String>) -> Self {
        Self { shop_gid: shop_gid.into() }
    }
}

#[async_trait]
impl Node for WidgetNode {
    fn id(&self) -> &str {
        "Widget"
    }

    async fn process(&self, _ctx: &NodeContext, _messages: &[Message], input: NodeInput) -> NodeResultStream {
        let tool = input.get("tool").and_then(Value::as_str).unwrap_or_default().to_string();
        let tool_output = input.get("output").cloned().unwrap_or(Value::Null);
        let widget = match_widget_to_tool(&tool, &tool_output, &self.shop_gid);

        single_result(Ok(NodeResult::new(self.id())
            .with_output(widget)
            .with_reason("hard coded widget creation")
            .with_memory(input.memory)))
    }

    async fn get_successors(&self, _last_result: &NodeResult) -> Vec<Successor> {
        Vec::new()
    }
}

/// Pure mapping from a tool name and its output to the widget payload the
/// customer-facing client renders.
fn match_widget_to_tool(tool: &str, tool_output: &Value, shop_gid: &str) -> Value {
    match tool {
        "get_products" => json!({
            "type": "shopify-product-list",
            "details": tool_output.to_string(),
            "available-tools": [{"tool": "get_product_details", "arguments": ["product_id"]}],
        }),
        "get_product_details" => json!({
            "type": "shopify-product-details",
            "details": tool_output.to_string(),
            "available-tools": [{"tool": "add_item_to_cart", "arguments": ["variant_id"]}],
        }),
        "add_item_to_cart" | "delete_item_from_cart" | "get_cart_summary" => json!({
            "type": "shopify-cart-summary",
            "details": tool_output.to_string(),
            "available-tools": [{"tool": "submit_cart_for_order", "arguments": []}],
        }),
        "submit_cart_for_order" => json!({
            "type": "shopify-order-confirmation",
            "details": order_confirmation_details(tool_output, shop_gid).to_string(),
            "available-tools": [{"tool": "get_order_status", "arguments": []}],
        }),
        "get_order_status" => json!({
            "type": "shopify-order-status",
            "details": order_confirmation_details(tool_output, shop_gid).to_string(),
        }),
        _ => json!({}),
    }
}

/// Extracts a confirmation number out of a "...confirmation number: N" style
/// tool message and builds the order link the widget points to; falls back
/// to passing the tool output through unchanged when that shape isn't found.
fn order_confirmation_details(tool_output: &Value, shop_gid: &str) -> Value {
    let message = match tool_output.as_str() {
        Some(text) => text,
        None => return tool_output.clone(),
    };

    let Some((_, after)) = message.split_once("confirmation number:") else {
        return tool_output.clone();
    };
    let Ok(confirmation_number) = after.trim().parse::<u64>() else {
        return tool_output.clone();
    };

    json!({
        "message": message,
        "confirmation_number": confirmation_number,
        "confirmation_link": format!("https://shopify.com/{shop_gid}/account/orders/{confirmation_number}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use langgraph_core::kv::InMemoryKvClient;
    use langgraph_core::memory::Memory;
    use langgraph_core::session::{SharedSession, Session};
    use std::sync::Arc;

    fn test_ctx() -> NodeContext {
        NodeContext::new("t1", Arc::new(InMemoryKvClient::new()), SharedSession::new(Session::new()))
    }

    #[tokio::test]
    async fn product_list_becomes_product_list_widget() {
        let node = WidgetNode::new("shop_123");
        let ctx = test_ctx();
        let input = NodeInput::new(Memory::new())
            .with_field("tool", json!("get_products"))
            .with_field("output", json!({"products": ["a"]}));
        let mut stream = node.process(&ctx, &[], input).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();
        assert_eq!(result.output.unwrap()["type"], "shopify-product-list");
    }

    #[tokio::test]
    async fn order_confirmation_extracts_confirmation_number() {
        let node = WidgetNode::new("shop_123");
        let ctx = test_ctx();
        let input = NodeInput::new(Memory::new())
            .with_field("tool", json!("submit_cart_for_order"))
            .with_field("output", json!("Thanks! Your confirmation number: 4821"));
        let mut stream = node.process(&ctx, &[], input).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();
        let details: Value = serde_json::from_str(result.output.unwrap()["details"].as_str().unwrap()).unwrap();
        assert_eq!(details["confirmation_number"], 4821);
        assert_eq!(details["confirmation_link"], "https://shopify.com/shop_123/account/orders/4821");
    }

    #[tokio::test]
    async fn unknown_tool_yields_empty_widget() {
        let node = WidgetNode::new("shop_123");
        let ctx = test_ctx();
        let input = NodeInput::new(Memory::new())
            .with_field("tool", json!("not_a_widget_tool"))
            .with_field("output", json!({}));
        let mut stream = node.process(&ctx, &[], input).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();
        assert_eq!(result.output, Some(json!({})));
    }
}
