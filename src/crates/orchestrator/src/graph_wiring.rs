//! Builds the storefront agent graph: wires the node set from
//! `langgraph-prebuilt` together with a tool registry and registers the
//! advisory edges each node's `get_successors` actually produces.
//!
//! The tools registered here are illustrative, matching the scope of the
//! nodes they back — a real deployment would point `ExecuteTool` at a
//! genuine storefront API client instead.

use langgraph_core::graph::Graph;
use langgraph_core::llm::ChatModel;
use langgraph_core::tool::{Tool, ToolRegistry};
use langgraph_prebuilt::{
    nodes::{ChooseToolNode, CustomerResponseNode, ExecuteToolNode, RoutingNode, TaskDescriptionResponseNode, WidgetNode},
    StoreContext,
};
use serde_json::json;
use std::sync::Arc;

/// Store description and mandate spliced into every prompt. Left generic
/// rather than naming a specific storefront, since the tool set below is
/// illustrative rather than wired to a real catalog.
pub fn default_store_context() -> StoreContext {
    StoreContext::new(
        "An online storefront selling a general catalog of products.",
        "Help customers find products, manage their cart, and place orders.",
    )
}

/// Registers the tool set [`ExecuteToolNode`] dispatches to and
/// [`WidgetNode`] renders, backed by an in-memory product/cart stand-in.
pub fn build_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Tool::new(
        "get_products",
        "List the products available in the store.",
        json!({"type": "object", "properties": {}}),
        Arc::new(|_args, _rt| {
            Box::pin(async {
                Ok(json!({"products": [
                    {"product_id": "prod_1", "name": "Trail Running Shoes", "price": "89.00"},
                    {"product_id": "prod_2", "name": "Insulated Water Bottle", "price": "24.00"},
                ]}))
            })
        }),
    ));

    registry.register(Tool::new(
        "get_product_details",
        "Get full details for a single product by ID.",
        json!({"type": "object", "properties": {"product_id": {"type": "string"}}, "required": ["product_id"]}),
        Arc::new(|args, _rt| {
            Box::pin(async move {
                let product_id = args.get("product_id").and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
                Ok(json!({"product_id": product_id, "name": "Trail Running Shoes", "price": "89.00", "in_stock": true}))
            })
        }),
    ));

    registry.register(Tool::new(
        "add_item_to_cart",
        "Add a product variant to the customer's cart.",
        json!({"type": "object", "properties": {"variant_id": {"type": "string"}}, "required": ["variant_id"]}),
        Arc::new(|args, _rt| {
            Box::pin(async move {
                let variant_id = args.get("variant_id").and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
                Ok(json!({"cart": [{"variant_id": variant_id, "quantity": 1}]}))
            })
        }),
    ));

    registry.register(Tool::new(
        "delete_item_from_cart",
        "Remove a product variant from the customer's cart.",
        json!({"type": "object", "properties": {"variant_id": {"type": "string"}}, "required": ["variant_id"]}),
        Arc::new(|_args, _rt| Box::pin(async { Ok(json!({"cart": []})) })),
    ));

    registry.register(Tool::new(
        "get_cart_summary",
        "Get the current contents of the customer's cart.",
        json!({"type": "object", "properties": {}}),
        Arc::new(|_args, _rt| Box::pin(async { Ok(json!({"cart": [], "subtotal": "0.00"})) })),
    ));

    registry.register(Tool::new(
        "submit_cart_for_order",
        "Place an order for everything currently in the cart.",
        json!({"type": "object", "properties": {}}),
        Arc::new(|_args, _rt| Box::pin(async { Ok(json!("Thanks! Your confirmation number: 1001")) })),
    ));

    registry.register(Tool::new(
        "get_order_status",
        "Check the status of a previously placed order.",
        json!({"type": "object", "properties": {"order_id": {"type": "string"}}}),
        Arc::new(|_args, _rt| Box::pin(async { Ok(json!("Your order is in transit. Confirmation number: 1001")) })),
    ));

    registry
}

/// Assembles the full graph: every node from `langgraph-prebuilt`, wired
/// with the advisory edges `Routing`/`ChooseTool`/`ExecuteTool` actually
/// dispatch to at runtime.
pub fn build_graph(model: Arc<dyn ChatModel>, shop_gid: impl Into<String>) -> Graph {
    let context = default_store_context();
    let tools = build_tool_registry();

    let mut graph = Graph::new();
    graph.add_node(Arc::new(RoutingNode::new(model.clone(), &context, &tools)));
    graph.add_node(Arc::new(ChooseToolNode::new(model.clone(), &context, &tools)));
    graph.add_node(Arc::new(TaskDescriptionResponseNode::new(model.clone(), &tools)));
    graph.add_node(Arc::new(ExecuteToolNode::new(Arc::new(tools))));
    graph.add_node(Arc::new(WidgetNode::new(shop_gid.into())));
    graph.add_node(Arc::new(CustomerResponseNode::new(model, &context)));

    graph.add_edge("Routing", "CustomerResponse");
    graph.add_edge("Routing", "TaskDescriptionResponse");
    graph.add_edge("Routing", "ChooseTool");
    graph.add_edge("ChooseTool", "ExecuteTool");
    graph.add_edge("ExecuteTool", "Widget");
    graph.add_edge("ExecuteTool", "CustomerResponse");

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_registry_covers_the_full_storefront_surface() {
        let tools = build_tool_registry();
        assert!(tools.has_tool("get_products"));
        assert!(tools.has_tool("submit_cart_for_order"));
        assert_eq!(tools.tool_names().len(), 7);
    }
}
