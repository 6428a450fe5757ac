//! Static context shared by every prompt in this crate: what the store
//! sells and what the agent's job is, plus a human-readable tool catalog.
//!
//! Grounds the `{store_info}` / `{customer_service_task}` / `{tools}`
//! template substitutions every node's system prompt makes.

use langgraph_core::tool::ToolRegistry;

/// Store description and the agent's customer-service mandate, substituted
/// into every node's system prompt.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub store_info: String,
    pub customer_service_task: String,
}

impl StoreContext {
    pub fn new(store_info: impl Into<String>, customer_service_task: impl Into<String>) -> Self {
        Self {
            store_info: store_info.into(),
            customer_service_task: customer_service_task.into(),
        }
    }
}

/// Render a registry's tools as one `name(description)` line per tool, in
/// the format the prompts in this crate splice under a `## Tools` heading.
pub fn render_tool_catalog(registry: &ToolRegistry) -> String {
    let mut names = registry.tool_names();
    names.sort();
    names
        .into_iter()
        .filter_map(|name| registry.get(&name).map(|tool| format!("{}({})", tool.name, tool.description)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use langgraph_core::tool::Tool;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn renders_tools_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Tool::new(
            "get_products",
            "list products in the store",
            json!({}),
            Arc::new(|_args, _rt| Box::pin(async { Ok(json!({})) })),
        ));
        registry.register(Tool::new(
            "add_item_to_cart",
            "add a variant to the cart",
            json!({}),
            Arc::new(|_args, _rt| Box::pin(async { Ok(json!({})) })),
        ));

        let catalog = render_tool_catalog(&registry);
        assert_eq!(
            catalog,
            "add_item_to_cart(add a variant to the cart)\nget_products(list products in the store)"
        );
    }
}
