//! Selects which tool to call next and identifies its parameters from the
//! conversation, then hands both to [`ExecuteToolNode`](super::execute_tool::ExecuteToolNode).
//!
//! Upstream tool-selection and parameter-identification are two separate
//! steps; here they are merged into one LLM call since both are simple
//! extraction tasks over the same conversation context.

use crate::context::{render_tool_catalog, StoreContext};
use crate::conversation::{append_tool_cache, render_transcript};
use crate::json_llm::ask_for_json;
use async_trait::async_trait;
use langgraph_core::error::Result;
use langgraph_core::llm::ChatModel;
use langgraph_core::messages::Message;
use langgraph_core::node::{single_result, Node, NodeContext, NodeInput, NodeResult, NodeResultStream, Successor};
use langgraph_core::tool::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;

const SYSTEM_PROMPT_TEMPLATE: &str = "\
You an expert at identifying which tool to call and mapping parameters from a conversation and memory to that tool's call.

## Store information
{store_info}

## Customer Service Task
{customer_service_task}

## Tools available
{tools}

## Conversation so far:
{conversation}

## Output Format
You must return a perfectly formatted JSON object which can be serialized with the following keys:
- 'reason': a string explaining why you chose this tool and the value for each parameter.
- 'tool': the name of the tool to call, exactly as it appears above.
- 'parameters': a dictionary representing the parameter keys and values required by that tool.

The 'parameters' key must contain the exact type of parameter the tool expects. For instance, if a parameter \
is an integer, you must return a single integer rather than a list.";

pub struct ChooseToolNode {
    model: Arc<dyn ChatModel>,
    prompt_prefix: String,
}

impl ChooseToolNode {
    pub fn new(model: Arc<dyn ChatModel>, context: &StoreContext, tools: &ToolRegistry) -> Self {
        let prompt_prefix = SYSTEM_PROMPT_TEMPLATE
            .replace("{store_info}", &context.store_info)
            .replace("{customer_service_task}", &context.customer_service_task)
            .replace("{tools}", &render_tool_catalog(tools));
        Self { model, prompt_prefix }
    }
}

#[async_trait]
impl Node for ChooseToolNode {
    fn id(&self) -> &str {
        "ChooseTool"
    }

    async fn process(&self, _ctx: &NodeContext, messages: &[Message], input: NodeInput) -> NodeResultStream {
        single_result(run(self, messages, input).await)
    }

    async fn get_successors(&self, last_result: &NodeResult) -> Vec<Successor> {
        let tool = last_result
            .output
            .as_ref()
            .and_then(|v| v.get("tool"))
            .cloned()
            .unwrap_or(Value::String(String::new()));
        let parameters = last_result
            .output
            .as_ref()
            .and_then(|v| v.get("parameters"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        let input = NodeInput::new(last_result.memory.clone())
            .with_field("tool", tool)
            .with_field("parameters", parameters);

        vec![("ExecuteTool".to_string(), input)]
    }
}

async fn run(node: &ChooseToolNode, messages: &[Message], input: NodeInput) -> Result<NodeResult> {
    let mut conversation = render_transcript(messages);
    append_tool_cache(&mut conversation, &input.memory.tool_output_cache);
    let system_prompt = node.prompt_prefix.replace("{conversation}", &conversation);

    let raw = ask_for_json(node.model.as_ref(), node.id(), system_prompt, 0.9)
        .await
        .map_err(langgraph_core::GraphError::from)?;

    let reason = raw.get("reason").and_then(Value::as_str).unwrap_or_default().to_string();
    let output = serde_json::json!({
        "tool": raw.get("tool").cloned().unwrap_or(Value::String(String::new())),
        "parameters": raw.get("parameters").cloned().unwrap_or_else(|| Value::Object(Default::default())),
    });

    Ok(NodeResult::new(node.id())
        .with_output(output)
        .with_reason(reason)
        .with_memory(input.memory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use langgraph_core::llm::{ChatRequest, ChatResponse, ChatStreamResponse};
    use langgraph_core::memory::Memory;
    use langgraph_core::session::{SharedSession, Session};
    use langgraph_core::kv::InMemoryKvClient;
    use serde_json::json;

    #[derive(Clone)]
    struct StubModel(String);

    #[async_trait]
    impl ChatModel for StubModel {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            Ok(ChatResponse {
                message: Message::ai(self.0.clone()),
                usage: None,
                reasoning: None,
                metadata: Default::default(),
            })
        }
        async fn stream(&self, _request: ChatRequest) -> Result<ChatStreamResponse> {
            unimplemented!()
        }
        fn clone_box(&self) -> Box<dyn ChatModel> {
            Box::new(self.clone())
        }
    }

    #[tokio::test]
    async fn fans_to_execute_tool_with_selected_tool_and_parameters() {
        let model = Arc::new(StubModel(
            json!({"reason": "customer wants products", "tool": "get_products", "parameters": {}}).to_string(),
        ));
        let node = ChooseToolNode::new(model, &StoreContext::new("a shop", "help customers"), &ToolRegistry::new());
        let ctx = NodeContext::new("t1", Arc::new(InMemoryKvClient::new()), SharedSession::new(Session::new()));
        let messages = vec![Message::human("show me your products")];
        let mut stream = node.process(&ctx, &messages, NodeInput::new(Memory::new())).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();

        let successors = node.get_successors(&result).await;
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].0, "ExecuteTool");
        assert_eq!(successors[0].1.get("tool"), Some(&json!("get_products")));
    }
}
