//! Decides whether the agent has enough information to answer the customer
//! directly or needs to call a tool first.

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
You an expert at determining if you have enough information to generate a response to the user from the assistant.

## Store information
{store_info}

## Customer Service Task
{customer_service_task}

## Tools
You have access to the following tools:
{tools}

## Conversation

Here is the conversation so far:

{conversation}

## Output Format
You must return a perfectly formatted JSON object which can be serialized with the following keys:
- 'reason': a string explaining why you chose to either call a tool or respond to the customer.
- 'next-action': a string representing the next action to take. This will be 'call-tool' or 'respond-to-customer'.

Your JSON output should not have more than the two keys 'reason' and 'next-action'.

## Rules
Whenever a customer is asking questions about something in the shop, you should only respond if:
1. You are certain of the answer based on the output of tools
2. You have tried to find the information via tools and it is not available.";

pub struct RoutingNode {
    model: Arc<dyn ChatModel>,
    prompt_prefix: String,
}

impl RoutingNode {
    pub fn new(model: Arc<dyn ChatModel>, context: &StoreContext, tools: &ToolRegistry) -> Self {
        let prompt_prefix = SYSTEM_PROMPT_TEMPLATE
            .replace("{store_info}", &context.store_info)
            .replace("{customer_service_task}", &context.customer_service_task)
            .replace("{tools}", &render_tool_catalog(tools));
        Self { model, prompt_prefix }
    }
}

#[async_trait]
impl Node for RoutingNode {
    fn id(&self) -> &str {
        "Routing"
    }

    async fn process(&self, _ctx: &NodeContext, messages: &[Message], input: NodeInput) -> NodeResultStream {
        single_result(run(self, messages, input).await)
    }

    async fn get_successors(&self, last_result: &NodeResult) -> Vec<Successor> {
        let next_action = last_result.output.as_ref().and_then(Value::as_str).unwrap_or_default();
        let mut memory = last_result.memory.clone();
        let mut successors = Vec::new();

        if next_action.contains("respond-to-customer") {
            successors.push(("CustomerResponse".to_string(), NodeInput::new(memory.clone())));
        }

        memory.task_description_to_customer = Some(!memory.has_tool_output());

        if next_action.contains("call-tool") {
            successors.push(("TaskDescriptionResponse".to_string(), NodeInput::new(memory.clone())));
            successors.push(("ChooseTool".to_string(), NodeInput::new(memory)));
        }

        successors
    }
}

async fn run(node: &RoutingNode, messages: &[Message], input: NodeInput) -> Result<NodeResult> {
    let mut conversation = render_transcript(messages);
    append_tool_cache(&mut conversation, &input.memory.tool_output_cache);
    let system_prompt = node.prompt_prefix.replace("{conversation}", &conversation);

    let output = ask_for_json(node.model.as_ref(), node.id(), system_prompt, 0.9)
        .await
        .map_err(langgraph_core::GraphError::from)?;

    let next_action = output.get("next-action").and_then(Value::as_str).unwrap_or_default().to_string();
    let reason = output.get("reason").and_then(Value::as_str).unwrap_or_default().to_string();

    Ok(NodeResult::new(node.id())
        .with_output(next_action)
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

    fn test_ctx() -> NodeContext {
        NodeContext::new("t1", Arc::new(InMemoryKvClient::new()), SharedSession::new(Session::new()))
    }

    #[tokio::test]
    async fn respond_to_customer_fans_to_customer_response_only() {
        let model = Arc::new(StubModel(json!({"reason": "have the answer", "next-action": "respond-to-customer"}).to_string()));
        let tools = ToolRegistry::new();
        let node = RoutingNode::new(model, &StoreContext::new("a shop", "help customers"), &tools);

        let ctx = test_ctx();
        let messages = vec![Message::human("hi")];
        let mut stream = node.process(&ctx, &messages, NodeInput::new(Memory::new())).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();
        assert_eq!(result.output, Some(json!("respond-to-customer")));

        let successors = node.get_successors(&result).await;
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].0, "CustomerResponse");
    }

    #[tokio::test]
    async fn call_tool_fans_to_task_description_and_choose_tool() {
        let model = Arc::new(StubModel(json!({"reason": "need a tool", "next-action": "call-tool"}).to_string()));
        let tools = ToolRegistry::new();
        let node = RoutingNode::new(model, &StoreContext::new("a shop", "help customers"), &tools);

        let ctx = test_ctx();
        let messages = vec![Message::human("what products do you have")];
        let mut stream = node.process(&ctx, &messages, NodeInput::new(Memory::new())).await;
        let result = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();

        let successors = node.get_successors(&result).await;
        let ids: Vec<&str> = successors.iter().map(|(id, _)| id.as_str()).collect();
        assert!(ids.contains(&"TaskDescriptionResponse"));
        assert!(ids.contains(&"ChooseTool"));
        for (_, input) in &successors {
            assert_eq!(input.memory.task_description_to_customer, Some(true));
        }
    }
}
