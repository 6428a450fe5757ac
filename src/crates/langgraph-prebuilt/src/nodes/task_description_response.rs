//! Generates the brief "working on it" message shown to the customer while
//! a tool call is in flight. Only fires the first time a tool is used in a
//! traversal — [`RoutingNode`](super::routing::RoutingNode) clears the
//! `task-description-to-customer` flag once the tool-output cache is no
//! longer empty.

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
Your job is to generate a brief, personalized waiting message for the customer.
The message should be vague about the specific tasks that you will be performing in the future \
but should acknowledge that you are working on their request. Use the conversation context and \
previous tool calls (if provided) to make the response more relevant and personal.
Make it five words or less.

## Tools
Here are the tools which you will be using in the future to help solve the customer's request.
You should never tell the customer about the tools or mention them. Only use this \
information to help you generate the waiting message to the customer response.

{tools}

## Conversation

Here is the conversation so far:

{conversation}

## Tone and Style
Make sure your response is extremely human like. Use phrases like \"Ok one second\" or \
\"let me check on that\" instead of anything that sounds like a status update.

## Output Format:
You must return a perfectly formatted JSON object which can be serialized with the following keys:
- 'reason': a string explaining why you chose this waiting message.
- 'response': the waiting message for the customer.";

pub struct TaskDescriptionResponseNode {
    model: Arc<dyn ChatModel>,
    prompt_prefix: String,
}

impl TaskDescriptionResponseNode {
    pub fn new(model: Arc<dyn ChatModel>, tools: &ToolRegistry) -> Self {
        let prompt_prefix = SYSTEM_PROMPT_TEMPLATE.replace("{tools}", &render_tool_catalog(tools));
        Self { model, prompt_prefix }
    }
}

#[async_trait]
impl Node for TaskDescriptionResponseNode {
    fn id(&self) -> &str {
        "TaskDescriptionResponse"
    }

    async fn process(&self, _ctx: &NodeContext, messages: &[Message], input: NodeInput) -> NodeResultStream {
        if !input.memory.task_description_to_customer.unwrap_or(false) {
            return Box::pin(futures::stream::empty());
        }
        single_result(run(self, messages, input).await)
    }

    async fn get_successors(&self, _last_result: &NodeResult) -> Vec<Successor> {
        Vec::new()
    }
}

async fn run(node: &TaskDescriptionResponseNode, messages: &[Message], input: NodeInput) -> Result<NodeResult> {
    let mut conversation = render_transcript(messages);
    append_tool_cache(&mut conversation, &input.memory.tool_output_cache);
    let system_prompt = node.prompt_prefix.replace("{conversation}", &conversation);

    let output = ask_for_json(node.model.as_ref(), node.id(), system_prompt, 0.7)
        .await
        .map_err(langgraph_core::GraphError::from)?;

    let response = output.get("response").and_then(Value::as_str).unwrap_or_default().to_string();
    let reason = output.get("reason").and_then(Value::as_str).unwrap_or_default().to_string();

    Ok(NodeResult::new(node.id())
        .with_output(response)
        .with_reason(reason)
        .with_memory(input.memory))
}
