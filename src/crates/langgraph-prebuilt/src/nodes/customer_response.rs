//! Generates the final, spoken reply to the customer from the conversation
//! and whatever tools have run so far. Always a terminal node.

use crate::context::StoreContext;
use crate::conversation::{append_tool_cache, render_transcript};
use crate::json_llm::ask_for_json;
use async_trait::async_trait;
use langgraph_core::error::Result;
use langgraph_core::llm::ChatModel;
use langgraph_core::messages::Message;
use langgraph_core::node::{single_result, Node, NodeContext, NodeInput, NodeResult, NodeResultStream, Successor};
use serde_json::Value;
use std::sync::Arc;

const SYSTEM_PROMPT_TEMPLATE: &str = "\
Your job is to generate a response to the customer from the Assistant.
The assistant is a helpful, kind customer service agent for this store.
Use the conversation and previous tool calls (if provided) to generate a response.

## Store information
{store_info}

## Customer Service Task
{customer_service_task}

## Response Tone and Style
* Make sure your response is extremely human-like. This is a casual conversation, not a formal business interaction.
* Never greet the customer unless they initiate a greeting without a request. Get straight to what they want instead of using pleasantries.

## Conversation History

In the conversation, the customer will be able to both hear you and visually see the output from the last tool on the app screen. \
This should impact how you respond to the customer.

Here is the conversation so far:

{conversation}

## Output Format
You must return a perfectly formatted JSON object which can be serialized with the following keys:
- 'reason': a string explaining what you will talk about in your response.
- 'response': the response to the customer from the assistant.

In the 'response' key, you should always spell numbers out if you are relaying a number to the customer.

If your response contains information contained in the visual which is available to the customer, \
you should simply reference the screen \"below\" instead of repeating the information.

## Rules
* Your response must be VERY concise. Do not use filler language. More than one sentence is discouraged.
* Do not reference \"the screen\" in your response. It is implicit that the customer can see the screen.
* You are strictly forbidden from assuming any information about the store that has not been provided to you.
* If a customer asks a question you cannot answer based on the tool outputs, tell them that you do not know.";

pub struct CustomerResponseNode {
    model: Arc<dyn ChatModel>,
    prompt_prefix: String,
}

impl CustomerResponseNode {
    pub fn new(model: Arc<dyn ChatModel>, context: &StoreContext) -> Self {
        let prompt_prefix = SYSTEM_PROMPT_TEMPLATE
            .replace("{store_info}", &context.store_info)
            .replace("{customer_service_task}", &context.customer_service_task);
        Self { model, prompt_prefix }
    }
}

#[async_trait]
impl Node for CustomerResponseNode {
    fn id(&self) -> &str {
        "CustomerResponse"
    }

    async fn process(&self, _ctx: &NodeContext, messages: &[Message], input: NodeInput) -> NodeResultStream {
        single_result(run(self, messages, input).await)
    }

    async fn get_successors(&self, _last_result: &NodeResult) -> Vec<Successor> {
        Vec::new()
    }
}

async fn run(node: &CustomerResponseNode, messages: &[Message], input: NodeInput) -> Result<NodeResult> {
    let mut conversation = render_transcript(messages);
    append_tool_cache(&mut conversation, &input.memory.tool_output_cache);
    let system_prompt = node.prompt_prefix.replace("{conversation}", &conversation);

    let output = ask_for_json(node.model.as_ref(), node.id(), system_prompt, 0.9)
        .await
        .map_err(langgraph_core::GraphError::from)?;

    let response = output.get("response").and_then(Value::as_str).unwrap_or_default().to_string();
    let reason = output.get("reason").and_then(Value::as_str).unwrap_or_default().to_string();

    Ok(NodeResult::new(node.id())
        .with_output(response)
        .with_reason(reason)
        .with_memory(input.memory))
}
