//! Shared "ask the model for one JSON object" helper.
//!
//! Every illustrative node in this crate follows the same shape: build a
//! system prompt, send it alongside a placeholder user turn asking for a
//! JSON response, then parse the model's reply as an object with a handful
//! of known keys. Each node's prompt differs but this plumbing doesn't, so
//! it is factored out here rather than duplicated per node.

use crate::error::{PrebuiltError, Result};
use langgraph_core::llm::{ChatModel, ChatRequest};
use langgraph_core::Message;
use serde_json::Value;

/// Send `system_prompt` to `model` and parse the reply as a JSON object.
///
/// Mirrors the conversation shape the nodes this crate ports from use: a
/// single system turn carrying the full prompt, followed by a placeholder
/// user turn asking for the next JSON response.
pub async fn ask_for_json(
    model: &dyn ChatModel,
    node: &str,
    system_prompt: String,
    temperature: f32,
) -> Result<Value> {
    let request = ChatRequest::new(vec![
        Message::system(system_prompt),
        Message::human("<awaiting your next JSON response>"),
    ])
    .with_temperature(temperature);

    let response = model.chat(request).await.map_err(PrebuiltError::Graph)?;
    let content = response.message.text().unwrap_or_default();
    tracing::debug!(node, %temperature, "asked model for json response");
    parse_json_object(node, content)
}

/// Parse `content` as a JSON object, falling back to extracting the
/// outermost `{...}` span if the model wrapped its answer in prose or a
/// markdown code fence.
fn parse_json_object(node: &str, content: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Ok(value);
    }

    let start = content.find('{');
    let end = content.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&content[start..=end]) {
                tracing::warn!(node, "model wrapped its json response in prose, recovered it anyway");
                return Ok(value);
            }
        }
    }

    Err(PrebuiltError::MalformedJson {
        node: node.to_string(),
        error: content.to_string(),
    })
}
