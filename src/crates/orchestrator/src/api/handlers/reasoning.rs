//! The two endpoints a streaming graph traversal is driven through:
//! `POST /run-reasoning-agent` (starts a traversal, streams SSE frames) and
//! `POST /cancel-reasoning-agent/:task_id` (cooperative cancellation).

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::{http::HeaderValue, Json};
use futures::stream::StreamExt;
use langgraph_core::graph::Frame;
use langgraph_core::kv;
use langgraph_core::memory::Memory;
use langgraph_core::messages::{Message, MessageRole};
use langgraph_core::node::{NodeInput, NodeResult};
use langgraph_core::session::{SharedSession, Session};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::routes::AppState;

/// One entry of the inbound `messages` array: `{role, content}`, matching
/// the wire format every SSE frame's synthesized messages also use.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub role: String,
    pub content: String,
}

/// Body of `POST /run-reasoning-agent`.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub session: Value,
    pub action: Option<ActionPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ActionPayload {
    #[serde(rename = "type")]
    pub action_type: String,
    pub details: ActionDetails,
}

#[derive(Debug, Deserialize)]
pub struct ActionDetails {
    pub tool: String,
    #[serde(default)]
    pub parameters: Value,
}

const DEFAULT_START_NODE: &str = "Routing";
const ACTION_START_NODE: &str = "ExecuteTool";

/// `POST /run-reasoning-agent`
pub async fn run_reasoning_agent(State(state): State<AppState>, Json(request): Json<RunRequest>) -> impl IntoResponse {
    let task_id = uuid::Uuid::new_v4().to_string();
    let admission = tooling::logging::timed("kv.set(task running)", state.kv.set(&task_id, kv::status::RUNNING));
    if let Err(error) = admission.await {
        tracing::error!(task_id, %error, "failed to write running status to kv");
    }

    let mut messages: Vec<Message> = request
        .messages
        .into_iter()
        .map(|m| Message::new(role_from_str(&m.role), m.content))
        .collect();
    let (start_node, input) = match request.action {
        Some(action) if action.action_type == "tool" => {
            messages.push(Message::human(format!(
                "Action requested: call {} with {}",
                action.details.tool, action.details.parameters
            )));
            let input = NodeInput::new(Memory::new())
                .with_field("tool", Value::String(action.details.tool))
                .with_field("parameters", action.details.parameters);
            (ACTION_START_NODE, input)
        }
        _ => (DEFAULT_START_NODE, NodeInput::new(Memory::new())),
    };

    let session = SharedSession::new(Session::from_json(request.session));
    let mut stream = state
        .graph
        .clone()
        .traverse(task_id.clone(), state.kv.clone(), session.clone(), start_node, messages, input);

    let sse_stream = async_stream::stream! {
        while let Some(frame) = stream.next().await {
            let payload = match frame {
                Frame::Error(message) => json!({ "error": message }),
                Frame::Result(result) => format_result(&session, result),
            };
            yield Ok::<Event, Infallible>(Event::default().data(payload.to_string()));
        }
    };

    let mut response = Sse::new(sse_stream).keep_alive(KeepAlive::default()).into_response();
    if let Ok(header_value) = HeaderValue::from_str(&task_id) {
        response.headers_mut().insert("X-Task-ID", header_value);
    }
    response
}

/// `POST /cancel-reasoning-agent/:task_id`
///
/// No existence check by design — the caller already has the ID, and a
/// cancellation marker for an unknown or already-finished task is harmless.
pub async fn cancel_reasoning_agent(State(state): State<AppState>, Path(task_id): Path<String>) -> impl IntoResponse {
    if let Err(error) = state.kv.set(&kv::cancellation_key(&task_id), kv::CANCELLED).await {
        tracing::error!(task_id, %error, "failed to write cancellation marker to kv");
    }
    Json(json!({ "detail": format!("Task {task_id} cancelled") }))
}

/// Shapes one raw [`NodeResult`] into the outbound wire frame: injects the
/// current session, folds any newly-cached tool output into a synthetic
/// assistant message, and prepends a prose header to a customer-facing
/// response before handing the string back as `output`.
fn format_result(session: &SharedSession, result: NodeResult) -> Value {
    let mut synthesized = Vec::new();

    if !result.memory.tool_output_cache.is_empty() {
        let cache_summary = result
            .memory
            .tool_output_cache
            .iter()
            .map(|invocation| format!("* {}: {}\n", invocation.tool, invocation.description))
            .collect::<String>();
        synthesized.push(json!({
            "role": "assistant",
            "content": format!("[tool cache]\n{cache_summary}"),
        }));
    }

    let output = match &result.output {
        Some(Value::String(text)) if !text.is_empty() => {
            let header = tool_usage_header(&result.memory.tool_output_cache);
            let response = if header.is_empty() { text.clone() } else { format!("{header}{text}") };
            synthesized.push(json!({ "role": "assistant", "content": response.clone() }));
            Value::String(response)
        }
        other => other.clone().unwrap_or(Value::Null),
    };

    json!({
        "messages": synthesized,
        "session": session.to_json(),
        "node": result.node,
        "output": output,
        "reason": result.reason.unwrap_or_default(),
    })
}

/// Builds the "used N tools" prose prepended before a customer-facing
/// response, empty when no tool has run yet.
fn tool_usage_header(cache: &[langgraph_core::memory::ToolInvocation]) -> String {
    if cache.is_empty() {
        return String::new();
    }
    let tools = cache.iter().map(|invocation| invocation.tool.as_str()).collect::<Vec<_>>().join(", ");
    format!("[used: {tools}] ")
}

/// Maps an inbound wire role string to the typed [`MessageRole`], with
/// unrecognized values falling back to `User` rather than erroring the
/// request.
fn role_from_str(role: &str) -> MessageRole {
    match role {
        "system" => MessageRole::System,
        "assistant" | "ai" => MessageRole::Assistant,
        "tool" => MessageRole::Tool,
        _ => MessageRole::User,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use langgraph_core::memory::ToolInvocation;

    #[test]
    fn header_is_empty_without_tool_output() {
        assert_eq!(tool_usage_header(&[]), "");
    }

    #[test]
    fn header_lists_tool_names_used_so_far() {
        let cache = vec![ToolInvocation {
            tool: "get_products".to_string(),
            input: json!({}),
            output: json!({}),
            description: "called get_products".to_string(),
        }];
        assert_eq!(tool_usage_header(&cache), "[used: get_products] ");
    }

    #[test]
    fn format_result_injects_session_and_prose_header() {
        let session = SharedSession::new(Session::from_json(json!({"guid": "abc"})));
        let mut memory = Memory::new();
        memory.push_tool_invocation(ToolInvocation {
            tool: "get_products".to_string(),
            input: json!({}),
            output: json!({"products": []}),
            description: "called get_products with {}".to_string(),
        });
        let result = NodeResult::new("CustomerResponse")
            .with_output("Here is what we have.")
            .with_reason("answered from tool output")
            .with_memory(memory);

        let frame = format_result(&session, result);
        assert_eq!(frame["session"]["guid"], json!("abc"));
        assert_eq!(frame["node"], json!("CustomerResponse"));
        assert_eq!(frame["output"], json!("[used: get_products] Here is what we have."));
        assert_eq!(frame["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn format_result_folds_every_cache_entry_not_just_the_last() {
        let session = SharedSession::new(Session::from_json(json!({})));
        let mut memory = Memory::new();
        memory.push_tool_invocation(ToolInvocation {
            tool: "get_products".to_string(),
            input: json!({}),
            output: json!({"products": []}),
            description: "called get_products with {}".to_string(),
        });
        memory.push_tool_invocation(ToolInvocation {
            tool: "add_item_to_cart".to_string(),
            input: json!({"variant_id": "v1"}),
            output: json!({"cart": [{"variant_id": "v1"}]}),
            description: "called add_item_to_cart with {\"variant_id\": \"v1\"}".to_string(),
        });
        let result = NodeResult::new("CustomerResponse").with_output("Added it to your cart.").with_memory(memory);

        let frame = format_result(&session, result);
        let cache_message = frame["messages"][0]["content"].as_str().unwrap().to_string();
        assert!(cache_message.contains("get_products"), "missing first cache entry: {cache_message}");
        assert!(cache_message.contains("add_item_to_cart"), "missing second cache entry: {cache_message}");
    }
}
