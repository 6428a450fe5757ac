//! Renders a `Message` slice and a tool-output cache into the
//! `role: content` transcript text every node's prompt splices under
//! `## Conversation`.

use langgraph_core::memory::ToolInvocation;
use langgraph_core::messages::{Message, MessageRole};

fn role_str(role: &MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
        MessageRole::Tool => "tool",
    }
}

/// One `role: content` line per message, newline-terminated, matching the
/// transcript format the ported prompts expect.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}\n", role_str(&m.role), m.text().unwrap_or_default()))
        .collect()
}

/// Append the "tools used before responding" block to a rendered transcript
/// when the tool-output cache is non-empty. A no-op on an empty cache.
pub fn append_tool_cache(conversation: &mut String, tool_output_cache: &[ToolInvocation]) {
    if tool_output_cache.is_empty() {
        return;
    }
    conversation.push_str("\nassistant:\n### Tools Used Before Responding to Customer\n\n");
    for invocation in tool_output_cache {
        conversation.push_str(&format!("* {}: {}\n", invocation.tool, invocation.description));
    }
}
