//! Response types returned by `ChatModel` implementations.

use crate::Message;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token/cost accounting for a single chat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Tokens spent on hidden reasoning, when the provider reports it separately.
    pub reasoning_tokens: Option<u32>,
    pub total_tokens: u32,
}

/// Captured "thinking" content for reasoning-capable models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningContent {
    pub content: String,
    pub tokens: Option<u32>,
}

/// A complete, non-streamed response from `ChatModel::chat`.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub message: Message,
    pub usage: Option<UsageMetadata>,
    pub reasoning: Option<ReasoningContent>,
    /// Provider-specific extras (raw finish reason, request id, etc.).
    pub metadata: HashMap<String, serde_json::Value>,
}

/// One piece of a streamed response.
#[derive(Debug, Clone, Default)]
pub struct MessageChunk {
    pub content: String,
    pub reasoning: Option<String>,
    pub is_final: bool,
}

/// A streamed response from `ChatModel::stream`.
///
/// The final usage is not known until the stream is exhausted, so it is
/// delivered out of band by implementations (e.g. attached to the last chunk's
/// metadata) rather than modeled as a separate field here.
pub struct ChatStreamResponse {
    pub stream: BoxStream<'static, crate::error::Result<MessageChunk>>,
}

impl std::fmt::Debug for ChatStreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStreamResponse").finish_non_exhaustive()
    }
}
