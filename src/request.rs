use serde::Serialize;
use tracing::debug;

use crate::error::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub store: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// A single-turn request; completions are always stored remotely.
    pub fn single_turn(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            store: true,
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

pub fn build_request_body(model: &str, prompt: &str) -> Result<Vec<u8>, ChatError> {
    let request = ChatRequest::single_turn(model, prompt);
    let body = serde_json::to_vec(&request)?;
    debug!(
        model = %model,
        prompt_len = prompt.len(),
        body_len = body.len(),
        "built chat completion request"
    );
    Ok(body)
}
