use std::io::{self, Write};

use serde::Deserialize;
use serde_json::Value;
use serde_json::error::Category;
use tracing::debug;

use crate::error::ChatError;

pub const REPLY_LABEL: &str = "Response from ChatGPT:";

// Every field is optional so that a reply of the wrong shape surfaces as
// `UnexpectedResponse` rather than a deserialization error. Only the first
// choice is typed; the rest are never inspected.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_first_content(self) -> Option<String> {
        let first = self.choices?.into_iter().next()?;
        Choice::deserialize(first).ok()?.message?.content
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Extracts `choices[0].message.content` from a chat completion reply.
pub fn extract_reply(body: &str) -> Result<String, ChatError> {
    let parsed = match serde_json::from_str::<ChatCompletionResponse>(body) {
        Ok(parsed) => parsed,
        Err(err) if err.classify() == Category::Data => {
            return Err(ChatError::UnexpectedResponse {
                body: body.to_string(),
            });
        }
        Err(err) => {
            return Err(ChatError::MalformedResponse {
                body: body.to_string(),
                source: err,
            });
        }
    };

    let content = parsed
        .into_first_content()
        .ok_or_else(|| ChatError::UnexpectedResponse {
            body: body.to_string(),
        })?;
    debug!(response_len = content.len(), "decoded chat completion reply");
    Ok(content)
}

/// Returns the provider's error message when `body` is an API error envelope.
pub fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

pub fn write_reply<W: Write>(out: &mut W, content: &str) -> io::Result<()> {
    writeln!(out, "{REPLY_LABEL}")?;
    writeln!(out, "{content}")
}
