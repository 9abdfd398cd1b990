use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ChatError;
use crate::http_errors::{api_request_error, body_read_error};
use crate::response::api_error_message;

/// Status and fully-read body of a chat completion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

pub struct ChatClient<'a> {
    http: &'a Client,
    cfg: &'a Config,
}

impl<'a> ChatClient<'a> {
    pub fn new(http: &'a Client, cfg: &'a Config) -> Self {
        Self { http, cfg }
    }

    /// Posts a serialized request body to the configured endpoint.
    ///
    /// No retry is attempted; the body is read to the end before returning so
    /// the connection is released on every path.
    pub async fn send(&self, body: Vec<u8>) -> Result<RawResponse, ChatError> {
        let api_url = &self.cfg.api_url;
        debug!(
            api_url = %api_url,
            model = %self.cfg.model,
            body_len = body.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.cfg.api_key))
            .body(body)
            .send()
            .await
            .map_err(|err| {
                warn!(
                    api_url = %api_url,
                    model = %self.cfg.model,
                    error = %err,
                    "chat completion request failed"
                );
                api_request_error(err, api_url)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| body_read_error(err, api_url))?;
        debug!(
            api_url = %api_url,
            status = %status,
            response_body_len = body.len(),
            "received chat completion response"
        );

        Ok(RawResponse { status, body })
    }
}

/// Rejects every status other than `200 OK`, keeping the raw body for the operator.
pub fn ensure_success(raw: RawResponse) -> Result<String, ChatError> {
    if raw.status == StatusCode::OK {
        return Ok(raw.body);
    }

    let api_message = api_error_message(&raw.body);
    warn!(
        status = %raw.status,
        response_body_len = raw.body.len(),
        api_error = api_message.as_deref().unwrap_or("<none>"),
        "chat completion API returned non-success status"
    );
    Err(ChatError::Status {
        status: raw.status,
        body: raw.body,
    })
}
