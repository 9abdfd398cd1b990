use std::error::Error as StdError;
use std::io::ErrorKind;

use crate::error::ChatError;

fn error_chain_has_io_kind(err: &(dyn StdError + 'static), kind: ErrorKind, text: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(text) {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::ConnectionRefused, "connection refused")
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    error_chain_has_io_kind(err, ErrorKind::TimedOut, "timed out")
}

fn transport(message: String, source: reqwest::Error) -> ChatError {
    ChatError::Transport { message, source }
}

pub(crate) fn api_request_error(err: reqwest::Error, api_url: &str) -> ChatError {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        return transport(
            format!(
                "Chat completion request timed out while calling '{}'. \
                 Check network connectivity and try again.",
                api_url
            ),
            err,
        );
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return transport(
                format!(
                    "Connection refused by chat completion API at '{}'. \
                     Check OPENAI_API_URL.",
                    api_url
                ),
                err,
            );
        }

        return transport(
            format!(
                "Failed to connect to chat completion API at '{}'. \
                 Check OPENAI_API_URL and network connectivity.",
                api_url
            ),
            err,
        );
    }

    transport(
        format!("Error making API request to '{}'", api_url),
        err,
    )
}

pub(crate) fn body_read_error(err: reqwest::Error, api_url: &str) -> ChatError {
    transport(
        format!("Error reading response body from '{}'", api_url),
        err,
    )
}
