use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(
        "No content provided. Use -c flag to specify the content, e.g., askgpt -c \"your request here\""
    )]
    MissingPrompt,

    #[error("API key not found in environment variables. Please set OPENAI_API_KEY.")]
    MissingApiKey,

    #[error("Error marshaling request body")]
    Serialization(#[from] serde_json::Error),

    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned an error: {status}\nResponse: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Error unmarshaling response JSON (response: {body})")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response structure: {body}")]
    UnexpectedResponse { body: String },
}
