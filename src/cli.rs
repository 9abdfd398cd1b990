use clap::Parser;

use crate::error::ChatError;

#[derive(Debug, Parser)]
#[clap(
    name = "askgpt",
    version,
    about = "Sends a single prompt to the OpenAI chat completion API and prints the reply."
)]
pub struct Cli {
    #[clap(
        short('c'),
        long("content"),
        value_name = "TEXT",
        help = "Content for the request"
    )]
    pub content: Option<String>,
}

impl Cli {
    /// The prompt to send, exactly as given on the command line.
    pub fn prompt(&self) -> Result<&str, ChatError> {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => Ok(content),
            _ => Err(ChatError::MissingPrompt),
        }
    }
}
