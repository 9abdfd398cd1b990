pub mod cli;
pub mod config;
pub mod error;
mod http_errors;
pub mod logging;
pub mod request;
pub mod response;
#[cfg(test)]
mod test_support;
pub mod transport;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use tracing::info;

use cli::Cli;
use config::{Config, KeySource};
use error::ChatError;
use transport::{ChatClient, ensure_success};

/// Sends `prompt` as a single-turn chat completion and returns the reply text.
pub async fn ask(http: &Client, cfg: &Config, prompt: &str) -> Result<String, ChatError> {
    let body = request::build_request_body(&cfg.model, prompt)?;
    let raw = ChatClient::new(http, cfg).send(body).await?;
    let reply_body = ensure_success(raw)?;
    response::extract_reply(&reply_body)
}

/// Runs one invocation. `.env` must already have been loaded so the key's
/// provenance is known.
pub async fn run(key_source: KeySource) -> Result<()> {
    let cli = Cli::parse();
    let prompt = cli.prompt()?;

    let cfg = Config::from_env(key_source)?;

    let mut stdout = io::stdout();
    cfg.write_summary(&mut stdout)
        .context("Failed to write configuration summary")?;

    let http = Client::builder()
        .build()
        .context("Failed to initialize HTTP client")?;
    let reply = ask(&http, &cfg, prompt).await?;
    info!(model = %cfg.model, reply_len = reply.len(), "received reply");

    response::write_reply(&mut stdout, &reply).context("Failed to write reply")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
