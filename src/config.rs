use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::ChatError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const API_MODEL_VAR: &str = "OPENAI_API_MODEL";
pub const API_URL_VAR: &str = "OPENAI_API_URL";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

const KEY_MASK: &str = "***";
const KEY_VISIBLE_CHARS: usize = 4;

/// Where the API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    DotenvFile,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment variable",
            Self::DotenvFile => ".env file",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_key_source: KeySource,
    pub model: String,
    pub model_is_default: bool,
    pub api_url: String,
}

impl Config {
    pub fn from_env(api_key_source: KeySource) -> Result<Self, ChatError> {
        Self::from_env_with(|key| env::var(key).ok(), api_key_source)
    }

    pub fn from_env_with(
        mut get_var: impl FnMut(&str) -> Option<String>,
        api_key_source: KeySource,
    ) -> Result<Self, ChatError> {
        let api_key = non_blank(get_var(API_KEY_VAR)).ok_or(ChatError::MissingApiKey)?;

        let (model, model_is_default) = match non_blank(get_var(API_MODEL_VAR)) {
            Some(model) => (model, false),
            None => (DEFAULT_MODEL.to_string(), true),
        };
        let api_url = non_blank(get_var(API_URL_VAR)).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        info!(
            model = %model,
            model_is_default,
            api_url = %api_url,
            api_key_source = api_key_source.as_str(),
            "loaded runtime configuration"
        );

        Ok(Self {
            api_key,
            api_key_source,
            model,
            model_is_default,
            api_url,
        })
    }

    /// Writes the operator-facing summary: masked key, its origin and the model in use.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Got API key {} from {}",
            mask_key(&self.api_key),
            self.api_key_source.as_str()
        )?;
        if self.model_is_default {
            writeln!(
                out,
                "Using default model: {} (no model found in .env file or environment variable)",
                self.model
            )
        } else {
            writeln!(out, "Using model: {}", self.model)
        }
    }
}

#[derive(Debug)]
enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Failed(dotenvy::Error),
}

/// Result of loading `.env`, kept so it can be logged once tracing is up.
#[derive(Debug)]
pub struct DotenvLoad {
    outcome: DotenvOutcome,
    key_source: KeySource,
}

impl DotenvLoad {
    pub fn key_source(&self) -> KeySource {
        self.key_source
    }

    pub fn log(&self) {
        match &self.outcome {
            DotenvOutcome::Loaded(path) => {
                info!(path = %path.display(), "loaded .env file");
            }
            DotenvOutcome::NotFound => {
                info!("no .env file found, proceeding with existing environment variables");
            }
            DotenvOutcome::Failed(err) => {
                warn!(
                    error = %err,
                    "failed to load .env file, proceeding with existing environment variables"
                );
            }
        }
    }
}

/// Loads `.env` into the process environment without overriding existing
/// variables, and records where the API key comes from.
///
/// Runs before logging is initialised so that `RUST_LOG` and `LOG_*` may be
/// set from the file; call [`DotenvLoad::log`] afterwards.
pub fn load_dotenv() -> DotenvLoad {
    let key_was_set = env::var_os(API_KEY_VAR).is_some_and(|value| !value.is_empty());

    let outcome = match dotenvy::dotenv() {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(err) if err.not_found() => DotenvOutcome::NotFound,
        Err(err) => DotenvOutcome::Failed(err),
    };

    let key_is_set = env::var_os(API_KEY_VAR).is_some_and(|value| !value.is_empty());
    DotenvLoad {
        outcome,
        key_source: key_source(key_was_set, key_is_set),
    }
}

fn key_source(set_before_dotenv: bool, set_after_dotenv: bool) -> KeySource {
    if !set_before_dotenv && set_after_dotenv {
        KeySource::DotenvFile
    } else {
        KeySource::Environment
    }
}

/// Masks a credential down to its last four characters.
///
/// Keys too short to hide anything are masked completely.
pub fn mask_key(key: &str) -> String {
    let char_count = key.chars().count();
    if char_count <= KEY_VISIBLE_CHARS {
        return KEY_MASK.to_string();
    }

    let visible: String = key.chars().skip(char_count - KEY_VISIBLE_CHARS).collect();
    format!("{KEY_MASK}{visible}")
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}
