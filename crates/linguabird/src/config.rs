//! Application configuration loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{LlmConfig, LlmProvider, RewardPolicy};

/// Runtime settings for the client.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the learner profile.
    db_path: String,

    /// Chat model vendor used for lesson generation.
    llm_provider: LlmProvider,

    /// Model name (e.g. "gemini-2.5-flash", "gpt-4o-mini").
    llm_model: String,

    /// Maximum tokens for one lesson reply.
    llm_max_tokens: u32,

    /// Upper bound on one lesson request, in seconds.
    request_timeout_secs: u64,

    /// Serve lessons from this JSON file instead of calling a model.
    lesson_file: Option<PathBuf>,

    /// Reward constants.
    rewards: RewardPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "linguabird.db".to_string(),
            llm_provider: LlmProvider::Gemini,
            llm_model: "gemini-2.5-flash".to_string(),
            llm_max_tokens: 4096,
            request_timeout_secs: 60,
            lesson_file: None,
            rewards: RewardPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content), fields(content_length = content.len()))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            provider = %config.llm_provider,
            model = %config.llm_model,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the database path.
    #[instrument(skip(self))]
    pub fn with_db_path(mut self, db_path: String) -> Self {
        self.db_path = db_path;
        self
    }

    /// Replaces the lesson file.
    #[instrument(skip(self))]
    pub fn with_lesson_file(mut self, lesson_file: PathBuf) -> Self {
        self.lesson_file = Some(lesson_file);
        self
    }

    /// Provider call timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Creates LLM configuration for the configured vendor.
    ///
    /// Requires the vendor's API key variable (`GEMINI_API_KEY`,
    /// `OPENAI_API_KEY` or `ANTHROPIC_API_KEY`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key variable is not set.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let var = self.llm_provider.api_key_var();
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
