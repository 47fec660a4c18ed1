//! LinguaBird - terminal client
//!
//! Drives the lesson session state machine from the command line.

#![warn(missing_docs)]

mod cli;
mod play;

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::{Cli, Command};
use linguabird::{
    AppConfig, Difficulty, FixtureLessonProvider, Language, LessonProvider, LlmClient,
    LlmLessonProvider, ProfileStore, SessionMachine, SqliteStore,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging()?;

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }
    if let Some(lesson_file) = cli.lesson_file {
        config = config.with_lesson_file(lesson_file);
    }

    match cli.command {
        Command::Play => run_play(config).await,
        Command::Profile => run_profile(config),
        Command::Lesson {
            language,
            difficulty,
        } => run_lesson(config, language, difficulty).await,
        Command::Languages => {
            for language in Language::catalog() {
                println!("{:<4}{}", language.code(), language);
            }
            Ok(())
        }
    }
}

/// Logs to a file so the terminal stays readable.
fn init_logging() -> Result<()> {
    let log_file = std::fs::File::create("linguabird.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Builds the lesson provider the configuration asks for.
#[instrument(skip(config))]
fn build_provider(config: &AppConfig) -> Result<Box<dyn LessonProvider>> {
    if let Some(path) = config.lesson_file() {
        info!(path = %path.display(), "Using lesson fixture");
        return Ok(Box::new(FixtureLessonProvider::new(path)));
    }
    let llm_config = config.create_llm_config()?;
    Ok(Box::new(LlmLessonProvider::new(LlmClient::new(llm_config))))
}

/// Opens the profile store at the configured path.
#[instrument(skip(config))]
fn open_store(config: &AppConfig) -> Result<ProfileStore> {
    let backend = SqliteStore::open(config.db_path().clone())
        .with_context(|| format!("opening profile database {}", config.db_path()))?;
    Ok(ProfileStore::new(backend))
}

/// Runs the interactive session.
#[instrument(skip(config))]
async fn run_play(config: AppConfig) -> Result<()> {
    let provider = build_provider(&config)?;
    let machine = SessionMachine::restore(open_store(&config)?, *config.rewards())?
        .with_request_timeout(config.request_timeout());
    info!(phase = %machine.phase_kind(), "Session restored");
    play::run(machine, provider.as_ref()).await
}

/// Prints the stored profile.
#[instrument(skip(config))]
fn run_profile(config: AppConfig) -> Result<()> {
    match open_store(&config)?.load()? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("No profile saved yet."),
    }
    Ok(())
}

/// Generates one lesson and prints it.
#[instrument(skip(config))]
async fn run_lesson(config: AppConfig, language: String, difficulty: String) -> Result<()> {
    let language = Language::by_code(&language)
        .ok_or_else(|| anyhow!("Unknown language code '{}'", language))?;
    let difficulty = Difficulty::from_str(&difficulty)
        .map_err(|_| anyhow!("Unknown difficulty '{}'", difficulty))?;
    let provider = build_provider(&config)?;
    let exercises = tokio::time::timeout(
        config.request_timeout(),
        provider.generate_lesson(language.name(), difficulty),
    )
    .await
    .map_err(|_| anyhow!("Lesson generation timed out"))??;
    println!("{}", serde_json::to_string_pretty(&exercises)?);
    Ok(())
}
