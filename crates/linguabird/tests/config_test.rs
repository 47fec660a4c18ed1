//! Tests for configuration loading.

use std::io::Write;
use std::time::Duration;

use linguabird::{AppConfig, LlmProvider};
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.db_path(), "linguabird.db");
    assert_eq!(*config.llm_provider(), LlmProvider::Gemini);
    assert_eq!(config.request_timeout(), Duration::from_secs(60));
    assert!(config.lesson_file().is_none());
    assert_eq!(config.rewards().xp_per_correct, 10);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml(
        r#"
        llm_provider = "anthropic"
        llm_model = "claude-3-5-haiku-20241022"

        [rewards]
        coins_per_correct = 5
        "#,
    )
    .expect("Parse failed");

    assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
    assert_eq!(config.llm_model(), "claude-3-5-haiku-20241022");
    assert_eq!(config.db_path(), "linguabird.db");
    assert_eq!(config.rewards().coins_per_correct, 5);
    assert_eq!(config.rewards().xp_per_correct, 10);
    assert_eq!(config.rewards().max_hearts, 5);
}

#[test]
fn test_openai_provider_name() {
    let config = AppConfig::from_toml(r#"llm_provider = "openai""#).expect("Parse failed");
    assert_eq!(*config.llm_provider(), LlmProvider::OpenAI);
    assert_eq!(config.llm_provider().api_key_var(), "OPENAI_API_KEY");
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(AppConfig::from_toml("llm_provider = \"parrot\"").is_err());
    assert!(AppConfig::from_toml("request_timeout_secs = \"soon\"").is_err());
}

#[test]
fn test_load_from_file_and_overrides() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "request_timeout_secs = 5").expect("Write failed");
    writeln!(file, "lesson_file = \"lesson.json\"").expect("Write failed");

    let config = AppConfig::load_or_default(file.path())
        .expect("Load failed")
        .with_db_path("other.db".to_string());
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
    assert_eq!(
        config.lesson_file().as_deref(),
        Some(std::path::Path::new("lesson.json"))
    );
    assert_eq!(config.db_path(), "other.db");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = AppConfig::load_or_default("/nonexistent/linguabird.toml").expect("Load failed");
    assert_eq!(config.llm_model(), "gemini-2.5-flash");
}
