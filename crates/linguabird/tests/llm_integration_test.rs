//! Live lesson generation against the configured vendors.
//!
//! Ignored unless built with `--features api`.

use linguabird::{
    Difficulty, LessonProvider, LlmClient, LlmConfig, LlmLessonProvider, LlmProvider,
};
use tracing::instrument;

fn provider_for(vendor: LlmProvider, model: &str) -> LlmLessonProvider {
    dotenvy::dotenv().ok();
    let api_key = std::env::var(vendor.api_key_var())
        .unwrap_or_else(|_| panic!("{} not set", vendor.api_key_var()));
    let config = LlmConfig::new(vendor, api_key, model.to_string(), 4096);
    LlmLessonProvider::new(LlmClient::new(config))
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_gemini_lesson() {
    let provider = provider_for(LlmProvider::Gemini, "gemini-2.5-flash");
    let exercises = provider
        .generate_lesson("Inglês", Difficulty::Easy)
        .await
        .expect("Failed to generate");
    assert!(!exercises.is_empty());
    eprintln!("Generated {} exercises", exercises.len());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_lesson() {
    let provider = provider_for(LlmProvider::OpenAI, "gpt-4o-mini");
    let exercises = provider
        .generate_lesson("Espanhol", Difficulty::Medium)
        .await
        .expect("Failed to generate");
    assert!(!exercises.is_empty());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_lesson() {
    let provider = provider_for(LlmProvider::Anthropic, "claude-3-5-haiku-20241022");
    let exercises = provider
        .generate_lesson("Francês", Difficulty::Easy)
        .await
        .expect("Failed to generate");
    assert!(!exercises.is_empty());
}
