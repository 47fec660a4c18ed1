//! Lessons generated by a chat model.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::{Difficulty, Exercise, LessonProvider, LlmClient, ProviderError, parse_lesson};

const SYSTEM_PROMPT: &str = "\
You are LinguaBird, a language tutor for Portuguese speakers. \
Create one short lesson as a JSON array of 5 to 8 exercises and reply with the JSON only. \
Follow the teaching path LEARN, LISTEN, PRACTICE, TRANSLATE, SPEAK: \
first present new words, then recognise them by ear, then drill them, \
then translate simple sentences, then pronounce them. \
Each exercise is an object with the fields: \
\"id\" (unique string), \
\"type\" (one of LEARN, LISTEN, PRACTICE, TRANSLATE, SPEAK), \
\"prompt\" (instruction in Portuguese), \
\"targetText\" (text in the studied language, optional), \
\"audioText\" (text to be spoken aloud, optional), \
\"options\" (array of answer choices, optional), \
\"explanation\" (short explanation in Portuguese shown after a mistake, optional), \
\"context\" (usage context, optional).";

/// [`LessonProvider`] backed by an [`LlmClient`].
#[derive(Debug, Clone)]
pub struct LlmLessonProvider {
    client: LlmClient,
}

impl LlmLessonProvider {
    /// Wraps a configured client.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// The user message sent for one lesson request.
    fn user_message(language_name: &str, difficulty: Difficulty) -> String {
        format!(
            "Idioma: {}. Dificuldade: {}. Gere a lição agora.",
            language_name, difficulty
        )
    }
}

#[async_trait]
impl LessonProvider for LlmLessonProvider {
    #[instrument(skip(self))]
    async fn generate_lesson(
        &self,
        language_name: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Exercise>, ProviderError> {
        let reply = self
            .client
            .generate(SYSTEM_PROMPT, &Self::user_message(language_name, difficulty))
            .await?;
        let exercises = parse_lesson(&reply)?;
        info!(count = exercises.len(), "Lesson generated");
        Ok(exercises)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_names_language_and_difficulty() {
        let message = LlmLessonProvider::user_message("Francês", Difficulty::Medium);
        assert!(message.contains("Francês"));
        assert!(message.contains("Médio"));
    }
}
