//! Lesson provider gateway: where generated lessons come from.

mod error;
mod fixture;
mod llm;
mod parse;

use async_trait::async_trait;

use crate::{Difficulty, Exercise};

pub use error::ProviderError;
pub use fixture::FixtureLessonProvider;
pub use llm::LlmLessonProvider;
pub use parse::parse_lesson;

/// Asynchronous source of lessons.
///
/// On success the returned sequence is non-empty and every exercise
/// conforms to the wire schema; anything else is an error.
#[async_trait]
pub trait LessonProvider: Send + Sync {
    /// Generates a lesson for `language_name` at `difficulty`.
    async fn generate_lesson(
        &self,
        language_name: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Exercise>, ProviderError>;
}
