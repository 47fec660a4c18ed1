//! Validation of raw lesson payloads.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{Exercise, ProviderError};

/// Accepted payload shapes: a bare array or `{"exercises": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LessonPayload {
    Bare(Vec<Exercise>),
    Wrapped { exercises: Vec<Exercise> },
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses and validates a lesson payload.
///
/// # Errors
///
/// Returns [`ProviderError`] if the text is not a lesson, the lesson is
/// empty, an exercise has a blank prompt, or two exercises share an id.
#[instrument(skip(raw), fields(raw_length = raw.len()))]
pub fn parse_lesson(raw: &str) -> Result<Vec<Exercise>, ProviderError> {
    let payload: LessonPayload = serde_json::from_str(strip_code_fence(raw))?;
    let exercises = match payload {
        LessonPayload::Bare(exercises) | LessonPayload::Wrapped { exercises } => exercises,
    };

    if exercises.is_empty() {
        return Err(ProviderError::new("Lesson contains no exercises"));
    }

    let mut seen = HashSet::new();
    for exercise in &exercises {
        if exercise.prompt().trim().is_empty() {
            return Err(ProviderError::new(format!(
                "Exercise '{}' has an empty prompt",
                exercise.id()
            )));
        }
        if !seen.insert(exercise.id().as_str()) {
            return Err(ProviderError::new(format!(
                "Duplicate exercise id '{}'",
                exercise.id()
            )));
        }
    }

    debug!(count = exercises.len(), "Lesson payload validated");
    Ok(exercises)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fence_with_info_string_is_stripped() {
        let raw = "```json\n[1, 2]\n```";
        assert_eq!(strip_code_fence(raw), "[1, 2]");
    }

    #[test]
    fn unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fence("  []\n"), "[]");
    }
}
