//! Exercise records delivered by the lesson provider.
//!
//! Exercises are immutable once received: every field is private and only
//! exposed through getters. The optional fields are filled in with the
//! `with_*` setters when building fixtures.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// The five stages of a lesson, in the order the provider emits them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    /// Observe a new word or phrase with its audio.
    Learn,
    /// Recognise something by ear.
    Listen,
    /// Recognition drill, usually multiple choice.
    Practice,
    /// Simple translation.
    Translate,
    /// Pronunciation.
    Speak,
}

/// A single learning task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", strip_option, into)]
pub struct Exercise {
    #[setters(skip)]
    id: String,
    #[serde(rename = "type")]
    #[setters(skip)]
    kind: ExerciseType,
    #[setters(skip)]
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl Exercise {
    /// Creates an exercise with only the required fields set.
    #[instrument(skip(id, prompt))]
    pub fn new(id: impl Into<String>, kind: ExerciseType, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            prompt: prompt.into(),
            target_text: None,
            audio_text: None,
            options: None,
            explanation: None,
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_type_and_camel_case() {
        let json = r#"{
            "id": "ex-1",
            "type": "TRANSLATE",
            "prompt": "Traduza: cachorro",
            "targetText": "dog",
            "options": ["dog", "cat"]
        }"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(*exercise.kind(), ExerciseType::Translate);
        assert_eq!(exercise.target_text().as_deref(), Some("dog"));
        assert_eq!(exercise.options().as_ref().map(Vec::len), Some(2));
        assert!(exercise.explanation().is_none());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{"id": "x", "type": "DANCE", "prompt": "?"}"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn kind_displays_in_wire_case() {
        assert_eq!(ExerciseType::Speak.to_string(), "SPEAK");
    }
}
