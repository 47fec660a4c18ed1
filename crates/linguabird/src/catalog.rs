//! Learnable languages and lesson difficulty levels.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Built-in languages as `(code, name, flag)`.
const LANGUAGES: [(&str, &str, &str); 6] = [
    ("en", "Inglês", "🇺🇸"),
    ("es", "Espanhol", "🇪🇸"),
    ("fr", "Francês", "🇫🇷"),
    ("de", "Alemão", "🇩🇪"),
    ("it", "Italiano", "🇮🇹"),
    ("ja", "Japonês", "🇯🇵"),
];

/// A language the learner can study.
///
/// `name` is the display name handed to the lesson provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Language {
    code: String,
    name: String,
    flag: String,
}

impl Language {
    /// Returns the built-in language catalog in display order.
    #[instrument]
    pub fn catalog() -> Vec<Language> {
        LANGUAGES
            .iter()
            .map(|(code, name, flag)| {
                Language::new(code.to_string(), name.to_string(), flag.to_string())
            })
            .collect()
    }

    /// Looks up a catalog language by its ISO code (case-insensitive).
    #[instrument]
    pub fn by_code(code: &str) -> Option<Language> {
        Self::catalog()
            .into_iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.flag, self.name)
    }
}

/// Lesson difficulty, labelled the way the provider expects it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Beginner lessons.
    #[default]
    #[serde(rename = "Fácil")]
    #[strum(to_string = "Fácil", serialize = "facil", serialize = "easy")]
    Easy,
    /// Intermediate lessons.
    #[serde(rename = "Médio")]
    #[strum(to_string = "Médio", serialize = "medio", serialize = "medium")]
    Medium,
    /// Advanced lessons.
    #[serde(rename = "Difícil")]
    #[strum(to_string = "Difícil", serialize = "dificil", serialize = "hard")]
    Hard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        let lang = Language::by_code("JA").expect("japanese in catalog");
        assert_eq!(lang.name(), "Japonês");
        assert!(Language::by_code("xx").is_none());
    }

    #[test]
    fn difficulty_labels_parse_back() {
        for difficulty in Difficulty::iter() {
            let label = difficulty.to_string();
            assert_eq!(Difficulty::from_str(&label).unwrap(), difficulty);
        }
        assert_eq!(Difficulty::from_str("medium").unwrap(), Difficulty::Medium);
    }

    #[test]
    fn difficulty_serializes_as_label() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"Difícil\"");
    }
}
