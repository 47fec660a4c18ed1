//! Lessons read from a JSON file, for offline play.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::{Difficulty, Exercise, LessonProvider, ProviderError, parse_lesson};

/// [`LessonProvider`] that serves the same lesson file on every request.
///
/// The file is read on each call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FixtureLessonProvider {
    path: PathBuf,
}

impl FixtureLessonProvider {
    /// Serves lessons from `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The lesson file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LessonProvider for FixtureLessonProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn generate_lesson(
        &self,
        language_name: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<Exercise>, ProviderError> {
        debug!("Reading lesson fixture");
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ProviderError::new(format!(
                "Failed to read lesson file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let exercises = parse_lesson(&raw)?;
        info!(
            count = exercises.len(),
            language = language_name,
            difficulty = %difficulty,
            "Lesson fixture loaded"
        );
        Ok(exercises)
    }
}
