//! The ordered exercise list of one lesson and its cursor.

use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

use crate::{Difficulty, Exercise, Language};

/// Result of moving the cursor forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the next exercise.
    Continuing,
    /// There was no next exercise; the lesson is over.
    Exhausted,
}

/// Raised when a lesson would be created without exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Lesson contains no exercises")]
pub struct EmptyLessonError;

/// Percentage of a lesson already passed when standing at `index`.
///
/// A zero-length lesson reports 0 rather than dividing by zero.
pub fn progress_percent(index: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    100.0 * index as f64 / len as f64
}

/// An active lesson.
///
/// The exercise list is fixed at construction and never empty, so the
/// cursor always points at a real exercise until [`Advance::Exhausted`] is
/// reported.
#[derive(Debug, Clone)]
pub struct LessonSession {
    exercises: Vec<Exercise>,
    index: usize,
    exhausted: bool,
    language: Language,
    difficulty: Difficulty,
}

impl LessonSession {
    /// Starts a lesson at the first exercise.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyLessonError`] if `exercises` is empty.
    #[instrument(skip(exercises), fields(count = exercises.len(), language = %language.name()))]
    pub fn new(
        exercises: Vec<Exercise>,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<Self, EmptyLessonError> {
        if exercises.is_empty() {
            warn!("Refusing to start an empty lesson");
            return Err(EmptyLessonError);
        }
        debug!("Lesson session created");
        Ok(Self {
            exercises,
            index: 0,
            exhausted: false,
            language,
            difficulty,
        })
    }

    /// The exercise under the cursor, or `None` once the lesson is exhausted.
    pub fn current(&self) -> Option<&Exercise> {
        if self.exhausted {
            return None;
        }
        self.exercises.get(self.index)
    }

    /// Moves to the next exercise or reports that none is left.
    ///
    /// Calling again after [`Advance::Exhausted`] keeps returning
    /// `Exhausted` without moving the cursor.
    #[instrument(skip(self), fields(index = self.index, len = self.exercises.len()))]
    pub fn advance(&mut self) -> Advance {
        if self.exhausted {
            warn!("Advance called on an exhausted lesson");
            return Advance::Exhausted;
        }
        if self.index + 1 < self.exercises.len() {
            self.index += 1;
            debug!(index = self.index, "Advanced to next exercise");
            Advance::Continuing
        } else {
            self.exhausted = true;
            debug!("Lesson exhausted");
            Advance::Exhausted
        }
    }

    /// Zero-based cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of exercises in the lesson.
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the lesson has no exercises; `false` for any constructed session.
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Whether [`advance`](Self::advance) has reported the end.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Progress through the lesson, 0 to 100.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.index, self.exercises.len())
    }

    /// All exercises in order.
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Language being studied.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Difficulty the lesson was generated for.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}
