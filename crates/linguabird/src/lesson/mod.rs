//! Lesson sequencing: the active exercise list, its cursor and the running tally.

mod sequencer;
mod summary;

pub use sequencer::{Advance, EmptyLessonError, LessonSession, progress_percent};
pub use summary::LessonSummary;
