//! The top-level phase controller.

mod error;
mod machine;
mod phase;

pub use error::SessionError;
pub use machine::{LessonTicket, SessionMachine};
pub use phase::{ActiveLesson, Intent, PendingLesson, Phase, PhaseKind};
