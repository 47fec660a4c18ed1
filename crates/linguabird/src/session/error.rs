//! Errors for rejected intents.

use derive_more::{Display, Error, From};

use crate::{PhaseKind, ProviderError, StoreError};

/// Why the state machine refused an intent or a lesson result.
///
/// A rejected intent never changes state.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// The intent has no transition from the current phase.
    #[display("Cannot {action} while in {phase}")]
    IllegalTransition {
        /// Phase the machine was in.
        phase: PhaseKind,
        /// Rejected action.
        action: &'static str,
    },
    /// A lesson request is still loading.
    #[display("A lesson is still loading")]
    LessonPending,
    /// The current exercise already has an answer.
    #[display("The current exercise was already answered")]
    FeedbackPending,
    /// Continue was requested before answering.
    #[display("The current exercise has not been answered")]
    NoFeedback,
    /// No exercise is under the cursor.
    #[display("No exercise is active")]
    NoActiveExercise,
    /// A lesson result arrived for a request that is no longer current.
    #[display("Discarded stale lesson response (generation {generation})")]
    StaleResponse {
        /// Generation of the discarded request.
        generation: u64,
    },
    /// The lesson provider failed.
    #[display("{_0}")]
    #[from]
    Provider(ProviderError),
    /// Persisting the profile failed.
    #[display("{_0}")]
    #[from]
    Store(StoreError),
}
