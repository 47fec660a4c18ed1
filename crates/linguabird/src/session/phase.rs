//! Phase and intent types for the session state machine.
//!
//! Each phase variant carries exactly the data that phase needs, so a
//! lesson without exercises or a completion screen without a tally cannot
//! be built.

use derive_getters::Getters;
use strum::{Display, EnumDiscriminants, IntoStaticStr};
use tracing::instrument;

use crate::{
    Difficulty, FeedbackEvent, Language, LessonSession, LessonSummary, PartialStats,
};

/// A lesson request that has been sent but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PendingLesson {
    generation: u64,
    language: Language,
    difficulty: Difficulty,
}

impl PendingLesson {
    pub(crate) fn new(generation: u64, language: Language, difficulty: Difficulty) -> Self {
        Self {
            generation,
            language,
            difficulty,
        }
    }

    pub(crate) fn into_parts(self) -> (Language, Difficulty) {
        (self.language, self.difficulty)
    }
}

/// State of the lesson phase.
#[derive(Debug, Clone, Getters)]
pub struct ActiveLesson {
    session: LessonSession,
    feedback: Option<FeedbackEvent>,
    summary: LessonSummary,
}

impl ActiveLesson {
    #[instrument(skip(session), fields(len = session.len()))]
    pub(crate) fn new(session: LessonSession) -> Self {
        let summary = LessonSummary::new(session.len());
        Self {
            session,
            feedback: None,
            summary,
        }
    }

    pub(crate) fn session_mut(&mut self) -> &mut LessonSession {
        &mut self.session
    }

    pub(crate) fn summary_mut(&mut self) -> &mut LessonSummary {
        &mut self.summary
    }

    pub(crate) fn set_feedback(&mut self, feedback: Option<FeedbackEvent>) {
        self.feedback = feedback;
    }
}

/// The application's top-level mode. Exactly one is active.
#[derive(Debug, Clone, EnumDiscriminants)]
#[strum_discriminants(name(PhaseKind), derive(Display, Hash))]
pub enum Phase {
    /// Welcome screen before onboarding.
    Start,
    /// Picking a language and profile details.
    Onboarding,
    /// Home screen; `pending` is set while a lesson is loading.
    Dashboard {
        /// The outstanding lesson request, if any.
        pending: Option<PendingLesson>,
    },
    /// Learner profile view.
    Profile,
    /// Working through a lesson.
    Lesson(ActiveLesson),
    /// Lesson finished; carries what it earned.
    Completed(LessonSummary),
}

impl Phase {
    /// The dashboard with nothing loading.
    pub fn dashboard() -> Self {
        Self::Dashboard { pending: None }
    }

    /// The phase's kind without its data.
    pub fn kind(&self) -> PhaseKind {
        PhaseKind::from(self)
    }
}

/// Synchronous learner actions accepted by
/// [`SessionMachine::apply`](crate::SessionMachine::apply).
///
/// Lesson requests are asynchronous and go through
/// [`SessionMachine::request_lesson`](crate::SessionMachine::request_lesson).
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    /// Start → Onboarding.
    Begin,
    /// Onboarding → Dashboard, saving the profile.
    CompleteOnboarding {
        /// Language chosen by the learner.
        language: Language,
        /// Values to merge into the ledger.
        partial: PartialStats,
    },
    /// Dashboard → Onboarding to pick another language.
    ChangeLanguage,
    /// Dashboard → Profile.
    OpenProfile,
    /// Profile → Dashboard.
    CloseProfile,
    /// Answer the current exercise.
    SubmitAnswer {
        /// Whether the learner got it right.
        correct: bool,
    },
    /// Dismiss feedback and move on.
    Continue,
    /// Lesson or Completed → Dashboard.
    ExitLesson,
    /// Any phase → Start.
    Reset,
}

impl Intent {
    /// Snake-case name used in logs and errors.
    pub fn label(&self) -> &'static str {
        self.into()
    }
}
