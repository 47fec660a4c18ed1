//! Session state machine: phase transitions, answer handling and lesson loading.

use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::session::phase::{ActiveLesson, PendingLesson};
use crate::{
    Advance, AnswerEvaluator, Difficulty, Exercise, FeedbackEvent, Intent, Language,
    LessonProvider, LessonSession, LessonSummary, PartialStats, Phase, PhaseKind, ProfileRecord,
    ProfileStore, ProviderError, RewardPolicy, SessionError, StatsLedger, StoreError, mascot_line,
};

/// Handle for one in-flight lesson request.
///
/// Only the ticket of the newest request can resolve it; older tickets are
/// rejected as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonTicket {
    generation: u64,
}

impl LessonTicket {
    /// Monotonic request number.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the ledger, the active lesson and the profile store, and moves
/// between phases in response to intents.
///
/// Intents are processed one at a time. A rejected intent leaves every
/// piece of state untouched.
#[derive(Debug)]
pub struct SessionMachine {
    phase: Phase,
    ledger: StatsLedger,
    language: Option<Language>,
    evaluator: AnswerEvaluator,
    store: ProfileStore,
    generation: u64,
    request_timeout: Option<Duration>,
}

impl SessionMachine {
    /// A first-run machine: default ledger, phase Start.
    #[instrument(skip(store))]
    pub fn new(store: ProfileStore, policy: RewardPolicy) -> Self {
        info!("Creating SessionMachine");
        Self {
            phase: Phase::Start,
            ledger: StatsLedger::default().normalized(policy.max_hearts),
            language: None,
            evaluator: AnswerEvaluator::new(policy),
            store,
            generation: 0,
            request_timeout: None,
        }
    }

    /// Builds a machine from whatever profile the store holds.
    ///
    /// A stored profile puts the machine on the dashboard with the saved
    /// ledger and language; a missing or corrupted one starts fresh.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    #[instrument(skip(store))]
    pub fn restore(store: ProfileStore, policy: RewardPolicy) -> Result<Self, StoreError> {
        let record = store.load()?;
        let mut machine = Self::new(store, policy);
        if let Some(record) = record {
            info!(language = %record.language().name(), "Restoring saved profile");
            machine.ledger = record.stats().normalized(policy.max_hearts);
            machine.language = Some(record.language().clone());
            machine.phase = Phase::dashboard();
        }
        Ok(machine)
    }

    /// Bounds every provider call made by [`request_lesson`](Self::request_lesson).
    #[instrument(skip(self))]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Current phase with its data.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current phase kind.
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Current ledger snapshot.
    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Active language, once onboarding has chosen one.
    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    /// Reward policy in force.
    pub fn policy(&self) -> &RewardPolicy {
        self.evaluator.policy()
    }

    /// The profile store.
    pub fn profile_store(&self) -> &ProfileStore {
        &self.store
    }

    /// Whether a lesson request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Dashboard { pending: Some(_) })
    }

    /// The active lesson, if in the Lesson phase.
    pub fn active_lesson(&self) -> Option<&ActiveLesson> {
        match &self.phase {
            Phase::Lesson(active) => Some(active),
            _ => None,
        }
    }

    /// The exercise on screen, if any.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.active_lesson().and_then(|a| a.session().current())
    }

    /// Feedback for the current exercise, between answer and continue.
    pub fn feedback(&self) -> Option<&FeedbackEvent> {
        self.active_lesson().and_then(|a| a.feedback().as_ref())
    }

    /// Tally of the finished lesson, in the Completed phase.
    pub fn completed_summary(&self) -> Option<&LessonSummary> {
        match &self.phase {
            Phase::Completed(summary) => Some(summary),
            _ => None,
        }
    }

    /// Lesson progress for the header bar.
    ///
    /// 0 outside a lesson, 100 once it is completed.
    pub fn progress_percent(&self) -> f64 {
        match &self.phase {
            Phase::Lesson(active) => active.session().progress_percent(),
            Phase::Completed(_) => 100.0,
            _ => 0.0,
        }
    }

    /// Mascot line for the current exercise.
    pub fn mascot_line(&self) -> &'static str {
        mascot_line(self.current_exercise())
    }

    /// Applies a synchronous intent and returns the resulting phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the intent is not valid in the current
    /// phase, a lesson is loading, or the profile cannot be saved. State is
    /// unchanged on error.
    #[instrument(skip(self, intent), fields(phase = %self.phase.kind(), intent = intent.label()))]
    pub fn apply(&mut self, intent: Intent) -> Result<PhaseKind, SessionError> {
        if self.is_loading() {
            warn!("Intent rejected while a lesson is loading");
            return Err(SessionError::LessonPending);
        }

        let action = intent.label();
        match (self.phase.kind(), intent) {
            (PhaseKind::Start, Intent::Begin) => self.phase = Phase::Onboarding,

            (PhaseKind::Onboarding, Intent::CompleteOnboarding { language, partial }) => {
                self.complete_onboarding(language, &partial)?;
            }

            (PhaseKind::Dashboard, Intent::ChangeLanguage) => self.phase = Phase::Onboarding,
            (PhaseKind::Dashboard, Intent::OpenProfile) => self.phase = Phase::Profile,
            (PhaseKind::Profile, Intent::CloseProfile) => self.phase = Phase::dashboard(),

            (PhaseKind::Lesson, Intent::SubmitAnswer { correct }) => self.submit_answer(correct)?,
            (PhaseKind::Lesson, Intent::Continue) => self.continue_lesson()?,

            (PhaseKind::Lesson | PhaseKind::Completed, Intent::ExitLesson) => {
                debug!("Discarding lesson state");
                self.phase = Phase::dashboard();
            }

            (_, Intent::Reset) => self.phase = Phase::Start,

            (phase, _) => {
                warn!(%phase, action, "Illegal transition");
                return Err(SessionError::IllegalTransition { phase, action });
            }
        }

        let next = self.phase.kind();
        info!(next = %next, "Transition applied");
        Ok(next)
    }

    /// Merges onboarding answers, saves the profile and opens the dashboard.
    #[instrument(skip(self, language, partial), fields(language = %language.name()))]
    fn complete_onboarding(
        &mut self,
        language: Language,
        partial: &PartialStats,
    ) -> Result<(), SessionError> {
        let ledger = self.ledger.merge_onboarding(partial, self.evaluator.policy());
        let record = ProfileRecord::new(ledger.clone(), language.clone());
        self.store.save(&record)?;
        self.ledger = ledger;
        self.language = Some(language);
        self.phase = Phase::dashboard();
        Ok(())
    }

    /// Evaluates an answer to the current exercise and applies its reward.
    #[instrument(skip(self))]
    fn submit_answer(&mut self, correct: bool) -> Result<(), SessionError> {
        let phase = self.phase.kind();
        let Phase::Lesson(active) = &mut self.phase else {
            return Err(SessionError::IllegalTransition {
                phase,
                action: "submit_answer",
            });
        };
        if active.feedback().is_some() {
            return Err(SessionError::FeedbackPending);
        }
        let Some(exercise) = active.session().current() else {
            debug_assert!(false, "lesson phase without a current exercise");
            error!("Lesson phase has no current exercise");
            return Err(SessionError::NoActiveExercise);
        };

        let (feedback, delta) = self.evaluator.evaluate(exercise, correct).into_parts();
        let before = self.ledger.clone();
        let after = before.apply(&delta, self.evaluator.policy().max_hearts);
        active.summary_mut().record(correct, &before, &after);
        active.set_feedback(Some(feedback));
        self.ledger = after;

        info!(
            correct,
            xp = self.ledger.xp(),
            coins = self.ledger.coins(),
            hearts = self.ledger.hearts(),
            "Answer applied"
        );
        Ok(())
    }

    /// Clears feedback and advances; the last exercise leads to Completed.
    #[instrument(skip(self))]
    fn continue_lesson(&mut self) -> Result<(), SessionError> {
        let phase = self.phase.kind();
        let Phase::Lesson(active) = &mut self.phase else {
            return Err(SessionError::IllegalTransition {
                phase,
                action: "continue",
            });
        };
        if active.feedback().is_none() {
            return Err(SessionError::NoFeedback);
        }
        active.set_feedback(None);
        match active.session_mut().advance() {
            Advance::Continuing => {}
            Advance::Exhausted => {
                let summary = *active.summary();
                info!(?summary, "Lesson completed");
                self.phase = Phase::Completed(summary);
            }
        }
        Ok(())
    }

    /// Marks the dashboard as loading and hands out a ticket for the result.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LessonPending`] if a request is already
    /// outstanding, or [`SessionError::IllegalTransition`] outside the
    /// dashboard.
    #[instrument(skip(self, language), fields(language = %language.name()))]
    pub fn start_lesson_request(
        &mut self,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<LessonTicket, SessionError> {
        match &self.phase {
            Phase::Dashboard { pending: None } => {}
            Phase::Dashboard { pending: Some(_) } => return Err(SessionError::LessonPending),
            other => {
                return Err(SessionError::IllegalTransition {
                    phase: other.kind(),
                    action: "request_lesson",
                });
            }
        }

        self.generation += 1;
        let ticket = LessonTicket {
            generation: self.generation,
        };
        self.phase = Phase::Dashboard {
            pending: Some(PendingLesson::new(self.generation, language, difficulty)),
        };
        info!(generation = ticket.generation, "Lesson request started");
        Ok(ticket)
    }

    /// Delivers the provider's answer for `ticket`.
    ///
    /// A successful, non-empty lesson starts the Lesson phase. A failure
    /// returns to the plain dashboard. A ticket that no longer matches the
    /// pending request is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StaleResponse`] for an outdated ticket and
    /// [`SessionError::Provider`] when the provider failed or sent nothing.
    #[instrument(skip(self, result), fields(generation = ticket.generation))]
    pub fn resolve_lesson_request(
        &mut self,
        ticket: LessonTicket,
        result: Result<Vec<Exercise>, ProviderError>,
    ) -> Result<PhaseKind, SessionError> {
        let pending = match &mut self.phase {
            Phase::Dashboard { pending }
                if pending
                    .as_ref()
                    .is_some_and(|p| *p.generation() == ticket.generation) =>
            {
                pending.take()
            }
            _ => None,
        };
        let Some(pending) = pending else {
            warn!("Discarding stale lesson response");
            return Err(SessionError::StaleResponse {
                generation: ticket.generation,
            });
        };
        let (language, difficulty) = pending.into_parts();

        let exercises = match result {
            Ok(exercises) => exercises,
            Err(e) => {
                error!(error = %e, "Failed to load lesson");
                return Err(e.into());
            }
        };

        match LessonSession::new(exercises, language, difficulty) {
            Ok(session) => {
                info!(count = session.len(), "Lesson started");
                self.phase = Phase::Lesson(ActiveLesson::new(session));
                Ok(PhaseKind::Lesson)
            }
            Err(e) => {
                error!(error = %e, "Provider returned an empty lesson");
                Err(ProviderError::new(e.to_string()).into())
            }
        }
    }

    /// Abandons the pending lesson request, if any.
    ///
    /// Returns whether a request was cancelled. Its result will be
    /// discarded as stale when it arrives.
    #[instrument(skip(self))]
    pub fn cancel_lesson_request(&mut self) -> bool {
        match &mut self.phase {
            Phase::Dashboard { pending } => {
                let cancelled = pending.take().is_some();
                if cancelled {
                    info!("Lesson request cancelled");
                }
                cancelled
            }
            _ => false,
        }
    }

    /// Requests a lesson from `provider` and starts it.
    ///
    /// Combines [`start_lesson_request`](Self::start_lesson_request), the
    /// provider call (bounded by the configured timeout) and
    /// [`resolve_lesson_request`](Self::resolve_lesson_request).
    ///
    /// # Errors
    ///
    /// See the two halves. On any error the machine is back on the plain
    /// dashboard, or untouched if the request could not start.
    #[instrument(skip(self, provider, language), fields(language = %language.name()))]
    pub async fn request_lesson(
        &mut self,
        provider: &dyn LessonProvider,
        language: Language,
        difficulty: Difficulty,
    ) -> Result<PhaseKind, SessionError> {
        let name = language.name().clone();
        let ticket = self.start_lesson_request(language, difficulty)?;

        let call = provider.generate_lesson(&name, difficulty);
        let result = match self.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::new(format!(
                    "Lesson generation timed out after {}s",
                    limit.as_secs_f32()
                ))),
            },
            None => call.await,
        };

        self.resolve_lesson_request(ticket, result)
    }
}
