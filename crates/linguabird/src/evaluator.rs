//! Answer evaluation: reward deltas and feedback content.

use derive_getters::Getters;
use tracing::{debug, instrument};

use crate::{Exercise, ExerciseType, RewardPolicy, StatsDelta};

/// Mascot line shown before any exercise is on screen.
pub const START_PROMPT: &str = "Vamos começar! 🦜";

/// Encouragement used when no exercise kind is known.
pub const DEFAULT_ENCOURAGEMENT: &str = "Tá indo muito bem! 😉";

/// Shown after a wrong answer when the exercise has no explanation.
pub const RETRY_HINT: &str = "Tente de novo para fixar!";

/// Encouragement for a correct answer, keyed by exercise kind.
pub fn encouragement(kind: Option<ExerciseType>) -> &'static str {
    match kind {
        Some(ExerciseType::Learn) => "Observe e aprenda! 🦜",
        Some(ExerciseType::Listen) => "Escutou direitinho? 🦜",
        Some(ExerciseType::Practice) => "Agora é praticar! 🦜",
        Some(ExerciseType::Translate) => "Traduza essa! 🦜",
        Some(ExerciseType::Speak) => "Sua vez de falar! 🦜",
        None => DEFAULT_ENCOURAGEMENT,
    }
}

/// Mascot line for whatever exercise is currently on screen.
pub fn mascot_line(current: Option<&Exercise>) -> &'static str {
    match current {
        Some(exercise) => encouragement(Some(*exercise.kind())),
        None => START_PROMPT,
    }
}

/// Feedback for one submitted answer. Lives until the learner continues.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct FeedbackEvent {
    correct: bool,
    explanation: Option<String>,
    kind: ExerciseType,
}

impl FeedbackEvent {
    /// Short heading for the feedback panel.
    pub fn headline(&self) -> &'static str {
        if self.correct { "Incrível!" } else { "Quase lá!" }
    }

    /// Body text: encouragement when correct, the explanation otherwise.
    pub fn message(&self) -> &str {
        if self.correct {
            encouragement(Some(self.kind))
        } else {
            self.explanation.as_deref().unwrap_or(RETRY_HINT)
        }
    }
}

/// Outcome of evaluating an answer.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Evaluation {
    feedback: FeedbackEvent,
    delta: StatsDelta,
}

impl Evaluation {
    /// Splits the evaluation into its parts.
    pub fn into_parts(self) -> (FeedbackEvent, StatsDelta) {
        (self.feedback, self.delta)
    }
}

/// Decides the reward or penalty for an answer.
///
/// It never touches completion or streaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerEvaluator {
    policy: RewardPolicy,
}

impl AnswerEvaluator {
    /// Creates an evaluator with the given reward policy.
    #[instrument]
    pub fn new(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Evaluates an answer to `exercise`.
    #[instrument(skip(self, exercise), fields(exercise_id = %exercise.id(), kind = %exercise.kind()))]
    pub fn evaluate(&self, exercise: &Exercise, is_correct: bool) -> Evaluation {
        let delta = if is_correct {
            self.policy.correct_delta()
        } else {
            self.policy.incorrect_delta()
        };
        let explanation = if is_correct {
            None
        } else {
            exercise.explanation().clone()
        };
        debug!(?delta, "Answer evaluated");
        Evaluation {
            feedback: FeedbackEvent {
                correct: is_correct,
                explanation,
                kind: *exercise.kind(),
            },
            delta,
        }
    }
}
