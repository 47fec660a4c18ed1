//! LinguaBird core - lesson session state machine and scoring engine
//!
//! This library drives a gamified language-learning client: onboarding, the
//! dashboard, generated lessons and the learner's reward counters.
//!
//! # Architecture
//!
//! - **Ledger**: the learner's xp, coins, hearts and streak, updated by value
//! - **Lesson**: the active exercise list, its cursor and the running tally
//! - **Evaluator**: reward deltas and feedback for each answer
//! - **Session**: the phase state machine tying everything together
//! - **Provider**: async lesson generation (chat model or JSON fixture)
//! - **Store**: profile persistence over a key-value backend
//!
//! # Example
//!
//! ```no_run
//! use linguabird::{
//!     Difficulty, FixtureLessonProvider, Intent, Language, MemoryStore, PartialStats,
//!     ProfileStore, RewardPolicy, SessionMachine,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = ProfileStore::new(MemoryStore::new());
//! let mut machine = SessionMachine::restore(store, RewardPolicy::default())?;
//!
//! let language = Language::by_code("en").expect("catalog language");
//! machine.apply(Intent::Begin)?;
//! machine.apply(Intent::CompleteOnboarding {
//!     language: language.clone(),
//!     partial: PartialStats::default(),
//! })?;
//!
//! let provider = FixtureLessonProvider::new("lesson.json");
//! machine.request_lesson(&provider, language, Difficulty::Easy).await?;
//! machine.apply(Intent::SubmitAnswer { correct: true })?;
//! machine.apply(Intent::Continue)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod catalog;
mod config;
mod evaluator;
mod exercise;
mod ledger;
mod lesson;
mod llm_client;
mod provider;
mod session;
mod store;

// Crate-level exports - Catalog
pub use catalog::{Difficulty, Language};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Answer evaluation
pub use evaluator::{
    AnswerEvaluator, DEFAULT_ENCOURAGEMENT, Evaluation, FeedbackEvent, RETRY_HINT, START_PROMPT,
    encouragement, mascot_line,
};

// Crate-level exports - Exercises
pub use exercise::{Exercise, ExerciseType};

// Crate-level exports - Stats ledger
pub use ledger::{PartialStats, RewardPolicy, StatsDelta, StatsLedger};

// Crate-level exports - Lesson sequencing
pub use lesson::{Advance, EmptyLessonError, LessonSession, LessonSummary, progress_percent};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Lesson providers
pub use provider::{
    FixtureLessonProvider, LessonProvider, LlmLessonProvider, ProviderError, parse_lesson,
};

// Crate-level exports - Session state machine
pub use session::{
    ActiveLesson, Intent, LessonTicket, PendingLesson, Phase, PhaseKind, SessionError,
    SessionMachine,
};

// Crate-level exports - Profile persistence
pub use store::{
    KeyValueStore, MemoryStore, PROFILE_KEY, ProfileRecord, ProfileRow, ProfileStore, SqliteStore,
    StoreError,
};
