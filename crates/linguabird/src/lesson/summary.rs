//! Running tally of what a lesson earned and cost.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::StatsLedger;

/// Rewards gathered over one lesson, shown on the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct LessonSummary {
    exercises: usize,
    correct: u32,
    incorrect: u32,
    xp_gained: u32,
    coins_gained: u32,
    hearts_lost: u32,
}

impl LessonSummary {
    /// Empty tally for a lesson of `exercises` items.
    #[instrument]
    pub fn new(exercises: usize) -> Self {
        Self {
            exercises,
            ..Self::default()
        }
    }

    /// Records one answer using the ledger before and after it was applied.
    ///
    /// Working from the two snapshots counts the hearts actually removed,
    /// not the ones the policy asked for.
    #[instrument(skip(self, before, after))]
    pub fn record(&mut self, correct: bool, before: &StatsLedger, after: &StatsLedger) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.xp_gained += after.xp().saturating_sub(*before.xp());
        self.coins_gained += after.coins().saturating_sub(*before.coins());
        self.hearts_lost += before.hearts().saturating_sub(*after.hearts());
    }

    /// Number of answers recorded.
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }
}
