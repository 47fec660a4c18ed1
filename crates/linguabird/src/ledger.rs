//! The learner's reward and progress counters.
//!
//! Every mutation returns a fresh [`StatsLedger`]; a snapshot handed out
//! earlier never changes underneath its reader.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Reward and penalty constants applied to answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPolicy {
    /// Experience awarded per correct answer.
    pub xp_per_correct: u32,
    /// Currency awarded per correct answer.
    pub coins_per_correct: u32,
    /// Hearts removed per incorrect answer.
    pub hearts_per_miss: u32,
    /// Upper bound for hearts.
    pub max_hearts: u32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            xp_per_correct: 10,
            coins_per_correct: 3,
            hearts_per_miss: 1,
            max_hearts: 5,
        }
    }
}

impl RewardPolicy {
    /// Delta for a correct answer.
    #[instrument]
    pub fn correct_delta(&self) -> StatsDelta {
        StatsDelta {
            xp_gained: self.xp_per_correct,
            coins_gained: self.coins_per_correct,
            hearts_lost: 0,
        }
    }

    /// Delta for an incorrect answer.
    #[instrument]
    pub fn incorrect_delta(&self) -> StatsDelta {
        StatsDelta {
            xp_gained: 0,
            coins_gained: 0,
            hearts_lost: self.hearts_per_miss,
        }
    }
}

/// A requested change to the ledger.
///
/// `hearts_lost` is what the policy asks for; the ledger clamps at zero, so
/// the hearts actually removed can be smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsDelta {
    /// Experience to add.
    pub xp_gained: u32,
    /// Currency to add.
    pub coins_gained: u32,
    /// Hearts to remove.
    pub hearts_lost: u32,
}

/// Persistent learner statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_")]
pub struct StatsLedger {
    xp: u32,
    streak: u32,
    hearts: u32,
    coins: u32,
    current_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option, into)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    goal: Option<u32>,
}

impl Default for StatsLedger {
    fn default() -> Self {
        Self {
            xp: 0,
            streak: 0,
            hearts: 5,
            coins: 50,
            current_level: 1,
            name: None,
            goal: None,
        }
    }
}

impl StatsLedger {
    /// Applies a delta, clamping hearts to `[0, max_hearts]`.
    #[instrument(skip(self), fields(xp = self.xp, hearts = self.hearts))]
    pub fn apply(&self, delta: &StatsDelta, max_hearts: u32) -> Self {
        let next = Self {
            xp: self.xp.saturating_add(delta.xp_gained),
            coins: self.coins.saturating_add(delta.coins_gained),
            hearts: self.hearts.saturating_sub(delta.hearts_lost).min(max_hearts),
            ..self.clone()
        };
        debug!(xp = next.xp, coins = next.coins, hearts = next.hearts, "Ledger updated");
        next
    }

    /// Ledger after a correct answer.
    #[instrument(skip(self))]
    pub fn apply_correct(&self, policy: &RewardPolicy) -> Self {
        self.apply(&policy.correct_delta(), policy.max_hearts)
    }

    /// Ledger after an incorrect answer.
    #[instrument(skip(self))]
    pub fn apply_incorrect(&self, policy: &RewardPolicy) -> Self {
        self.apply(&policy.incorrect_delta(), policy.max_hearts)
    }

    /// Overlays onboarding answers and pins the streak to 1.
    #[instrument(skip(self))]
    pub fn merge_onboarding(&self, partial: &PartialStats, policy: &RewardPolicy) -> Self {
        let merged = Self {
            xp: partial.xp.unwrap_or(self.xp),
            hearts: partial.hearts.unwrap_or(self.hearts),
            coins: partial.coins.unwrap_or(self.coins),
            current_level: partial.current_level.unwrap_or(self.current_level),
            name: partial.name.clone().or_else(|| self.name.clone()),
            goal: partial.goal.or(self.goal),
            streak: 1,
        };
        merged.normalized(policy.max_hearts)
    }

    /// Clamps values that storage or onboarding may have pushed out of range.
    #[instrument(skip(self))]
    pub fn normalized(&self, max_hearts: u32) -> Self {
        Self {
            hearts: self.hearts.min(max_hearts),
            current_level: self.current_level.max(1),
            ..self.clone()
        }
    }
}

/// Onboarding answers; any field left `None` keeps the ledger's value.
///
/// `streak` is accepted for wire compatibility but always overridden.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialStats {
    /// Experience override.
    pub xp: Option<u32>,
    /// Ignored: onboarding always sets the streak to 1.
    pub streak: Option<u32>,
    /// Hearts override.
    pub hearts: Option<u32>,
    /// Currency override.
    pub coins: Option<u32>,
    /// Level override.
    pub current_level: Option<u32>,
    /// Learner's display name.
    pub name: Option<String>,
    /// Daily experience goal.
    pub goal: Option<u32>,
}
