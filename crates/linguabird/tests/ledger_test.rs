//! Tests for the stats ledger and reward policy.

use linguabird::{PartialStats, RewardPolicy, StatsDelta, StatsLedger};
use proptest::prelude::*;

#[test]
fn test_default_ledger_values() {
    let ledger = StatsLedger::default();
    assert_eq!(*ledger.xp(), 0);
    assert_eq!(*ledger.streak(), 0);
    assert_eq!(*ledger.hearts(), 5);
    assert_eq!(*ledger.coins(), 50);
    assert_eq!(*ledger.current_level(), 1);
    assert!(ledger.name().is_none());
}

#[test]
fn test_correct_answer_awards_xp_and_coins() {
    let policy = RewardPolicy::default();
    let next = StatsLedger::default().apply_correct(&policy);
    assert_eq!(*next.xp(), 10);
    assert_eq!(*next.coins(), 53);
    assert_eq!(*next.hearts(), 5);
}

#[test]
fn test_incorrect_answer_costs_one_heart() {
    let policy = RewardPolicy::default();
    let next = StatsLedger::default().apply_incorrect(&policy);
    assert_eq!(*next.hearts(), 4);
    assert_eq!(*next.xp(), 0);
    assert_eq!(*next.coins(), 50);
}

#[test]
fn test_hearts_stop_at_zero() {
    let policy = RewardPolicy::default();
    let ledger = StatsLedger::default().with_hearts(0);
    let next = ledger.apply_incorrect(&policy);
    assert_eq!(*next.hearts(), 0);
}

#[test]
fn test_apply_leaves_original_snapshot_untouched() {
    let policy = RewardPolicy::default();
    let before = StatsLedger::default();
    let _after = before.apply_correct(&policy);
    assert_eq!(before, StatsLedger::default());
}

#[test]
fn test_custom_policy_is_honoured() {
    let policy = RewardPolicy {
        xp_per_correct: 25,
        coins_per_correct: 1,
        hearts_per_miss: 2,
        max_hearts: 3,
    };
    let ledger = StatsLedger::default().normalized(policy.max_hearts);
    assert_eq!(*ledger.hearts(), 3);
    let ledger = ledger.apply_correct(&policy).apply_incorrect(&policy);
    assert_eq!(*ledger.xp(), 25);
    assert_eq!(*ledger.coins(), 51);
    assert_eq!(*ledger.hearts(), 1);
}

#[test]
fn test_onboarding_merge_sets_goal_and_streak() {
    let partial = PartialStats {
        goal: Some(10),
        ..PartialStats::default()
    };
    let merged = StatsLedger::default().merge_onboarding(&partial, &RewardPolicy::default());
    assert_eq!(*merged.goal(), Some(10));
    assert_eq!(*merged.streak(), 1);
    assert_eq!(*merged.xp(), 0);
    assert_eq!(*merged.coins(), 50);
    assert_eq!(*merged.hearts(), 5);
    assert_eq!(*merged.current_level(), 1);
}

#[test]
fn test_onboarding_streak_override_is_ignored() {
    let partial = PartialStats {
        streak: Some(42),
        hearts: Some(99),
        ..PartialStats::default()
    };
    let merged = StatsLedger::default().merge_onboarding(&partial, &RewardPolicy::default());
    assert_eq!(*merged.streak(), 1);
    assert_eq!(*merged.hearts(), 5, "hearts are clamped to the maximum");
}

#[test]
fn test_ledger_json_uses_camel_case() {
    let ledger = StatsLedger::default().with_current_level(3).with_name("Rui");
    let json = serde_json::to_value(&ledger).expect("Serialize failed");
    assert_eq!(json["currentLevel"], 3);
    assert_eq!(json["name"], "Rui");
    assert!(json.get("goal").is_none());
}

#[test]
fn test_partial_stats_parse_from_wire() {
    let partial: PartialStats =
        serde_json::from_str(r#"{"goal": 20, "currentLevel": 2}"#).expect("Parse failed");
    assert_eq!(partial.goal, Some(20));
    assert_eq!(partial.current_level, Some(2));
    assert!(partial.xp.is_none());
}

#[test]
fn test_delta_saturates_instead_of_overflowing() {
    let ledger = StatsLedger::default().with_xp(u32::MAX - 1);
    let delta = StatsDelta {
        xp_gained: 10,
        ..StatsDelta::default()
    };
    assert_eq!(*ledger.apply(&delta, 5).xp(), u32::MAX);
}

proptest! {
    #[test]
    fn prop_correct_answers_accumulate(n in 0u32..200) {
        let policy = RewardPolicy::default();
        let start = StatsLedger::default();
        let end = (0..n).fold(start.clone(), |ledger, _| ledger.apply_correct(&policy));
        prop_assert_eq!(*end.xp(), start.xp() + 10 * n);
        prop_assert_eq!(*end.coins(), start.coins() + 3 * n);
        prop_assert_eq!(end.hearts(), start.hearts());
        prop_assert_eq!(end.streak(), start.streak());
    }

    #[test]
    fn prop_misses_clamp_hearts_at_zero(hearts in 0u32..=5, k in 0u32..20) {
        let policy = RewardPolicy::default();
        let start = StatsLedger::default().with_hearts(hearts);
        let end = (0..k).fold(start.clone(), |ledger, _| ledger.apply_incorrect(&policy));
        prop_assert_eq!(*end.hearts(), hearts.saturating_sub(k));
        prop_assert_eq!(end.xp(), start.xp());
        prop_assert_eq!(end.coins(), start.coins());
    }

    #[test]
    fn prop_hearts_stay_within_bounds(answers in proptest::collection::vec(any::<bool>(), 0..50)) {
        let policy = RewardPolicy::default();
        let end = answers.iter().fold(StatsLedger::default(), |ledger, correct| {
            if *correct {
                ledger.apply_correct(&policy)
            } else {
                ledger.apply_incorrect(&policy)
            }
        });
        prop_assert!(*end.hearts() <= policy.max_hearts);
        let correct = answers.iter().filter(|c| **c).count() as u32;
        prop_assert_eq!(*end.xp(), 10 * correct);
    }
}
