//! Tests for lesson sequencing and progress.

use linguabird::{
    Advance, Difficulty, Exercise, ExerciseType, Language, LessonSession, LessonSummary,
    StatsLedger, progress_percent,
};

fn english() -> Language {
    Language::by_code("en").expect("english in catalog")
}

fn exercises(n: usize) -> Vec<Exercise> {
    (0..n)
        .map(|i| {
            Exercise::new(
                format!("ex-{}", i),
                ExerciseType::Practice,
                format!("Prompt {}", i),
            )
        })
        .collect()
}

#[test]
fn test_empty_lesson_is_rejected() {
    let result = LessonSession::new(Vec::new(), english(), Difficulty::Easy);
    assert!(result.is_err());
}

#[test]
fn test_session_starts_at_first_exercise() {
    let session = LessonSession::new(exercises(3), english(), Difficulty::Easy).expect("Session");
    assert_eq!(session.index(), 0);
    assert_eq!(session.len(), 3);
    assert!(!session.is_empty());
    assert_eq!(session.current().map(|e| e.id().as_str()), Some("ex-0"));
    assert_eq!(session.progress_percent(), 0.0);
}

#[test]
fn test_advance_walks_every_exercise_then_exhausts() {
    let mut session =
        LessonSession::new(exercises(4), english(), Difficulty::Hard).expect("Session");
    for expected in 1..4 {
        assert_eq!(session.advance(), Advance::Continuing);
        assert_eq!(session.index(), expected);
    }
    assert_eq!(session.advance(), Advance::Exhausted);
    assert!(session.is_exhausted());
    assert!(session.current().is_none());
    assert_eq!(session.index(), 3, "cursor stays on the last exercise");
}

#[test]
fn test_advance_after_exhaustion_is_stable() {
    let mut session =
        LessonSession::new(exercises(1), english(), Difficulty::Easy).expect("Session");
    assert_eq!(session.advance(), Advance::Exhausted);
    assert_eq!(session.advance(), Advance::Exhausted);
    assert_eq!(session.index(), 0);
}

#[test]
fn test_progress_percent_values() {
    assert_eq!(progress_percent(0, 0), 0.0);
    assert_eq!(progress_percent(0, 4), 0.0);
    assert_eq!(progress_percent(1, 4), 25.0);
    assert_eq!(progress_percent(3, 4), 75.0);
}

#[test]
fn test_progress_tracks_cursor() {
    let mut session =
        LessonSession::new(exercises(5), english(), Difficulty::Medium).expect("Session");
    session.advance();
    session.advance();
    assert_eq!(session.progress_percent(), 40.0);
    assert_eq!(session.difficulty(), Difficulty::Medium);
    assert_eq!(session.language().code(), "en");
}

#[test]
fn test_summary_counts_actual_changes() {
    let before = StatsLedger::default().with_hearts(0);
    let after = before.clone();
    let mut summary = LessonSummary::new(2);
    summary.record(false, &before, &after);
    assert_eq!(*summary.incorrect(), 1);
    assert_eq!(*summary.hearts_lost(), 0, "no heart left to lose");

    let before = StatsLedger::default();
    let after = before.clone().with_xp(10).with_coins(53);
    summary.record(true, &before, &after);
    assert_eq!(*summary.correct(), 1);
    assert_eq!(*summary.xp_gained(), 10);
    assert_eq!(*summary.coins_gained(), 3);
    assert_eq!(summary.answered(), 2);
}
