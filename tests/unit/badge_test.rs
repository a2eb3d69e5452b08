//! Unit tests for achievement evaluation.
//!
//! Covers the high-intensity predicate, legacy id migration, idempotence,
//! monotonicity and id uniqueness across repeated evaluate/merge cycles.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use matmind::achievements::{
    evaluate, AchievementEngine, Catalog, LegacyIdMap, FIRST_PRACTICE, HIGH_INTENSITY_FOCUS,
};
use matmind::practice::PracticeRecord;
use matmind::profile::{merge_achievements, EarnedAchievement, Profile};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
}

fn sessions(count: i64, intensity: f64) -> Vec<PracticeRecord> {
    (0..count)
        .map(|i| PracticeRecord::new(today() - Duration::days(count - i), 60.0, intensity))
        .collect()
}

fn earned_ids(profile: &Profile) -> HashSet<String> {
    profile
        .earned_badges
        .iter()
        .chain(profile.earned_milestones.iter())
        .map(|e| e.id_str().to_string())
        .collect()
}

fn cycle(records: &[PracticeRecord], profile: &Profile) -> Profile {
    merge_achievements(profile, evaluate(records, profile, today()))
        .into_profile()
        .unwrap_or_else(|| profile.clone())
}

// =============================================================================
// High intensity focus
// =============================================================================

#[test]
fn test_high_intensity_fires_with_five_hard_sessions() {
    let update = evaluate(&sessions(5, 8.0), &Profile::new(), today()).unwrap();
    assert!(update.profile.has_earned(HIGH_INTENSITY_FOCUS));
}

#[test]
fn test_high_intensity_needs_high_average() {
    let update = evaluate(&sessions(5, 2.0), &Profile::new(), today()).unwrap();
    assert!(!update.profile.has_earned(HIGH_INTENSITY_FOCUS));
}

#[test]
fn test_high_intensity_needs_five_sessions() {
    let update = evaluate(&sessions(4, 8.0), &Profile::new(), today()).unwrap();
    assert!(!update.profile.has_earned(HIGH_INTENSITY_FOCUS));
    assert!(update.profile.has_earned(FIRST_PRACTICE));
}

// =============================================================================
// Migration
// =============================================================================

#[test]
fn test_legacy_badge_migrated_in_place() {
    let mut profile = Profile::new();
    profile
        .earned_badges
        .push(EarnedAchievement::new("1", "2024-09-01", 1));

    let update = evaluate(&sessions(3, 5.0), &profile, today()).unwrap();
    let firsts: Vec<&EarnedAchievement> = update
        .profile
        .earned_badges
        .iter()
        .filter(|b| b.id_str() == FIRST_PRACTICE)
        .collect();

    assert_eq!(firsts.len(), 1);
    assert_eq!(firsts[0].earned_date, "2024-09-01");
    assert!(!update.profile.has_earned("1"));
}

#[test]
fn test_custom_legacy_table() {
    let engine = AchievementEngine::new(
        Catalog::standard(),
        LegacyIdMap::from_pairs([("fp", FIRST_PRACTICE)]),
    );
    let mut profile = Profile::new();
    profile.earned_badges.push(EarnedAchievement::new("fp", "2024-09-01", 1));
    profile.earned_badges.push(EarnedAchievement::new("1", "2024-09-02", 2));

    let update = engine.evaluate(&sessions(1, 5.0), &profile, today()).unwrap();
    let ids: Vec<&str> = update.profile.earned_badges.iter().map(|b| b.id_str()).collect();
    // "1" has no mapping in this table and passes through untouched
    assert_eq!(ids, vec![FIRST_PRACTICE, "1"]);
}

#[test]
fn test_missing_lists_treated_as_empty() {
    let profile: Profile = serde_json::from_str("{}").unwrap();
    let update = evaluate(&sessions(1, 5.0), &profile, today()).unwrap();
    assert_eq!(update.newly_earned.len(), 1);
}

// =============================================================================
// Cycle properties
// =============================================================================

#[test]
fn test_idempotent_after_merge() {
    let records = sessions(30, 6.0);
    let once = cycle(&records, &Profile::new());
    assert!(evaluate(&records, &once, today()).is_none());
    assert_eq!(cycle(&records, &once), once);
}

#[test]
fn test_monotonic_as_history_grows() {
    let all = sessions(60, 5.0);
    let mut profile = Profile::new();
    let mut previous = HashSet::new();

    for n in [1, 5, 10, 20, 40, 60] {
        profile = cycle(&all[..n], &profile);
        let ids = earned_ids(&profile);
        assert!(previous.is_subset(&ids), "lost achievements at {n} practices");

        let fresh = cycle(&all[..n], &Profile::new());
        assert!(earned_ids(&fresh).is_subset(&ids));
        previous = ids;
    }
}

#[test]
fn test_ids_stay_unique_over_many_cycles() {
    let mut profile = Profile::new();
    profile.earned_badges.push(EarnedAchievement::new("2", "2024-01-01", 10));
    profile.earned_badges.push(EarnedAchievement::new("2", "2024-01-02", 11));

    let records = sessions(12, 7.0);
    for _ in 0..5 {
        profile = cycle(&records, &profile);
    }

    let all: Vec<&str> = profile
        .earned_badges
        .iter()
        .chain(profile.earned_milestones.iter())
        .map(|e| e.id_str())
        .collect();
    let unique: HashSet<&str> = all.iter().copied().collect();
    assert_eq!(all.len(), unique.len());
}
