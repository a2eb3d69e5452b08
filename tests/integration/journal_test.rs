//! Integration tests for the journal cycle.
//!
//! Log practices through the store, evaluate, merge, persist, and check
//! what a reopened journal sees.

use chrono::{Duration, NaiveDate};
use matmind::achievements::{FIRST_PRACTICE, HIGH_INTENSITY_FOCUS, TEN_PRACTICES};
use matmind::journal::{ImportFile, Journal};
use matmind::practice::PracticeRecord;
use matmind::profile::EarnedAchievement;
use matmind::storage::{load_config, Database};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

#[test]
fn test_season_of_practice() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path()).unwrap();

    {
        let journal = Journal::open(&config).unwrap();
        for i in (0..12).rev() {
            let date = today() - Duration::days(i);
            journal
                .log_practice(&PracticeRecord::new(date, 60.0, 7.0), date)
                .unwrap();
        }
    }

    let journal = Journal::open(&config).unwrap();
    let profile = journal.profile().unwrap();
    for id in [FIRST_PRACTICE, TEN_PRACTICES, HIGH_INTENSITY_FOCUS, "streak_7", "hours_10"] {
        assert!(profile.has_earned(id), "missing {id}");
    }

    // Badges were earned on the day they became true
    let first = &profile.earned_badges[0];
    assert_eq!(first.practice_number, 1);
    assert_eq!(first.earned_date, "2025-01-20");
    let ten = profile
        .earned_badges
        .iter()
        .find(|b| b.id_str() == TEN_PRACTICES)
        .unwrap();
    assert_eq!(ten.practice_number, 10);
    assert_eq!(ten.earned_date, "2025-01-29");

    assert_eq!(profile.current_phase, 2);
    assert_eq!(profile.streaks.days, 12);

    let report = journal.refresh(today()).unwrap();
    assert!(!report.persisted);
}

#[test]
fn test_legacy_backup_import() {
    let mut journal = Journal::new(Database::open_in_memory().unwrap());
    let backup = r#"{
        "practices": [
            {"id": 1, "date": "2025-01-29", "duration": 60, "intensity": 5},
            {"id": 2, "date": "2025-01-30", "duration": 60, "intensity": 5},
            {"id": 3, "date": "2025-01-31", "duration": 60, "intensity": 5}
        ],
        "profile": {
            "earnedBadges": [{"id": "1", "earnedDate": "2025-01-29", "practiceNumber": 1}],
            "currentPhase": 1,
            "streaks": {"days": 0, "weeks": 0}
        }
    }"#;

    let file: ImportFile = serde_json::from_str(backup).unwrap();
    let report = journal.import(file, today()).unwrap();

    assert!(report.migrated);
    assert!(report.persisted);
    let new_ids: Vec<&str> = report.newly_earned.iter().map(EarnedAchievement::id_str).collect();
    assert!(new_ids.contains(&"streak_3"));
    assert!(!new_ids.contains(&FIRST_PRACTICE));

    let stored = journal.profile().unwrap();
    assert_eq!(stored.earned_badges.len(), 1);
    assert_eq!(stored.earned_badges[0].id_str(), FIRST_PRACTICE);
    assert_eq!(stored.earned_badges[0].earned_date, "2025-01-29");
    assert_eq!(stored.streaks.days, 3);
}

#[test]
fn test_deleting_history_never_revokes() {
    let journal = Journal::new(Database::open_in_memory().unwrap());
    let mut ids = Vec::new();
    for i in 0..5 {
        let logged = journal
            .log_practice(&PracticeRecord::new(today() - Duration::days(i), 45.0, 9.0), today())
            .unwrap();
        ids.push(logged.practice.id.unwrap());
    }
    let before = journal.profile().unwrap();
    assert!(before.has_earned(HIGH_INTENSITY_FOCUS));

    for id in &ids {
        journal.delete_practice(id).unwrap();
    }
    let report = journal.refresh(today()).unwrap();

    assert_eq!(report.stats.practice_count, 0);
    assert!(!report.persisted);
    assert_eq!(journal.profile().unwrap(), before);
}

#[test]
fn test_detailed_log_fields_survive_import_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path()).unwrap();
    let backup = r#"[
        {
            "id": "1738000000000",
            "date": "2025-01-27",
            "duration": 90,
            "intensity": 8,
            "type": "Practice",
            "focus": "Hand fighting",
            "physical": 8,
            "mental": 7,
            "highlights": "Scored off a snap down",
            "lesson": "Keep my elbows in",
            "createdAt": 1738000000000
        },
        {"id": "1738100000000", "date": "2025-01-28", "duration": "45", "type": "Lift"}
    ]"#;

    {
        let mut journal = Journal::open(&config).unwrap();
        journal.import(serde_json::from_str(backup).unwrap(), today()).unwrap();
    }

    let journal = Journal::open(&config).unwrap();
    let export = serde_json::to_value(journal.export().unwrap()).unwrap();
    let practices = export["practices"].as_array().unwrap();
    assert_eq!(practices.len(), 2);

    let first = &practices[0];
    assert_eq!(first["id"], "1738000000000");
    assert_eq!(first["type"], "Practice");
    assert_eq!(first["focus"], "Hand fighting");
    assert_eq!(first["physical"], 8);
    assert_eq!(first["mental"], 7);
    assert_eq!(first["highlights"], "Scored off a snap down");
    assert_eq!(first["lesson"], "Keep my elbows in");
    assert!(first["createdAt"].is_string());
    assert_eq!(practices[1]["type"], "Lift");

    // The exported file imports into an identical journal
    let mut copy = Journal::new(Database::open_in_memory().unwrap());
    copy.import(serde_json::from_value(export).unwrap(), today()).unwrap();
    assert_eq!(copy.practices().unwrap(), journal.practices().unwrap());
}
