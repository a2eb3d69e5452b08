//! Integration tests for the on-disk store.
//!
//! Profiles and practices must survive the storage boundary exactly,
//! including legacy numeric ids and fields written by other clients.

use matmind::practice::PracticeRecord;
use matmind::profile::{EarnedAchievement, Profile};
use matmind::storage::{load_config, save_config, AppConfig, Database};
use chrono::NaiveDate;

fn profile_with_history() -> Profile {
    let json = r#"{
        "earnedBadges": [
            {"id": 1, "earnedDate": "2024-10-01", "practiceNumber": 1},
            {"id": "ten_practices", "earnedDate": "2024-11-12", "practiceNumber": 10, "seen": true}
        ],
        "earnedMilestones": [
            {"id": "streak_3", "earnedDate": "2024-10-03", "practiceNumber": 3, "category": "streak", "level": 1}
        ],
        "currentPhase": 2,
        "streaks": {"days": 4, "weeks": 2},
        "displayName": "Sam"
    }"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_profile_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let profile = profile_with_history();

    {
        let db = Database::open(&path).unwrap();
        db.set_profile(&profile).unwrap();
    }

    let db = Database::open(&path).unwrap();
    let loaded = db.get_profile().unwrap();
    assert_eq!(loaded, profile);

    let ids: Vec<&str> = loaded.earned_badges.iter().map(EarnedAchievement::id_str).collect();
    assert_eq!(ids, vec!["1", "ten_practices"]);
    assert_eq!(loaded.earned_badges[1].earned_date, "2024-11-12");
    assert_eq!(loaded.earned_badges[1].practice_number, 10);
    assert_eq!(loaded.earned_milestones[0].level, Some(1));
    assert_eq!(loaded.extra["displayName"], "Sam");
}

#[test]
fn test_practices_survive_reopen_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("journal.db");

    let mut ids = Vec::new();
    {
        let db = Database::open(&path).unwrap();
        for day in [3, 1, 2] {
            let date = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
            let stored = db
                .insert_practice(&PracticeRecord::new(date, 75.5, 6.0).with_notes("live goes"))
                .unwrap();
            ids.push(stored.id.unwrap());
        }
    }

    let db = Database::open(&path).unwrap();
    let records = db.list_practices().unwrap();
    let stored_ids: Vec<String> = records.iter().filter_map(|r| r.id.clone()).collect();
    assert_eq!(stored_ids, ids);
    assert_eq!(records[0].date.as_deref(), Some("2025-05-03"));
    assert_eq!(records[0].duration, Some(75.5));
    assert_eq!(records[0].notes.as_deref(), Some("live goes"));
}

#[test]
fn test_import_is_all_or_nothing() {
    let mut db = Database::open_in_memory().unwrap();
    let original = PracticeRecord::new(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), 60.0, 5.0);
    db.insert_practice(&original).unwrap();
    db.set_profile(&profile_with_history()).unwrap();

    let mut dup = original.clone();
    dup.id = Some("same".into());
    assert!(db.replace_all(&[dup.clone(), dup], &Profile::new()).is_err());

    assert_eq!(db.count_practices().unwrap(), 1);
    assert_eq!(db.get_profile().unwrap(), profile_with_history());
}

#[test]
fn test_config_points_at_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    config.storage.database_file = "wrestling.db".into();
    save_config(&config).unwrap();

    let loaded = load_config(dir.path()).unwrap();
    assert_eq!(loaded.database_path(), dir.path().join("wrestling.db"));

    Database::open(&loaded.database_path()).unwrap();
    assert!(dir.path().join("wrestling.db").exists());
}
