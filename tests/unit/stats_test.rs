//! Unit tests for practice statistics.
//!
//! Streaks, trailing windows, recent intensity and lenient record decoding.

use chrono::{Duration, NaiveDate};
use matmind::metrics::{compute_stats, count_in_window, Stats};
use matmind::practice::PracticeRecord;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn on(dates: &[&str]) -> Vec<PracticeRecord> {
    dates
        .iter()
        .map(|d| PracticeRecord {
            date: Some(d.to_string()),
            duration: Some(60.0),
            intensity: Some(5.0),
            ..PracticeRecord::default()
        })
        .collect()
}

// =============================================================================
// Streaks
// =============================================================================

#[test]
fn test_three_consecutive_days() {
    let stats = compute_stats(&on(&["2025-01-01", "2025-01-02", "2025-01-03"]), day(2025, 1, 3));
    assert_eq!(stats.streaks.current, 3);
    assert_eq!(stats.streaks.longest, 3);
}

#[test]
fn test_gap_breaks_streak() {
    let stats = compute_stats(&on(&["2025-01-01", "2025-01-03"]), day(2025, 1, 3));
    assert_eq!(stats.streaks.current, 1);
    assert_eq!(stats.streaks.longest, 1);
}

#[test]
fn test_streak_survives_until_end_of_next_day() {
    let records = on(&["2025-01-01", "2025-01-02"]);
    assert_eq!(compute_stats(&records, day(2025, 1, 3)).streaks.current, 2);
    assert_eq!(compute_stats(&records, day(2025, 1, 4)).streaks.current, 0);
    assert_eq!(compute_stats(&records, day(2025, 1, 4)).streaks.longest, 2);
}

#[test]
fn test_same_day_counts_once_for_streaks() {
    let stats = compute_stats(
        &on(&["2025-01-02", "2025-01-02T18:30:00", "2025-01-03"]),
        day(2025, 1, 3),
    );
    assert_eq!(stats.practice_count, 3);
    assert_eq!(stats.streaks.current, 2);
}

#[test]
fn test_weekly_streak_across_sundays() {
    // 2025-01-05 and 2025-01-12 are Sundays
    let stats = compute_stats(&on(&["2024-12-31", "2025-01-06", "2025-01-13"]), day(2025, 1, 14));
    assert_eq!(stats.weekly_streak, 3);

    let broken = compute_stats(&on(&["2024-12-31", "2025-01-13"]), day(2025, 1, 14));
    assert_eq!(broken.weekly_streak, 1);
}

// =============================================================================
// Trailing windows
// =============================================================================

#[test]
fn test_windowed_counts() {
    let today = day(2025, 3, 20);
    let mut records: Vec<PracticeRecord> = (0..5)
        .map(|i| PracticeRecord::new(today - Duration::days(i), 60.0, 5.0))
        .collect();
    for _ in 0..2 {
        records.push(PracticeRecord::new(today - Duration::days(10), 60.0, 5.0));
    }

    let stats = compute_stats(&records, today);
    assert_eq!(stats.last7_days, 5);
    assert_eq!(stats.last14_days, 7);
    assert_eq!(stats.last30_days, 7);
}

#[test]
fn test_window_includes_today_and_edge() {
    let today = day(2025, 3, 20);
    let records = vec![
        PracticeRecord::new(today - Duration::days(6), 30.0, 3.0),
        PracticeRecord::new(today - Duration::days(7), 30.0, 3.0),
    ];
    assert_eq!(count_in_window(&records, 7, today), 1);
    assert_eq!(count_in_window(&records, 8, today), 2);
}

#[test]
fn test_dates_at_calendar_limits() {
    let records = on(&["-262143-01-01", "2025-03-19"]);
    let today = day(2025, 3, 20);

    let stats = compute_stats(&records, today);
    assert_eq!(stats.practice_count, 2);
    assert_eq!(stats.last7_days, 1);
    assert_eq!(stats.weekly_streak, 1);
    assert_eq!(count_in_window(&records, u32::MAX, today), 2);

    let far_future = compute_stats(&on(&["+262142-12-31"]), NaiveDate::MAX);
    assert_eq!(far_future.practice_count, 1);
}

// =============================================================================
// Totals and intensity
// =============================================================================

#[test]
fn test_empty_history() {
    let stats = compute_stats(&[], day(2025, 1, 1));
    assert_eq!(stats, Stats::default());
}

#[test]
fn test_recent_intensity_uses_last_five_in_input_order() {
    let today = day(2025, 2, 1);
    let intensities = [10.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let records: Vec<PracticeRecord> = intensities
        .iter()
        .map(|i| PracticeRecord::new(today, 30.0, *i))
        .collect();

    let stats = compute_stats(&records, today);
    assert_eq!(stats.avg_recent_intensity, 3.0);
}

#[test]
fn test_hours_from_minutes() {
    let today = day(2025, 2, 1);
    let records = vec![
        PracticeRecord::new(today, 90.0, 5.0),
        PracticeRecord::new(today, 30.0, 5.0),
    ];
    let stats = compute_stats(&records, today);
    assert_eq!(stats.total_minutes, 120.0);
    assert_eq!(stats.total_hours, 2.0);
}

#[test]
fn test_malformed_records_still_counted() {
    let json = r#"[
        {"id": 7, "date": "2025-02-01", "duration": "abc", "intensity": null},
        {"id": "x", "date": "not a date", "duration": 45, "intensity": "6"},
        {"date": "2025-02-01", "duration": "30", "intensity": 4}
    ]"#;
    let records: Vec<PracticeRecord> = serde_json::from_str(json).unwrap();
    let stats = compute_stats(&records, day(2025, 2, 1));

    assert_eq!(stats.practice_count, 3);
    assert_eq!(stats.total_minutes, 75.0);
    assert_eq!(stats.last7_days, 2);
    assert_eq!(stats.streaks.current, 1);
    assert!((stats.avg_recent_intensity - 10.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_stats_json_field_names() {
    let stats = compute_stats(&on(&["2025-01-01"]), day(2025, 1, 1));
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["practiceCount"], 1);
    assert_eq!(json["last7Days"], 1);
    assert_eq!(json["avgRecentIntensity"], 5.0);
    assert_eq!(json["streaks"]["current"], 1);
}
