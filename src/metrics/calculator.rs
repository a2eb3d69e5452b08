//! Aggregate practice statistics.
//!
//! `compute_stats` is a pure function of the record slice and the reference
//! day: no clock reads, no hidden state. Callers pass records in store
//! (chronological) order because the recent-intensity average looks at the
//! last entries of the slice, not the latest dates.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::metrics::streaks::{calculate_streaks, unique_practice_dates, weekly_streak, Streaks};
use crate::practice::PracticeRecord;

/// Number of trailing records averaged for recent intensity.
pub const RECENT_INTENSITY_SAMPLES: usize = 5;

/// Derived statistics for a practice history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of records, including ones with bad dates or numbers
    pub practice_count: u32,
    /// Sum of durations in minutes
    pub total_minutes: f64,
    /// `total_minutes / 60`
    pub total_hours: f64,
    /// Mean intensity of the last five records in input order
    pub avg_recent_intensity: f64,
    /// Consecutive-day streaks
    pub streaks: Streaks,
    /// Records dated within the trailing 7 days
    pub last7_days: u32,
    /// Records dated within the trailing 14 days
    pub last14_days: u32,
    /// Records dated within the trailing 30 days
    pub last30_days: u32,
    /// Consecutive Sunday-started weeks with practice
    pub weekly_streak: u32,
}

/// Trailing windows tracked in [`Stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingWindow {
    Last7Days,
    Last14Days,
    Last30Days,
}

impl TrailingWindow {
    /// Window length in days.
    pub fn days(&self) -> u32 {
        match self {
            TrailingWindow::Last7Days => 7,
            TrailingWindow::Last14Days => 14,
            TrailingWindow::Last30Days => 30,
        }
    }
}

impl Stats {
    /// Count for one of the tracked windows.
    pub fn window_count(&self, window: TrailingWindow) -> u32 {
        match window {
            TrailingWindow::Last7Days => self.last7_days,
            TrailingWindow::Last14Days => self.last14_days,
            TrailingWindow::Last30Days => self.last30_days,
        }
    }
}

/// Compute statistics for `records` as of `today`.
pub fn compute_stats(records: &[PracticeRecord], today: NaiveDate) -> Stats {
    let total_minutes: f64 = records.iter().map(|r| r.duration_minutes()).sum();

    let dates = unique_practice_dates(records);
    let stats = Stats {
        practice_count: u32::try_from(records.len()).unwrap_or(u32::MAX),
        total_minutes,
        total_hours: total_minutes / 60.0,
        avg_recent_intensity: average_recent_intensity(records),
        streaks: calculate_streaks(&dates, today),
        last7_days: count_in_window(records, 7, today),
        last14_days: count_in_window(records, 14, today),
        last30_days: count_in_window(records, 30, today),
        weekly_streak: weekly_streak(&dates, today),
    };

    tracing::debug!(
        practices = stats.practice_count,
        dated_days = dates.len(),
        current_streak = stats.streaks.current,
        "Computed practice stats"
    );

    stats
}

/// Compute statistics as of the local calendar day.
pub fn compute_stats_now(records: &[PracticeRecord]) -> Stats {
    compute_stats(records, Local::now().date_naive())
}

/// Mean intensity over the last [`RECENT_INTENSITY_SAMPLES`] records.
pub fn average_recent_intensity(records: &[PracticeRecord]) -> f64 {
    let start = records.len().saturating_sub(RECENT_INTENSITY_SAMPLES);
    let samples = &records[start..];
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|r| r.intensity_value()).sum::<f64>() / samples.len() as f64
}

/// Count records dated on or after `today - (days - 1)`.
///
/// Records without a parseable date are excluded.
pub fn count_in_window(records: &[PracticeRecord], days: u32, today: NaiveDate) -> u32 {
    if days == 0 {
        return 0;
    }
    let cutoff = window_cutoff(days, today);
    let count = records
        .iter()
        .filter_map(|r| r.calendar_date())
        .filter(|d| *d >= cutoff)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// First day of a trailing window of `days` calendar days ending on
/// `today`. Windows reaching past the earliest representable date start
/// there.
pub fn window_cutoff(days: u32, today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_signed(Duration::days(i64::from(days.max(1)) - 1))
        .unwrap_or(NaiveDate::MIN)
}
