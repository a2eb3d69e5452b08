//! Training summary over a trailing range.
//!
//! The summary backs the `insights` view: volume, averages, the busiest
//! weekday, the most common session type and the share of hard sessions.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::metrics::calculator::window_cutoff;
use crate::practice::PracticeRecord;

/// Sessions at or above this intensity count as high intensity.
pub const HIGH_INTENSITY_THRESHOLD: f64 = 7.0;

/// Session type assumed when a record names none.
pub const DEFAULT_SESSION_TYPE: &str = "Practice";

/// Weekdays in the order ties are broken.
const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Aggregates for the records inside one range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSummary {
    /// Trailing days covered, 0 for all time
    pub range_days: u32,
    pub session_count: u32,
    pub total_minutes: f64,
    pub total_hours: f64,
    /// Mean duration rounded to whole minutes
    pub avg_duration_minutes: u32,
    pub avg_intensity: f64,
    /// Weekday with the most sessions; ties go to the earliest day from Sunday
    pub most_active_weekday: Option<String>,
    pub longest_session_minutes: f64,
    pub high_intensity_sessions: u32,
    /// Share of high-intensity sessions, rounded percent
    pub high_intensity_percent: u32,
    /// Most frequent session type; ties go to the type logged first
    pub favorite_session_type: Option<String>,
    /// `floor(sum(duration * intensity) / 100)`
    pub mat_iq: u32,
}

impl TrainingSummary {
    pub fn is_empty(&self) -> bool {
        self.session_count == 0
    }
}

/// Summarize the records dated within the trailing `range_days` calendar
/// days up to `today`. A range of 0 summarizes every record, including ones
/// without a parseable date.
pub fn summary(records: &[PracticeRecord], range_days: u32, today: NaiveDate) -> TrainingSummary {
    let in_range: Vec<&PracticeRecord> = match range_days {
        0 => records.iter().collect(),
        days => {
            let cutoff = window_cutoff(days, today);
            records
                .iter()
                .filter(|r| r.calendar_date().is_some_and(|d| d >= cutoff))
                .collect()
        }
    };

    if in_range.is_empty() {
        return TrainingSummary {
            range_days,
            ..TrainingSummary::default()
        };
    }

    let count = in_range.len() as f64;
    let total_minutes: f64 = in_range.iter().map(|r| r.duration_minutes()).sum();
    let total_intensity: f64 = in_range.iter().map(|r| r.intensity_value()).sum();
    let load: f64 = in_range
        .iter()
        .map(|r| r.duration_minutes() * r.intensity_value())
        .sum();
    let high = in_range
        .iter()
        .filter(|r| r.intensity_value() >= HIGH_INTENSITY_THRESHOLD)
        .count();

    let summary = TrainingSummary {
        range_days,
        session_count: saturating_u32(in_range.len()),
        total_minutes,
        total_hours: total_minutes / 60.0,
        avg_duration_minutes: whole(total_minutes / count),
        avg_intensity: total_intensity / count,
        most_active_weekday: most_active_weekday(&in_range).map(weekday_name),
        longest_session_minutes: in_range
            .iter()
            .map(|r| r.duration_minutes())
            .fold(0.0, f64::max),
        high_intensity_sessions: saturating_u32(high),
        high_intensity_percent: whole(high as f64 / count * 100.0),
        favorite_session_type: favorite_session_type(&in_range),
        mat_iq: whole((load / 100.0).floor()),
    };

    tracing::debug!(
        range_days,
        sessions = summary.session_count,
        "Computed training summary"
    );

    summary
}

/// Session type named by a record's extra fields.
pub fn session_type(record: &PracticeRecord) -> &str {
    record
        .extra_text("sessionType")
        .or_else(|| record.extra_text("type"))
        .unwrap_or(DEFAULT_SESSION_TYPE)
}

fn most_active_weekday(records: &[&PracticeRecord]) -> Option<Weekday> {
    let mut counts = [0u32; 7];
    for date in records.iter().filter_map(|r| r.calendar_date()) {
        counts[date.weekday().num_days_from_sunday() as usize] += 1;
    }

    // max_by_key keeps the last maximum, so walk Saturday back to Sunday
    WEEK_ORDER
        .iter()
        .zip(counts)
        .rev()
        .filter(|(_, n)| *n > 0)
        .max_by_key(|(_, n)| *n)
        .map(|(day, _)| *day)
}

fn favorite_session_type(records: &[&PracticeRecord]) -> Option<String> {
    let mut tally: Vec<(&str, u32)> = Vec::new();
    for record in records {
        let kind = session_type(record);
        match tally.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => tally.push((kind, 1)),
        }
    }

    tally
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map(|(kind, _)| kind.to_string())
}

fn weekday_name(day: Weekday) -> String {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
    .to_string()
}

fn whole(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
