//! Day and week streaks over practiced calendar dates.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::practice::PracticeRecord;

/// The weekly walk stops once it has counted this many weeks.
const MAX_WEEKLY_STREAK: u32 = 53;

/// Consecutive-day streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streaks {
    /// Run ending at the latest practiced day, 0 once it has lapsed
    pub current: u32,
    /// Longest run ever recorded
    pub longest: u32,
}

/// Unique practiced days in ascending order. Unparseable dates are skipped.
pub fn unique_practice_dates(records: &[PracticeRecord]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = records.iter().filter_map(|r| r.calendar_date()).collect();
    dates.into_iter().collect()
}

/// Compute day streaks from sorted, de-duplicated dates.
///
/// The current streak survives one missed day: practicing yesterday but not
/// yet today still counts. Two or more days without practice reset it to 0.
pub fn calculate_streaks(dates: &[NaiveDate], today: NaiveDate) -> Streaks {
    let Some(&last) = dates.last() else {
        return Streaks::default();
    };

    let mut running = 1u32;
    let mut longest = 1u32;

    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            running += 1;
        } else {
            running = 1;
        }
        longest = longest.max(running);
    }

    let days_since_last = (today - last).num_days();

    Streaks {
        current: if days_since_last <= 1 { running } else { 0 },
        longest,
    }
}

/// Sunday that starts the week containing `date`, `None` when that Sunday
/// falls before the earliest representable date.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(
        date.weekday().num_days_from_sunday(),
    )))
}

/// Count consecutive Sunday-started weeks with at least one practice,
/// walking back from the week that contains `today`.
pub fn weekly_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let weeks: BTreeSet<NaiveDate> = dates.iter().filter_map(|d| week_start(*d)).collect();

    let mut streak = 0;
    let mut check = week_start(today);
    while let Some(week) = check {
        if streak >= MAX_WEEKLY_STREAK || !weeks.contains(&week) {
            break;
        }
        streak += 1;
        check = week.checked_sub_signed(Duration::days(7));
    }
    streak
}
