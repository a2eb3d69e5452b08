//! Practice metrics: totals, recent intensity, streaks, trailing windows
//! and range summaries.

pub mod calculator;
pub mod streaks;
pub mod summary;

pub use calculator::{
    average_recent_intensity, compute_stats, compute_stats_now, count_in_window, window_cutoff,
    Stats, TrailingWindow, RECENT_INTENSITY_SAMPLES,
};
pub use streaks::{calculate_streaks, unique_practice_dates, week_start, weekly_streak, Streaks};
pub use summary::{
    session_type, summary, TrainingSummary, DEFAULT_SESSION_TYPE, HIGH_INTENSITY_THRESHOLD,
};
