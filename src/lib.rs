//! MatMind - Wrestling Practice Journal
//!
//! Turns a log of practice sessions into streaks, windowed counts, a journey
//! phase, an identity level and permanently earned badges and milestones.
//! The computation layer (`metrics`, `progression`, `achievements`,
//! `profile`) is pure and takes "today" explicitly; `storage` and `journal`
//! persist records and the profile in SQLite.

pub mod achievements;
pub mod error;
pub mod journal;
pub mod metrics;
pub mod practice;
pub mod profile;
pub mod progression;
pub mod storage;

// Re-export commonly used types
pub use achievements::{evaluate, AchievementEngine, AchievementUpdate};
pub use error::CatalogError;
pub use journal::{Journal, RefreshReport};
pub use metrics::{compute_stats, Stats};
pub use practice::PracticeRecord;
pub use profile::{merge_achievements, MergeOutcome, Profile};
pub use progression::{get_level, get_phase};
pub use storage::{AppConfig, Database, DatabaseError};
