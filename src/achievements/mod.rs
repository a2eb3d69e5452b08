//! Badges and milestones.
//!
//! The catalog is static data; the engine compares it against computed
//! [`Stats`](crate::metrics::Stats) and a profile and reports what is newly
//! earned. Legacy numeric badge ids are rewritten on the way through.

pub mod definitions;
pub mod engine;
pub mod migration;
pub mod types;

pub use definitions::{
    all_achievements, validate_catalog, Catalog, CATALOG_VERSION, FIFTY_PRACTICES, FIRST_PRACTICE,
    HIGH_INTENSITY_FOCUS, TEN_PRACTICES,
};
pub use engine::{evaluate, evaluate_now, AchievementEngine, AchievementStatus, AchievementUpdate};
pub use migration::{normalize_earned, LegacyIdMap, Normalized, LEGACY_BADGE_IDS};
pub use types::{AchievementCategory, AchievementDefinition, AchievementKind, Criterion};
