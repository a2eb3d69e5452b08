//! The persisted user profile and the merge step that updates it.

pub mod merger;
pub mod types;

pub use merger::{merge_achievements, merge_with, MergeOutcome};
pub use types::{CachedStreaks, EarnedAchievement, EarnedBadge, EarnedMilestone, Profile};
