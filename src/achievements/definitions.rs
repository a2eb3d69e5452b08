//! Achievement catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::migration::LegacyIdMap;
use super::types::{AchievementCategory, AchievementDefinition, Criterion};
use crate::error::CatalogError;
use crate::metrics::TrailingWindow;

/// Catalog revision. Version 1 used numeric badge ids.
pub const CATALOG_VERSION: u32 = 2;

pub const FIRST_PRACTICE: &str = "first_practice";
pub const TEN_PRACTICES: &str = "ten_practices";
pub const FIFTY_PRACTICES: &str = "fifty_practices";
pub const HIGH_INTENSITY_FOCUS: &str = "high_intensity_focus";

/// A versioned set of achievement definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: u32,
    pub entries: Vec<AchievementDefinition>,
}

impl Catalog {
    /// The built-in catalog.
    pub fn standard() -> Self {
        Self {
            version: CATALOG_VERSION,
            entries: all_achievements(),
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check that ids are unique and every legacy id maps into the catalog.
    pub fn validate(&self, legacy: &LegacyIdMap) -> Result<(), CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty("achievements"));
        }

        let mut ids = HashSet::new();
        for entry in &self.entries {
            if !ids.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }

        for (old, new) in legacy.iter() {
            if !ids.contains(new) {
                return Err(CatalogError::UnknownMigrationTarget {
                    legacy: old.to_string(),
                    target: new.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Validate the built-in catalog against the built-in legacy table.
pub fn validate_catalog() -> Result<(), CatalogError> {
    Catalog::standard().validate(&LegacyIdMap::standard())
}

/// Every built-in achievement.
pub fn all_achievements() -> Vec<AchievementDefinition> {
    let mut achievements = Vec::new();

    achievements.extend(badges());
    achievements.extend(volume_milestones());
    achievements.extend(hour_milestones());
    achievements.extend(streak_milestones());
    achievements.extend(consistency_milestones());

    achievements
}

/// The original four badges. Their ids are the migration targets for the
/// numeric ids "1" through "4".
fn badges() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::badge(
            FIRST_PRACTICE,
            "First Practice",
            "Log your very first practice.",
            "🏅",
            Criterion::PracticeCount { threshold: 1 },
        )
        .in_category(AchievementCategory::Volume),
        AchievementDefinition::badge(
            TEN_PRACTICES,
            "10 Practices",
            "Ten honest sessions logged.",
            "💪",
            Criterion::PracticeCount { threshold: 10 },
        )
        .in_category(AchievementCategory::Volume),
        AchievementDefinition::badge(
            FIFTY_PRACTICES,
            "50 Practices",
            "Fifty practices: the habit is real.",
            "🥇",
            Criterion::PracticeCount { threshold: 50 },
        )
        .in_category(AchievementCategory::Volume),
        AchievementDefinition::badge(
            HIGH_INTENSITY_FOCUS,
            "High Intensity Focus",
            "Average intensity 4+ over the last 5 sessions (min 5 sessions).",
            "⚡",
            Criterion::Compound {
                min_avg_intensity: 4.0,
                min_practices: 5,
            },
        )
        .in_category(AchievementCategory::Effort),
    ]
}

fn volume_milestones() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::milestone(
            "practices_100",
            "Hundred Club",
            "One hundred practices in the books.",
            "💯",
            Criterion::PracticeCount { threshold: 100 },
        )
        .in_category(AchievementCategory::Volume)
        .at_level(1),
        AchievementDefinition::milestone(
            "practices_250",
            "Room Regular",
            "Two hundred fifty practices. The room knows your name.",
            "🏛️",
            Criterion::PracticeCount { threshold: 250 },
        )
        .in_category(AchievementCategory::Volume)
        .at_level(2),
    ]
}

fn hour_milestones() -> Vec<AchievementDefinition> {
    [
        (1, 10.0, "hours_10", "Ten on the Mat", "Ten hours of mat time."),
        (2, 50.0, "hours_50", "Fifty-Hour Grinder", "Fifty hours of mat time."),
        (3, 100.0, "hours_100", "Hundred-Hour Hammer", "One hundred hours of mat time."),
        (4, 250.0, "hours_250", "Iron Lungs", "Two hundred fifty hours of mat time."),
    ]
    .into_iter()
    .map(|(level, hours, id, name, description)| {
        AchievementDefinition::milestone(id, name, description, "⏱️", Criterion::Hours { hours })
            .in_category(AchievementCategory::Time)
            .at_level(level)
    })
    .collect()
}

fn streak_milestones() -> Vec<AchievementDefinition> {
    [
        (1, 3, "streak_3", "Three-Day Run", "Practice three days in a row."),
        (2, 7, "streak_7", "Week Warrior", "Practice seven days in a row."),
        (3, 14, "streak_14", "Two-Week Tear", "Practice fourteen days in a row."),
        (4, 30, "streak_30", "Month on the Mat", "Practice thirty days in a row."),
    ]
    .into_iter()
    .map(|(level, days, id, name, description)| {
        AchievementDefinition::milestone(id, name, description, "🔥", Criterion::Streak { days })
            .in_category(AchievementCategory::Streak)
            .at_level(level)
    })
    .collect()
}

fn consistency_milestones() -> Vec<AchievementDefinition> {
    vec![
        AchievementDefinition::milestone(
            "consistency_7",
            "Steady Week",
            "Three practices within the last 7 days.",
            "📅",
            Criterion::Window {
                window: TrailingWindow::Last7Days,
                min_count: 3,
            },
        )
        .in_category(AchievementCategory::Consistency)
        .at_level(1),
        AchievementDefinition::milestone(
            "consistency_14",
            "Two Solid Weeks",
            "Six practices within the last 14 days.",
            "📅",
            Criterion::Window {
                window: TrailingWindow::Last14Days,
                min_count: 6,
            },
        )
        .in_category(AchievementCategory::Consistency)
        .at_level(2),
        AchievementDefinition::milestone(
            "consistency_30",
            "Locked-In Month",
            "Twelve practices within the last 30 days.",
            "📅",
            Criterion::Window {
                window: TrailingWindow::Last30Days,
                min_count: 12,
            },
        )
        .in_category(AchievementCategory::Consistency)
        .at_level(3),
    ]
}
