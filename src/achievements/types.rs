//! Achievement catalog types.

use serde::{Deserialize, Serialize};

use crate::metrics::{Stats, TrailingWindow};

/// Which profile list an achievement is recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Badge,
    Milestone,
}

/// Achievement grouping for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    /// Practice count milestones
    Volume,
    /// Intensity-based achievements
    Effort,
    /// Accumulated mat hours
    Time,
    /// Consecutive-day streaks
    Streak,
    /// Sessions within a trailing window
    Consistency,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Volume => "volume",
            AchievementCategory::Effort => "effort",
            AchievementCategory::Time => "time",
            AchievementCategory::Streak => "streak",
            AchievementCategory::Consistency => "consistency",
        }
    }
}

/// Unlock condition, evaluated against [`Stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criterion {
    /// `practice_count >= threshold`
    PracticeCount { threshold: u32 },
    /// `total_hours >= hours`
    Hours { hours: f64 },
    /// `streaks.current >= days`
    Streak { days: u32 },
    /// Count in a trailing window `>= min_count`
    Window { window: TrailingWindow, min_count: u32 },
    /// Recent average intensity and a minimum history, both required
    Compound {
        min_avg_intensity: f64,
        min_practices: u32,
    },
}

impl Criterion {
    /// Whether the stats satisfy this criterion.
    pub fn is_met(&self, stats: &Stats) -> bool {
        match self {
            Criterion::PracticeCount { threshold } => stats.practice_count >= *threshold,
            Criterion::Hours { hours } => stats.total_hours >= *hours,
            Criterion::Streak { days } => stats.streaks.current >= *days,
            Criterion::Window { window, min_count } => stats.window_count(*window) >= *min_count,
            Criterion::Compound {
                min_avg_intensity,
                min_practices,
            } => {
                stats.avg_recent_intensity >= *min_avg_intensity
                    && stats.practice_count >= *min_practices
            }
        }
    }

    /// Current value and target for progress display.
    ///
    /// Compound criteria report practice count until the minimum history
    /// exists, then the recent intensity average.
    pub fn measure(&self, stats: &Stats) -> (f64, f64) {
        match self {
            Criterion::PracticeCount { threshold } => {
                (f64::from(stats.practice_count), f64::from(*threshold))
            }
            Criterion::Hours { hours } => (stats.total_hours, *hours),
            Criterion::Streak { days } => (f64::from(stats.streaks.current), f64::from(*days)),
            Criterion::Window { window, min_count } => {
                (f64::from(stats.window_count(*window)), f64::from(*min_count))
            }
            Criterion::Compound {
                min_avg_intensity,
                min_practices,
            } => {
                if stats.practice_count < *min_practices {
                    (f64::from(stats.practice_count), f64::from(*min_practices))
                } else {
                    (stats.avg_recent_intensity, *min_avg_intensity)
                }
            }
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    /// Stable key stored on profiles
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub kind: AchievementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AchievementCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub criterion: Criterion,
}

impl AchievementDefinition {
    /// Create a badge.
    pub fn badge(id: &str, name: &str, description: &str, icon: &str, criterion: Criterion) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            kind: AchievementKind::Badge,
            category: None,
            level: None,
            criterion,
        }
    }

    /// Create a milestone.
    pub fn milestone(
        id: &str,
        name: &str,
        description: &str,
        icon: &str,
        criterion: Criterion,
    ) -> Self {
        Self {
            kind: AchievementKind::Milestone,
            ..Self::badge(id, name, description, icon, criterion)
        }
    }

    /// Set the display category.
    pub fn in_category(mut self, category: AchievementCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the tier within its category.
    pub fn at_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }
}
