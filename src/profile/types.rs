//! Persisted profile and earned achievement records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::metrics::Stats;
use crate::practice::lenient;

/// An achievement recorded on the profile.
///
/// Badges and milestones share this shape; which list an entry lives in
/// decides which it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedAchievement {
    /// Catalog id (legacy numeric ids decode as strings)
    #[serde(deserialize_with = "lenient::opaque_id", default)]
    pub id: Option<String>,
    /// Day the achievement was computed, `YYYY-MM-DD`
    #[serde(default)]
    pub earned_date: String,
    /// Practice count at the time it was earned
    #[serde(default, deserialize_with = "lenient::whole_number")]
    pub practice_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Fields written by other clients, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Earned badge entry.
pub type EarnedBadge = EarnedAchievement;
/// Earned milestone entry.
pub type EarnedMilestone = EarnedAchievement;

impl EarnedAchievement {
    /// New entry for `id`.
    pub fn new(id: impl Into<String>, earned_date: impl Into<String>, practice_number: u32) -> Self {
        Self {
            id: Some(id.into()),
            earned_date: earned_date.into(),
            practice_number,
            category: None,
            level: None,
            extra: Map::new(),
        }
    }

    /// The id, or an empty string for corrupt entries without one.
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// Cached streak values shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CachedStreaks {
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub weeks: u32,
}

/// The single persisted profile.
///
/// `earned_badges` and `earned_milestones` are append-only and keyed by id.
/// `current_phase` and `streaks` are caches that can always be recomputed
/// from the practice records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub earned_badges: Vec<EarnedBadge>,
    #[serde(default)]
    pub earned_milestones: Vec<EarnedMilestone>,
    #[serde(default = "default_phase", deserialize_with = "phase_id")]
    pub current_phase: u32,
    #[serde(default)]
    pub streaks: CachedStreaks,
    /// Unknown fields, preserved across load and save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_phase() -> u32 {
    1
}

fn phase_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient::whole_number(deserializer).map(|id| id.max(1))
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            earned_badges: Vec::new(),
            earned_milestones: Vec::new(),
            current_phase: default_phase(),
            streaks: CachedStreaks::default(),
            extra: Map::new(),
        }
    }
}

impl Profile {
    /// Fresh profile with nothing earned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every earned badge and milestone.
    pub fn earned_ids(&self) -> HashSet<&str> {
        self.earned_badges
            .iter()
            .chain(self.earned_milestones.iter())
            .filter_map(|e| e.id.as_deref())
            .collect()
    }

    /// Whether an achievement with this id is on the profile.
    pub fn has_earned(&self, id: &str) -> bool {
        self.earned_badges
            .iter()
            .chain(self.earned_milestones.iter())
            .any(|e| e.id.as_deref() == Some(id))
    }

    /// Refresh the cached dashboard fields from freshly computed stats.
    pub fn refresh_cache(&mut self, stats: &Stats) {
        let phase = crate::progression::get_phase(i64::from(stats.practice_count));
        self.current_phase = phase.current.id;
        self.streaks = CachedStreaks {
            days: stats.streaks.current,
            weeks: stats.weekly_streak,
        };
    }
}
