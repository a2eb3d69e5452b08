//! Achievement evaluation.
//!
//! Every catalog entry is checked independently on each evaluation, so all
//! achievements that became satisfied since the last run unlock together,
//! whatever their catalog order.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::definitions::Catalog;
use super::migration::{normalize_earned, LegacyIdMap};
use super::types::{AchievementDefinition, AchievementKind};
use crate::metrics::{compute_stats, Stats};
use crate::practice::PracticeRecord;
use crate::profile::{EarnedAchievement, Profile};

/// Profile changes produced by one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementUpdate {
    /// Input profile with normalized and extended achievement lists
    pub profile: Profile,
    /// Entries unlocked by this evaluation, in catalog order
    pub newly_earned: Vec<EarnedAchievement>,
    /// Whether legacy ids were rewritten or duplicates removed
    pub migrated: bool,
}

/// Catalog entry joined with the profile's state, for a "view all" screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus<'a> {
    pub definition: &'a AchievementDefinition,
    pub earned: Option<&'a EarnedAchievement>,
    pub current: f64,
    pub target: f64,
}

/// Evaluates a catalog against practice history and a profile.
#[derive(Debug, Clone)]
pub struct AchievementEngine {
    catalog: Catalog,
    legacy: LegacyIdMap,
}

impl Default for AchievementEngine {
    fn default() -> Self {
        Self::new(Catalog::standard(), LegacyIdMap::standard())
    }
}

impl AchievementEngine {
    /// Create an engine over a catalog and legacy-id table.
    pub fn new(catalog: Catalog, legacy: LegacyIdMap) -> Self {
        Self { catalog, legacy }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn legacy_ids(&self) -> &LegacyIdMap {
        &self.legacy
    }

    /// Evaluate `records` against `profile` as of `today`.
    ///
    /// Returns `None` when nothing was earned and no migration happened, in
    /// which case the profile does not need to be written back.
    pub fn evaluate(
        &self,
        records: &[PracticeRecord],
        profile: &Profile,
        today: NaiveDate,
    ) -> Option<AchievementUpdate> {
        let stats = compute_stats(records, today);
        self.evaluate_stats(&stats, profile, today)
    }

    /// Same as [`evaluate`](Self::evaluate) with precomputed stats.
    pub fn evaluate_stats(
        &self,
        stats: &Stats,
        profile: &Profile,
        today: NaiveDate,
    ) -> Option<AchievementUpdate> {
        let mut earned_ids = HashSet::new();
        let badges = normalize_earned(&profile.earned_badges, &self.legacy, &mut earned_ids);
        let milestones = normalize_earned(&profile.earned_milestones, &self.legacy, &mut earned_ids);
        let migrated = badges.changed || milestones.changed;

        let earned_date = today.format("%Y-%m-%d").to_string();
        let mut new_badges = Vec::new();
        let mut new_milestones = Vec::new();

        for definition in &self.catalog.entries {
            if earned_ids.contains(&definition.id) || !definition.criterion.is_met(stats) {
                continue;
            }
            earned_ids.insert(definition.id.clone());

            let mut entry =
                EarnedAchievement::new(&definition.id, &earned_date, stats.practice_count);
            entry.category = definition.category.map(|c| c.as_str().to_string());
            entry.level = definition.level;

            tracing::info!(
                id = %definition.id,
                practice_number = stats.practice_count,
                "Achievement earned"
            );

            match definition.kind {
                AchievementKind::Badge => new_badges.push(entry),
                AchievementKind::Milestone => new_milestones.push(entry),
            }
        }

        if new_badges.is_empty() && new_milestones.is_empty() && !migrated {
            return None;
        }

        let newly_earned: Vec<EarnedAchievement> =
            new_badges.iter().chain(new_milestones.iter()).cloned().collect();

        let mut earned_badges = badges.entries;
        earned_badges.extend(new_badges);
        let mut earned_milestones = milestones.entries;
        earned_milestones.extend(new_milestones);

        Some(AchievementUpdate {
            profile: Profile {
                earned_badges,
                earned_milestones,
                ..profile.clone()
            },
            newly_earned,
            migrated,
        })
    }

    /// Every catalog entry with its earned entry (if any) and progress.
    pub fn statuses<'a>(&'a self, stats: &Stats, profile: &'a Profile) -> Vec<AchievementStatus<'a>> {
        let all_earned: Vec<&EarnedAchievement> = profile
            .earned_badges
            .iter()
            .chain(profile.earned_milestones.iter())
            .collect();

        self.catalog
            .entries
            .iter()
            .map(|definition| {
                let earned = all_earned
                    .iter()
                    .find(|e| {
                        e.id
                            .as_deref()
                            .is_some_and(|id| self.legacy.resolve(id) == definition.id)
                    })
                    .copied();
                let (current, target) = definition.criterion.measure(stats);
                AchievementStatus {
                    definition,
                    earned,
                    current,
                    target,
                }
            })
            .collect()
    }
}

/// Evaluate with the standard catalog.
pub fn evaluate(
    records: &[PracticeRecord],
    profile: &Profile,
    today: NaiveDate,
) -> Option<AchievementUpdate> {
    AchievementEngine::default().evaluate(records, profile, today)
}

/// Evaluate with the standard catalog as of the local calendar day.
pub fn evaluate_now(records: &[PracticeRecord], profile: &Profile) -> Option<AchievementUpdate> {
    evaluate(records, profile, Local::now().date_naive())
}
