//! Applying evaluation results to a stored profile.

use std::collections::HashSet;

use crate::achievements::{AchievementUpdate, LegacyIdMap};

use super::types::{EarnedAchievement, Profile};

/// Result of a merge.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// Nothing to write back.
    Unchanged,
    /// The profile to persist.
    Updated(Profile),
}

impl MergeOutcome {
    /// The updated profile, if any.
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            MergeOutcome::Unchanged => None,
            MergeOutcome::Updated(profile) => Some(profile),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, MergeOutcome::Unchanged)
    }
}

/// Merge an evaluation result onto `stored`.
///
/// The earned lists from the update replace the stored ones. Entries already
/// on `stored` but missing from the update (the update was computed from an
/// older copy) are appended again, so no earned achievement is ever lost and
/// no id appears twice.
pub fn merge_achievements(stored: &Profile, update: Option<AchievementUpdate>) -> MergeOutcome {
    merge_with(stored, update, &LegacyIdMap::standard())
}

/// [`merge_achievements`] with an explicit legacy-id table.
pub fn merge_with(
    stored: &Profile,
    update: Option<AchievementUpdate>,
    legacy: &LegacyIdMap,
) -> MergeOutcome {
    let Some(update) = update else {
        return MergeOutcome::Unchanged;
    };

    let updated: Vec<&EarnedAchievement> = update
        .profile
        .earned_badges
        .iter()
        .chain(update.profile.earned_milestones.iter())
        .collect();
    let mut seen: HashSet<String> = updated
        .iter()
        .filter_map(|e| e.id.as_deref())
        .map(|id| legacy.resolve(id).to_string())
        .collect();

    let restored_badges = missing_entries(&stored.earned_badges, &updated, legacy, &mut seen);
    let restored_milestones =
        missing_entries(&stored.earned_milestones, &updated, legacy, &mut seen);

    let mut merged = stored.clone();
    merged.earned_badges = update.profile.earned_badges;
    merged.earned_milestones = update.profile.earned_milestones;
    if !restored_badges.is_empty() || !restored_milestones.is_empty() {
        tracing::warn!(
            badges = restored_badges.len(),
            milestones = restored_milestones.len(),
            "Update was computed from a stale profile, keeping stored entries"
        );
    }
    merged.earned_badges.extend(restored_badges);
    merged.earned_milestones.extend(restored_milestones);

    MergeOutcome::Updated(merged)
}

/// Stored entries the update does not carry. Entries without an id are
/// matched by value since there is no id to compare.
fn missing_entries(
    stored: &[EarnedAchievement],
    updated: &[&EarnedAchievement],
    legacy: &LegacyIdMap,
    seen: &mut HashSet<String>,
) -> Vec<EarnedAchievement> {
    stored
        .iter()
        .filter_map(|entry| {
            let Some(original) = entry.id.as_deref() else {
                return (!updated.contains(&entry)).then(|| entry.clone());
            };
            let id = legacy.resolve(original);
            if !seen.insert(id.to_string()) {
                return None;
            }
            let mut entry = entry.clone();
            entry.id = Some(id.to_string());
            Some(entry)
        })
        .collect()
}
