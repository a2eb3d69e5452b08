//! Legacy badge id migration.
//!
//! The first catalog stored badges under numeric ids. Those ids still exist
//! in older profiles and backups, so the mapping is permanent compatibility
//! data. Ids without a mapping pass through unchanged: migration never drops
//! an earned entry because of an unknown id.

use std::collections::{HashMap, HashSet};

use super::definitions::{FIFTY_PRACTICES, FIRST_PRACTICE, HIGH_INTENSITY_FOCUS, TEN_PRACTICES};
use crate::profile::EarnedAchievement;

/// Catalog v1 numeric ids and their v2 replacements.
pub const LEGACY_BADGE_IDS: [(&str, &str); 4] = [
    ("1", FIRST_PRACTICE),
    ("2", TEN_PRACTICES),
    ("3", FIFTY_PRACTICES),
    ("4", HIGH_INTENSITY_FOCUS),
];

/// Lookup table from legacy ids to current ids.
#[derive(Debug, Clone, Default)]
pub struct LegacyIdMap {
    map: HashMap<String, String>,
}

impl LegacyIdMap {
    /// The built-in v1 -> v2 table.
    pub fn standard() -> Self {
        Self::from_pairs(LEGACY_BADGE_IDS)
    }

    /// Build a table from `(legacy, current)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            map: pairs
                .into_iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
        }
    }

    /// Current id for `id`, or `id` itself when there is no mapping.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.map.get(id.trim()).map(String::as_str).unwrap_or(id)
    }

    /// Iterate `(legacy, current)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of normalizing one earned list.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub entries: Vec<EarnedAchievement>,
    /// True when any id was rewritten or a duplicate was dropped
    pub changed: bool,
}

/// Rewrite legacy ids and collapse duplicates, keeping the first occurrence.
///
/// `seen` carries ids across lists so a badge and a milestone can never share
/// an id either. Entries without an id are kept as they are.
pub fn normalize_earned(
    entries: &[EarnedAchievement],
    legacy: &LegacyIdMap,
    seen: &mut HashSet<String>,
) -> Normalized {
    let mut changed = false;
    let mut normalized = Vec::with_capacity(entries.len());

    for entry in entries {
        // Without an id there is nothing to migrate or collide with
        let Some(original) = entry.id.as_deref() else {
            normalized.push(entry.clone());
            continue;
        };
        let resolved = legacy.resolve(original);

        if !seen.insert(resolved.to_string()) {
            tracing::warn!(id = resolved, "Dropping duplicate earned achievement");
            changed = true;
            continue;
        }

        let mut entry = entry.clone();
        if resolved != original {
            tracing::info!(from = original, to = resolved, "Migrated legacy badge id");
            entry.id = Some(resolved.to_string());
            changed = true;
        }
        normalized.push(entry);
    }

    Normalized {
        entries: normalized,
        changed,
    }
}
