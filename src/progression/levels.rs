//! Identity levels keyed by total mat hours.

use serde::Serialize;

use crate::error::CatalogError;
use crate::progression::phases::percent;

/// A named rung on the identity ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityLevel {
    pub name: &'static str,
    /// Hours required to reach this level
    pub hours: f64,
    /// Display color (hex)
    pub color: &'static str,
    /// Icon name
    pub icon: &'static str,
    pub description: &'static str,
}

/// Where an hour total sits on the identity ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress<'a> {
    pub current: &'a IdentityLevel,
    pub next: Option<&'a IdentityLevel>,
    pub progress_percent: u8,
}

macro_rules! level {
    ($name:expr, $hours:expr, $color:expr, $icon:expr, $desc:expr) => {
        IdentityLevel {
            name: $name,
            hours: $hours,
            color: $color,
            icon: $icon,
            description: $desc,
        }
    };
}

/// The standard identity ladder, from first season to mythical.
pub static IDENTITY_LEVELS: [IdentityLevel; 13] = [
    // The beginning
    level!("Fresh Fish", 0.0, "#94a3b8", "footprints", "Step on the mat. Don't get pinned."),
    level!("Mat Rat", 25.0, "#cbd5e1", "cookie", "Addicted to the grind. First month down."),
    level!("JV Warrior", 50.0, "#64748b", "shield", "Learning the moves. Building the chin."),
    level!("Drill Partner", 100.0, "#34d399", "users", "You are reliable. Technique is clicking."),
    // The competitor
    level!("Varsity Starter", 200.0, "#10b981", "shirt", "You made the lineup. Now score points."),
    level!("Team Captain", 350.0, "#059669", "award", "Leading the warmup. Setting the pace."),
    level!("Sectional Champ", 500.0, "#0ea5e9", "medal", "Top of the area. Eye on the state tourney."),
    // The elite
    level!("State Qualifier", 750.0, "#3b82f6", "map-pin", "One of the best in the state. Punch your ticket."),
    level!("State Placer", 1000.0, "#6366f1", "podium", "Standing on the podium. All that work paid off."),
    level!("State Champ", 1500.0, "#8b5cf6", "trophy", "Number one. The bracket is yours."),
    // The legend
    level!("All-American", 2500.0, "#f59e0b", "flag", "National elite. Best of the best."),
    level!("Olympian", 5000.0, "#f43f5e", "crown", "World class. A lifetime of discipline."),
    level!("Dan Gable", 10000.0, "#ffe4e6", "flame", "Mythical status. You live on the mat."),
];

fn clamp_hours(hours: f64) -> f64 {
    if hours.is_finite() && hours > 0.0 {
        hours
    } else {
        0.0
    }
}

fn level_index(ladder: &[IdentityLevel], hours: f64) -> usize {
    ladder.iter().rposition(|l| hours >= l.hours).unwrap_or(0)
}

fn progress_at(ladder: &[IdentityLevel], index: usize, hours: f64) -> LevelProgress<'_> {
    let current = &ladder[index];
    let next = ladder.get(index + 1);
    let progress_percent = match next {
        Some(next) if next.hours > current.hours => {
            percent(hours - current.hours, next.hours - current.hours)
        }
        _ => 100,
    };
    LevelProgress {
        current,
        next,
        progress_percent,
    }
}

/// Full position on the standard ladder.
pub fn get_level(total_hours: f64) -> LevelProgress<'static> {
    let hours = clamp_hours(total_hours);
    progress_at(&IDENTITY_LEVELS, level_index(&IDENTITY_LEVELS, hours), hours)
}

/// Highest level reached.
pub fn current_level(total_hours: f64) -> &'static IdentityLevel {
    get_level(total_hours).current
}

/// Level after the current one, `None` at the top.
pub fn next_level(total_hours: f64) -> Option<&'static IdentityLevel> {
    get_level(total_hours).next
}

/// Percent of the way to the next level; 100 at the top.
pub fn level_progress(total_hours: f64) -> u8 {
    get_level(total_hours).progress_percent
}

/// Position on a custom ladder. `None` for an empty ladder.
pub fn level_in(ladder: &[IdentityLevel], total_hours: f64) -> Option<LevelProgress<'_>> {
    if ladder.is_empty() {
        return None;
    }
    let hours = clamp_hours(total_hours);
    Some(progress_at(ladder, level_index(ladder, hours), hours))
}

/// Check that the ladder starts at zero hours and climbs strictly.
pub fn validate_levels(ladder: &[IdentityLevel]) -> Result<(), CatalogError> {
    let Some(first) = ladder.first() else {
        return Err(CatalogError::Empty("identity levels"));
    };
    if first.hours != 0.0 {
        return Err(CatalogError::NonIncreasingBoundary {
            stage: first.name.to_string(),
            previous: 0.0,
        });
    }
    for pair in ladder.windows(2) {
        if pair[1].hours <= pair[0].hours {
            return Err(CatalogError::NonIncreasingBoundary {
                stage: pair[1].name.to_string(),
                previous: pair[0].hours,
            });
        }
    }
    Ok(())
}
