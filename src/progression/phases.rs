//! Journey phases keyed by cumulative practice count.
//!
//! A phase owns the half-open interval `(start, goal]`; the first phase also
//! owns zero. Reaching a phase's goal exactly keeps it current at 100%, and
//! the following phase is always reported as `next`.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CatalogError;

/// One stage of the practice journey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Practice count where the phase begins
    pub start: u32,
    /// Practice count that completes the phase; `None` for an open-ended phase
    pub goal: Option<u32>,
}

impl Phase {
    /// Whether `count` falls at or below this phase's goal.
    pub fn covers(&self, count: u32) -> bool {
        self.goal.map_or(true, |goal| count <= goal)
    }

    /// Percent of the way from `start` to `goal`, rounded half up.
    pub fn progress_percent(&self, count: u32) -> u8 {
        let Some(goal) = self.goal else {
            return 100;
        };
        let span = goal.saturating_sub(self.start);
        if span == 0 {
            return 100;
        }
        let done = count.saturating_sub(self.start);
        percent(f64::from(done), f64::from(span))
    }
}

/// Where a practice count sits on a phase ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseProgress<'a> {
    pub current: &'a Phase,
    pub next: Option<&'a Phase>,
    pub progress_percent: u8,
}

/// The standard three-phase journey.
pub static JOURNEY_PHASES: [Phase; 3] = [
    Phase {
        id: 1,
        name: "The Baseline",
        description: "Starting out",
        start: 0,
        goal: Some(10),
    },
    Phase {
        id: 2,
        name: "The Grind",
        description: "Building work",
        start: 10,
        goal: Some(50),
    },
    Phase {
        id: 3,
        name: "The Competitor",
        description: "Advanced",
        start: 50,
        goal: Some(100),
    },
];

/// Locate `practice_count` on the standard journey. Negative counts clamp to 0.
pub fn get_phase(practice_count: i64) -> PhaseProgress<'static> {
    let count = clamp_count(practice_count);
    let index = JOURNEY_PHASES
        .iter()
        .position(|p| p.covers(count))
        .unwrap_or(JOURNEY_PHASES.len() - 1);
    progress_at(&JOURNEY_PHASES, index, count)
}

/// Locate `practice_count` on a custom ladder. `None` for an empty ladder.
pub fn phase_in(ladder: &[Phase], practice_count: i64) -> Option<PhaseProgress<'_>> {
    if ladder.is_empty() {
        return None;
    }
    let count = clamp_count(practice_count);
    let index = ladder
        .iter()
        .position(|p| p.covers(count))
        .unwrap_or(ladder.len() - 1);
    Some(progress_at(ladder, index, count))
}

fn progress_at(ladder: &[Phase], index: usize, count: u32) -> PhaseProgress<'_> {
    let current = &ladder[index];
    PhaseProgress {
        current,
        next: ladder.get(index + 1),
        progress_percent: current.progress_percent(count),
    }
}

fn clamp_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

pub(crate) fn percent(done: f64, span: f64) -> u8 {
    (100.0 * done / span).round().clamp(0.0, 100.0) as u8
}

/// One-line encouragement for where the wrestler is in the journey.
pub fn journey_stage_message(practice_count: u32) -> &'static str {
    match practice_count {
        0 => "You have not logged yet. The journey starts with the first note you leave yourself.",
        1..=14 => "You are in the startup phase. Focus on showing up and noticing how sessions feel, not judging them.",
        15..=49 => "You are building a real base. The big win is consistency plus one clear lesson per practice.",
        50..=119 => "You are in the grind. Patterns are forming. Use them to choose what to narrow in on.",
        _ => "You are a volume veteran. The work now is very specific: sharpen positions that keep showing up in your notes.",
    }
}

/// Check ladder invariants: unique ids, strictly increasing starts, goals
/// above starts, and only the last phase open-ended.
pub fn validate_phases(ladder: &[Phase]) -> Result<(), CatalogError> {
    if ladder.is_empty() {
        return Err(CatalogError::Empty("phases"));
    }

    let mut ids = HashSet::new();
    for (i, phase) in ladder.iter().enumerate() {
        if !ids.insert(phase.id) {
            return Err(CatalogError::DuplicateId(phase.id.to_string()));
        }

        if i > 0 && phase.start <= ladder[i - 1].start {
            return Err(CatalogError::NonIncreasingBoundary {
                stage: phase.name.to_string(),
                previous: f64::from(ladder[i - 1].start),
            });
        }

        match phase.goal {
            Some(goal) if goal <= phase.start => {
                return Err(CatalogError::InvalidGoal {
                    stage: phase.name.to_string(),
                    start: phase.start,
                    goal,
                });
            }
            None if i + 1 != ladder.len() => {
                return Err(CatalogError::UnboundedNotLast(phase.name.to_string()));
            }
            _ => {}
        }
    }

    Ok(())
}
