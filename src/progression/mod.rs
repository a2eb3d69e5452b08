//! Progression ladders.
//!
//! Two independent, static ladders:
//! - Journey phases, keyed by number of practices
//! - Identity levels, keyed by total mat hours
//!
//! Both are pure lookups over immutable data and safe to share.

pub mod levels;
pub mod phases;

pub use levels::{
    current_level, get_level, level_in, level_progress, next_level, validate_levels,
    IdentityLevel, LevelProgress, IDENTITY_LEVELS,
};
pub use phases::{
    get_phase, journey_stage_message, phase_in, validate_phases, Phase, PhaseProgress,
    JOURNEY_PHASES,
};

use crate::error::CatalogError;

/// Validate both built-in ladders.
pub fn validate_ladder() -> Result<(), CatalogError> {
    validate_phases(&JOURNEY_PHASES)?;
    validate_levels(&IDENTITY_LEVELS)
}
