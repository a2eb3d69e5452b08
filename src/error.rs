//! Static catalog validation errors.

use thiserror::Error;

/// Problems found in a phase ladder, level ladder or achievement catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The catalog has no entries.
    #[error("Catalog '{0}' is empty")]
    Empty(&'static str),

    /// Two entries share an id.
    #[error("Duplicate id in catalog: {0}")]
    DuplicateId(String),

    /// Stage boundaries are not strictly increasing.
    #[error("Boundary for '{stage}' must be greater than {previous}")]
    NonIncreasingBoundary { stage: String, previous: f64 },

    /// A bounded stage whose goal does not exceed its start.
    #[error("Stage '{stage}' has goal {goal} not above start {start}")]
    InvalidGoal { stage: String, start: u32, goal: u32 },

    /// Only the last stage may be unbounded.
    #[error("Stage '{0}' is unbounded but is not the last stage")]
    UnboundedNotLast(String),

    /// A legacy id maps onto an id that is not in the catalog.
    #[error("Legacy id '{legacy}' maps to unknown id '{target}'")]
    UnknownMigrationTarget { legacy: String, target: String },
}
