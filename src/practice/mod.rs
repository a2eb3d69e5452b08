//! Practice records.
//!
//! A practice record is one logged session on the mat. Records come from the
//! store (or an import file) and are never mutated by the computation layer.

pub mod lenient;
pub mod types;

pub use types::{parse_calendar_date, PracticeRecord};
