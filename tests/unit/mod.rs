//! Unit test modules.

mod badge_test;
mod phase_test;
mod stats_test;
