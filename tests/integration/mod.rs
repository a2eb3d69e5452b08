//! Integration test modules.

mod journal_test;
mod storage_roundtrip_test;
