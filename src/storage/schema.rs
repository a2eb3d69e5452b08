//! Database schema definitions for MatMind.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Practice log, one row per session. seq preserves insertion order.
CREATE TABLE IF NOT EXISTS practices (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    date TEXT,
    duration REAL,
    intensity REAL,
    notes TEXT,
    created_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_practices_date ON practices(date);

-- Single-row profile store, keyed by 'user'
CREATE TABLE IF NOT EXISTS profile (
    key TEXT PRIMARY KEY,
    data_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Schema version tracking table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Version 2: practice fields the journal does not interpret, as a JSON object
pub const MIGRATION_V1_TO_V2: &str = r#"
ALTER TABLE practices ADD COLUMN extra_json TEXT;
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 2;

/// Schema steps in order. Step `n` upgrades a version `n - 1` database.
pub const MIGRATIONS: [(i32, &str); 2] = [(1, SCHEMA), (2, MIGRATION_V1_TO_V2)];

/// Key of the single profile row
pub const PROFILE_KEY: &str = "user";
