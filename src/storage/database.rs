//! Database operations using rusqlite.
//!
//! The store is the only place practice records and the profile are
//! persisted. It does no progression logic of its own.

use crate::practice::PracticeRecord;
use crate::profile::Profile;
use crate::storage::schema::{CURRENT_VERSION, MIGRATIONS, PROFILE_KEY, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use serde_json::Map;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

const PRACTICE_COLUMNS: &str = "id, date, duration, intensity, notes, created_at, extra_json";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        Connection::open(path)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
            .and_then(Self::from_connection)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
            .and_then(Self::from_connection)
    }

    /// Wrap a connection, bringing its schema up to [`CURRENT_VERSION`].
    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        let mut db = Self { conn };

        db.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let version = db.schema_version()?;
        if version > CURRENT_VERSION {
            return Err(DatabaseError::MigrationFailed(format!(
                "database is at version {}, newer than supported version {}",
                version, CURRENT_VERSION
            )));
        }
        db.migrate(version)?;

        Ok(db)
    }

    /// Highest applied schema version, 0 for a new database.
    fn schema_version(&self) -> Result<i32, DatabaseError> {
        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Apply every step newer than `from_version`, each in its own
    /// transaction together with its version row.
    fn migrate(&mut self, from_version: i32) -> Result<(), DatabaseError> {
        for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > from_version) {
            let tx = self
                .conn
                .transaction()
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

            tx.execute_batch(sql)
                .map_err(|e| DatabaseError::MigrationFailed(format!("step {}: {}", version, e)))?;
            tx.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, ?2)",
                params![version, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tx.commit()
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

            tracing::info!(from = from_version, to = version, "Database schema upgraded");
        }

        Ok(())
    }

    // ========== Practice Operations ==========

    /// Add a practice. The store assigns a fresh id and creation time and
    /// returns the record as stored.
    pub fn insert_practice(&self, record: &PracticeRecord) -> Result<PracticeRecord, DatabaseError> {
        let stored = PracticeRecord {
            id: Some(Uuid::new_v4().to_string()),
            created_at: Some(Utc::now()),
            ..record.clone()
        };

        insert_row(&self.conn, &stored)?;

        tracing::debug!(id = stored.id.as_deref(), date = stored.date.as_deref(), "Practice added");

        Ok(stored)
    }

    /// Get all practices in insertion order.
    pub fn list_practices(&self) -> Result<Vec<PracticeRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM practices ORDER BY seq",
                PRACTICE_COLUMNS
            ))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], PracticeRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut practices = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            practices.push(row.into_record()?);
        }

        Ok(practices)
    }

    /// Get a practice by id.
    pub fn get_practice(&self, id: &str) -> Result<Option<PracticeRecord>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM practices WHERE id = ?1", PRACTICE_COLUMNS),
                params![id],
                PracticeRow::from_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(PracticeRow::into_record).transpose()
    }

    /// Delete a practice by id.
    pub fn delete_practice(&self, id: &str) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM practices WHERE id = ?1", params![id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Practice {}", id)));
        }

        tracing::info!(id, "Practice deleted");

        Ok(())
    }

    /// Count practices in the database.
    pub fn count_practices(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM practices", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    // ========== Profile Operations ==========

    /// Get the profile, or a fresh default one when none is stored.
    pub fn get_profile(&self) -> Result<Profile, DatabaseError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT data_json FROM profile WHERE key = ?1",
                params![PROFILE_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        match json {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| DatabaseError::DeserializationError(e.to_string())),
            None => Ok(Profile::default()),
        }
    }

    /// Store the profile, replacing any previous one.
    pub fn set_profile(&self, profile: &Profile) -> Result<(), DatabaseError> {
        write_profile(&self.conn, profile)?;

        tracing::info!(
            badges = profile.earned_badges.len(),
            milestones = profile.earned_milestones.len(),
            "Profile saved"
        );

        Ok(())
    }

    // ========== Bulk Operations ==========

    /// Delete every practice and the profile.
    pub fn clear_all(&mut self) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tx.execute("DELETE FROM practices", [])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        tx.execute("DELETE FROM profile", [])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!("All data cleared");

        Ok(())
    }

    /// Replace all data with an imported set, atomically.
    ///
    /// Imported ids are kept; records without one get a fresh id. Two
    /// records sharing an id abort the import and leave the store untouched.
    pub fn replace_all(
        &mut self,
        records: &[PracticeRecord],
        profile: &Profile,
    ) -> Result<(), DatabaseError> {
        let mut ids = HashSet::new();
        let mut prepared = Vec::with_capacity(records.len());
        for record in records {
            let id = record
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            if !ids.insert(id.clone()) {
                return Err(DatabaseError::ConstraintViolation(format!(
                    "Duplicate practice id {}",
                    id
                )));
            }
            prepared.push(PracticeRecord {
                id: Some(id),
                ..record.clone()
            });
        }

        let tx = self
            .conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tx.execute("DELETE FROM practices", [])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        for record in &prepared {
            insert_row(&tx, record)?;
        }
        write_profile(&tx, profile)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(practices = prepared.len(), "Imported data");

        Ok(())
    }
}

fn insert_row(conn: &Connection, record: &PracticeRecord) -> Result<(), DatabaseError> {
    let extra_json = if record.extra.is_empty() {
        None
    } else {
        Some(
            serde_json::to_string(&record.extra)
                .map_err(|e| DatabaseError::SerializationError(e.to_string()))?,
        )
    };

    conn.execute(
        &format!(
            "INSERT INTO practices ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            PRACTICE_COLUMNS
        ),
        params![
            record.id,
            record.date,
            record.duration,
            record.intensity,
            record.notes,
            record.created_at.map(|t| t.to_rfc3339()),
            extra_json,
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DatabaseError::ConstraintViolation(format!(
                "Practice {}",
                record.id.as_deref().unwrap_or_default()
            ))
        }
        e => DatabaseError::QueryFailed(e.to_string()),
    })?;

    Ok(())
}

fn write_profile(conn: &Connection, profile: &Profile) -> Result<(), DatabaseError> {
    let json = serde_json::to_string(profile)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

    conn.execute(
        "INSERT INTO profile (key, data_json, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET data_json = excluded.data_json,
         updated_at = excluded.updated_at",
        params![PROFILE_KEY, json, Utc::now().to_rfc3339()],
    )
    .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

    Ok(())
}

/// Intermediate struct for reading practice rows from database.
struct PracticeRow {
    id: String,
    date: Option<String>,
    duration: Option<f64>,
    intensity: Option<f64>,
    notes: Option<String>,
    created_at: Option<String>,
    extra_json: Option<String>,
}

impl PracticeRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            duration: row.get(2)?,
            intensity: row.get(3)?,
            notes: row.get(4)?,
            created_at: row.get(5)?,
            extra_json: row.get(6)?,
        })
    }

    fn into_record(self) -> Result<PracticeRecord, DatabaseError> {
        let created_at = self
            .created_at
            .map(|s| DateTime::parse_from_rfc3339(&s).map(|dt| dt.with_timezone(&Utc)))
            .transpose()
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid created date: {}", e))
            })?;

        let extra = match self.extra_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid extra fields: {}", e))
            })?,
            None => Map::new(),
        };

        Ok(PracticeRecord {
            id: Some(self.id),
            date: self.date,
            duration: self.duration,
            intensity: self.intensity,
            notes: self.notes,
            created_at,
            extra,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
