//! The practice journal: store plus progression core.
//!
//! A [`Journal`] is an explicitly constructed handle. Each refresh reads the
//! records and profile once, evaluates, and writes the profile at most once.
//! Callers that share a database file across processes must serialize
//! refreshes themselves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementEngine, AchievementStatus, CATALOG_VERSION};
use crate::metrics::{compute_stats, summary, Stats, TrainingSummary};
use crate::practice::PracticeRecord;
use crate::profile::{merge_with, EarnedAchievement, MergeOutcome, Profile};
use crate::storage::{AppConfig, Database, DatabaseError};

/// Outcome of one evaluate/merge/persist cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub stats: Stats,
    pub newly_earned: Vec<EarnedAchievement>,
    /// Legacy ids or duplicates were cleaned up
    pub migrated: bool,
    /// The profile was written back
    pub persisted: bool,
    pub profile: Profile,
}

/// A practice as stored, with the refresh it triggered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedPractice {
    pub practice: PracticeRecord,
    pub report: RefreshReport,
}

/// Full journal contents for backup and transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExport {
    #[serde(default)]
    pub catalog_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub practices: Vec<PracticeRecord>,
    #[serde(default)]
    pub profile: Profile,
}

/// Accepted import shapes: a full export, or a bare list of practices.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportFile {
    Full(JournalExport),
    Practices(Vec<PracticeRecord>),
}

impl ImportFile {
    fn into_parts(self) -> (Vec<PracticeRecord>, Profile) {
        match self {
            ImportFile::Full(export) => (export.practices, export.profile),
            ImportFile::Practices(practices) => (practices, Profile::default()),
        }
    }
}

/// Handle over a practice store and an achievement engine.
pub struct Journal {
    db: Database,
    engine: AchievementEngine,
}

impl Journal {
    /// Journal over an open database with the standard catalog.
    pub fn new(db: Database) -> Self {
        Self::with_engine(db, AchievementEngine::default())
    }

    pub fn with_engine(db: Database, engine: AchievementEngine) -> Self {
        Self { db, engine }
    }

    /// Open the database named by `config`.
    pub fn open(config: &AppConfig) -> Result<Self, DatabaseError> {
        let path = config.database_path();
        tracing::debug!("Opening journal at {}", path.display());
        Ok(Self::new(Database::open(&path)?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn engine(&self) -> &AchievementEngine {
        &self.engine
    }

    /// All practices in insertion order.
    pub fn practices(&self) -> Result<Vec<PracticeRecord>, DatabaseError> {
        self.db.list_practices()
    }

    pub fn profile(&self) -> Result<Profile, DatabaseError> {
        self.db.get_profile()
    }

    /// Stats over every stored practice.
    pub fn stats(&self, today: NaiveDate) -> Result<Stats, DatabaseError> {
        Ok(compute_stats(&self.db.list_practices()?, today))
    }

    /// Training summary over the trailing `range_days` (0 for all time).
    pub fn summary(&self, range_days: u32, today: NaiveDate) -> Result<TrainingSummary, DatabaseError> {
        Ok(summary(&self.db.list_practices()?, range_days, today))
    }

    /// Store a practice and re-evaluate achievements.
    pub fn log_practice(
        &self,
        record: &PracticeRecord,
        today: NaiveDate,
    ) -> Result<LoggedPractice, DatabaseError> {
        let practice = self.db.insert_practice(record)?;
        let report = self.refresh(today)?;
        Ok(LoggedPractice { practice, report })
    }

    /// Delete a practice. Earned achievements are kept.
    pub fn delete_practice(&self, id: &str) -> Result<(), DatabaseError> {
        self.db.delete_practice(id)
    }

    /// Evaluate achievements and persist the profile if anything changed.
    pub fn refresh(&self, today: NaiveDate) -> Result<RefreshReport, DatabaseError> {
        let records = self.db.list_practices()?;
        let stored = self.db.get_profile()?;
        let stats = compute_stats(&records, today);

        let update = self.engine.evaluate_stats(&stats, &stored, today);
        let (newly_earned, migrated) = update
            .as_ref()
            .map(|u| (u.newly_earned.clone(), u.migrated))
            .unwrap_or_default();

        let (profile, persisted) = match merge_with(&stored, update, self.engine.legacy_ids()) {
            MergeOutcome::Unchanged => (stored, false),
            MergeOutcome::Updated(mut profile) => {
                profile.refresh_cache(&stats);
                self.db.set_profile(&profile)?;
                (profile, true)
            }
        };

        Ok(RefreshReport {
            stats,
            newly_earned,
            migrated,
            persisted,
            profile,
        })
    }

    /// Catalog progress for the stored profile.
    pub fn achievement_statuses<'a>(
        &'a self,
        stats: &Stats,
        profile: &'a Profile,
    ) -> Vec<AchievementStatus<'a>> {
        self.engine.statuses(stats, profile)
    }

    /// Snapshot of all stored data.
    pub fn export(&self) -> Result<JournalExport, DatabaseError> {
        Ok(JournalExport {
            catalog_version: CATALOG_VERSION,
            exported_at: Some(Utc::now()),
            practices: self.db.list_practices()?,
            profile: self.db.get_profile()?,
        })
    }

    /// Replace all stored data with `file`, then refresh.
    pub fn import(&mut self, file: ImportFile, today: NaiveDate) -> Result<RefreshReport, DatabaseError> {
        let (practices, profile) = file.into_parts();
        self.db.replace_all(&practices, &profile)?;
        self.refresh(today)
    }

    /// Delete every practice and the profile.
    pub fn reset(&mut self) -> Result<(), DatabaseError> {
        self.db.clear_all()
    }
}
