//! Practice record type and calendar-date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// One logged practice session.
///
/// Numeric fields are optional because stored data is not always clean;
/// use [`PracticeRecord::duration_minutes`] and
/// [`PracticeRecord::intensity_value`] for the coerced values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    /// Store-assigned identifier (absent until the record is saved)
    #[serde(default, deserialize_with = "lenient::opaque_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// User-attested practice date, as entered
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    /// Minutes trained
    #[serde(default, deserialize_with = "lenient::number")]
    pub duration: Option<f64>,
    /// Perceived effort, 0-10
    #[serde(default, deserialize_with = "lenient::number")]
    pub intensity: Option<f64>,
    /// Free-form notes
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was written to the store
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this version does not interpret (session type, focus, lesson
    /// and so on), carried through storage and export unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PracticeRecord {
    /// Create an unsaved record for the given day.
    pub fn new(date: NaiveDate, duration_minutes: f64, intensity: f64) -> Self {
        Self {
            id: None,
            date: Some(date.format("%Y-%m-%d").to_string()),
            duration: Some(duration_minutes),
            intensity: Some(intensity),
            notes: None,
            created_at: None,
            extra: Map::new(),
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Minutes trained, 0 when missing or invalid.
    pub fn duration_minutes(&self) -> f64 {
        self.duration.filter(|d| d.is_finite()).unwrap_or(0.0)
    }

    /// Intensity rating, 0 when missing or invalid.
    pub fn intensity_value(&self) -> f64 {
        self.intensity.filter(|i| i.is_finite()).unwrap_or(0.0)
    }

    /// Free-text field kept from the record's unrecognized fields.
    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Calendar day the practice happened, if the date parses.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_calendar_date)
    }
}

/// Parse a user-attested date into a calendar day, dropping time of day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, and naive `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
