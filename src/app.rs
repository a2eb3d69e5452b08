//! Command handlers.
//!
//! Each handler returns the JSON document the command prints, so the
//! handlers can be exercised without capturing stdout.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};

use matmind::journal::{ImportFile, Journal};
use matmind::practice::{parse_calendar_date, PracticeRecord};
use matmind::progression::{get_level, get_phase, journey_stage_message};
use matmind::storage::{load_config, save_config, AppConfig};

/// Valid intensity ratings.
const INTENSITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// CLI application state.
pub struct App {
    config: AppConfig,
    journal: Journal,
    today: NaiveDate,
}

impl App {
    /// Load config and open the journal under `data_dir`.
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let config = load_config(data_dir)
            .with_context(|| format!("loading config from {}", data_dir.display()))?;
        let journal = Journal::open(&config).context("opening practice database")?;

        Ok(Self {
            config,
            journal,
            today: Local::now().date_naive(),
        })
    }

    #[cfg(test)]
    fn at(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn log(
        &mut self,
        duration: f64,
        intensity: f64,
        date: Option<&str>,
        notes: Option<String>,
    ) -> anyhow::Result<Value> {
        if !duration.is_finite() || duration < 0.0 {
            bail!("duration must be a non-negative number of minutes");
        }
        if !INTENSITY_RANGE.contains(&intensity) {
            bail!("intensity must be between 0 and 10");
        }
        let day = match date {
            Some(raw) => {
                parse_calendar_date(raw).with_context(|| format!("invalid date '{}'", raw))?
            }
            None => self.today,
        };

        let mut record = PracticeRecord::new(day, duration, intensity);
        record.notes = notes;

        let logged = self.journal.log_practice(&record, self.today)?;
        for earned in &logged.report.newly_earned {
            tracing::info!("Unlocked {}", earned.id_str());
        }

        Ok(serde_json::to_value(logged)?)
    }

    pub fn list(&self) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(self.journal.practices()?)?)
    }

    pub fn delete(&self, id: &str) -> anyhow::Result<Value> {
        self.journal.delete_practice(id)?;
        Ok(json!({ "deleted": id }))
    }

    /// Dashboard: stats plus progression and the weekly goal.
    pub fn stats(&self) -> anyhow::Result<Value> {
        let stats = self.journal.stats(self.today)?;
        let goals = &self.config.goals;

        Ok(json!({
            "stats": stats,
            "phase": get_phase(i64::from(stats.practice_count)),
            "level": get_level(stats.total_hours),
            "message": journey_stage_message(stats.practice_count),
            "weeklyGoal": {
                "target": goals.weekly_target,
                "sessions": stats.last7_days,
                "ratio": goals.weekly_ratio(stats.last7_days),
            },
        }))
    }

    /// Training summary for the trailing `days`, 0 for all time.
    pub fn insights(&self, days: u32) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(self.journal.summary(days, self.today)?)?)
    }

    pub fn phase(&self) -> anyhow::Result<Value> {
        let stats = self.journal.stats(self.today)?;
        Ok(serde_json::to_value(get_phase(i64::from(stats.practice_count)))?)
    }

    pub fn level(&self) -> anyhow::Result<Value> {
        let stats = self.journal.stats(self.today)?;
        Ok(serde_json::to_value(get_level(stats.total_hours))?)
    }

    pub fn badges(&self, all: bool) -> anyhow::Result<Value> {
        let profile = self.journal.profile()?;
        if !all {
            return Ok(json!({
                "earnedBadges": profile.earned_badges,
                "earnedMilestones": profile.earned_milestones,
            }));
        }

        let stats = self.journal.stats(self.today)?;
        let statuses = self.journal.achievement_statuses(&stats, &profile);
        Ok(serde_json::to_value(statuses)?)
    }

    pub fn evaluate(&self) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(self.journal.refresh(self.today)?)?)
    }

    pub fn export(&self, output: Option<&Path>) -> anyhow::Result<Value> {
        let export = self.journal.export()?;
        let Some(path) = output else {
            return Ok(serde_json::to_value(export)?);
        };

        let content = serde_json::to_string_pretty(&export)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;

        Ok(json!({
            "written": path.display().to_string(),
            "practices": export.practices.len(),
        }))
    }

    pub fn import(&mut self, file: &Path) -> anyhow::Result<Value> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let parsed: ImportFile = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", file.display()))?;

        Ok(serde_json::to_value(self.journal.import(parsed, self.today)?)?)
    }

    pub fn reset(&mut self, confirmed: bool) -> anyhow::Result<Value> {
        if !confirmed {
            bail!("refusing to delete all data without --yes");
        }
        self.journal.reset()?;
        Ok(json!({ "reset": true }))
    }

    pub fn config(&mut self, weekly_target: Option<u32>) -> anyhow::Result<Value> {
        if let Some(target) = weekly_target {
            self.config.goals.weekly_target = target;
            save_config(&self.config)?;
        }
        Ok(serde_json::to_value(&self.config)?)
    }
}
