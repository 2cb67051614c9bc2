//! Forecast run journal.
//!
//! Completed runs are appended to a JSONL (JSON Lines) file with file
//! locking for safe concurrent access. The journal is advisory history for
//! the `history` command, so malformed lines are skipped with a warning
//! rather than failing the whole read.

use crate::{Forecast, Result};
use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One completed forecast run, as recorded in the journal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ForecastRun {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub weeks: u32,
    pub initial_weight_kg: f64,
    pub final_weight_kg: f64,
    pub total_weight_lost_kg: f64,
    pub final_body_fat_percent: f64,
}

impl ForecastRun {
    /// Journal record for a freshly computed forecast
    pub fn from_forecast(forecast: &Forecast) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            weeks: forecast.summary.total_weeks,
            initial_weight_kg: forecast.initial_stats.weight_kg,
            final_weight_kg: forecast.summary.final_weight_kg,
            total_weight_lost_kg: forecast.summary.total_weight_lost_kg,
            final_body_fat_percent: forecast.summary.final_body_fat_percent,
        }
    }
}

/// Run sink trait for persisting journal records
pub trait RunSink {
    fn append(&mut self, run: &ForecastRun) -> Result<()>;
}

/// JSONL-based run sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RunSink for JsonlSink {
    fn append(&mut self, run: &ForecastRun) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(run)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended run {} to journal", run.id);
        Ok(())
    }
}

/// Read all runs from a journal file, oldest first
pub fn read_runs(path: &Path) -> Result<Vec<ForecastRun>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut runs = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ForecastRun>(&line) {
            Ok(run) => runs.push(run),
            Err(e) => {
                tracing::warn!("Skipping malformed journal line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    Ok(runs)
}

/// Runs recorded within the last `days` days, newest first
pub fn recent_runs(path: &Path, days: i64) -> Result<Vec<ForecastRun>> {
    let cutoff = Utc::now() - Duration::days(days);

    let mut runs: Vec<_> = read_runs(path)?
        .into_iter()
        .filter(|run| run.created_at >= cutoff)
        .collect();
    runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(runs)
}
