//! Stored profile persistence with file locking.
//!
//! The CLI keeps the person's body-composition profile in a JSON file under
//! the data directory. Reads take a shared lock; writes go through a locked
//! temp file and an atomic rename. Unlike ephemeral app state, a missing or
//! corrupted profile is an error: a forecast needs real numbers, not
//! defaults.

use crate::{Error, ForecastRequest, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ForecastRequest {
    /// Load a profile from a file with shared locking
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InvalidProfile(format!(
                "no profile found at {} (run `fastcast init` to create one)",
                path.display()
            )));
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        let profile: ForecastRequest = serde_json::from_str(&contents).map_err(|e| {
            Error::InvalidProfile(format!("failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!("Loaded profile from {:?}", path);
        Ok(profile)
    }

    /// Save a profile to a file with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        // Exclusive lock on the temp file serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace the old profile
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", path);
        Ok(())
    }
}

/// Sample profile written by `fastcast init`: 200 lb at 25% body fat on a
/// daily 16:8 schedule, ending the week with a long refeed.
pub fn sample_profile() -> ForecastRequest {
    ForecastRequest {
        weight: 200.0,
        weight_unit: crate::WeightUnit::Lb,
        body_fat_percent: 25.0,
        activity_level: 1.4,
        tdee_override: None,
        fasting_blocks: vec![16, 8, 16, 8, 16, 8, 16, 8, 16, 8, 16, 8, 16, 24],
        ketosis_states: vec![false; 14],
        weeks: 12,
        insulin_sensitivity: crate::InsulinSensitivity::Normal,
        fasting_experience: crate::FastingExperience::Intermediate,
    }
}
