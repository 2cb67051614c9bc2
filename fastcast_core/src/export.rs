//! Forecast export to CSV and JSON.
//!
//! Weekly results go to a headed CSV for spreadsheets and chart tooling;
//! the full forecast (initial stats and summary included) goes to JSON.

use crate::{Forecast, Result, WeeklyResult};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

/// CSV row format for one weekly result
#[derive(Debug, Serialize)]
struct CsvRow {
    week: u32,
    weight_kg: f64,
    body_fat_percent: f64,
    fat_mass_kg: f64,
    fat_free_mass_kg: f64,
    fat_loss_kg: f64,
    ffm_loss_kg: f64,
    dominant_phase: &'static str,
}

impl From<&WeeklyResult> for CsvRow {
    fn from(result: &WeeklyResult) -> Self {
        Self {
            week: result.week,
            weight_kg: result.weight_kg,
            body_fat_percent: result.body_fat_percent,
            fat_mass_kg: result.fat_mass_kg,
            fat_free_mass_kg: result.fat_free_mass_kg,
            fat_loss_kg: result.fat_loss_kg,
            ffm_loss_kg: result.ffm_loss_kg,
            dominant_phase: result.dominant_phase.label(),
        }
    }
}

/// Write the weekly trajectory to a CSV file with headers
pub fn write_weekly_csv(path: &Path, forecast: &Forecast) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for result in &forecast.weekly_results {
        writer.serialize(CsvRow::from(result))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!(
        "Wrote {} weekly results to {:?}",
        forecast.weekly_results.len(),
        path
    );
    Ok(())
}

/// Write the complete forecast to a JSON file
pub fn write_forecast_json(path: &Path, forecast: &Forecast) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    serde_json::to_writer_pretty(&file, forecast)?;
    file.sync_all()?;

    tracing::info!("Wrote forecast JSON to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_forecast;
    use crate::profile::sample_profile;

    #[test]
    fn test_csv_has_headers_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("weekly.csv");

        let mut request = sample_profile();
        request.weeks = 3;
        let forecast = run_forecast(&request).unwrap();

        write_weekly_csv(&csv_path, &forecast).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "week,weight_kg,body_fat_percent,fat_mass_kg,fat_free_mass_kg,\
             fat_loss_kg,ffm_loss_kg,dominant_phase"
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_json_roundtrips() {
        // Bit-exact float equality relies on serde_json's float_roundtrip
        // feature; without it re-parsing can drift by one ULP
        let temp_dir = tempfile::tempdir().unwrap();
        let json_path = temp_dir.path().join("forecast.json");

        let forecast = run_forecast(&sample_profile()).unwrap();
        write_forecast_json(&json_path, &forecast).unwrap();

        let contents = std::fs::read_to_string(&json_path).unwrap();
        let parsed: Forecast = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, forecast);
    }
}
