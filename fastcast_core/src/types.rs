//! Core domain types for the fastcast forecasting system.
//!
//! This module defines the fundamental types used throughout the system:
//! - The input profile describing a person and their fasting schedule
//! - The simulation state threaded through the weekly driver
//! - Weekly result records and the run summary

use serde::{Deserialize, Serialize};

// ============================================================================
// Input Profile Types
// ============================================================================

/// Unit the profile weight is expressed in
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

/// Insulin sensitivity personalization input
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsulinSensitivity {
    Low,
    #[default]
    Normal,
    High,
}

impl InsulinSensitivity {
    /// Additive contribution to the ketosis timing adjustment, in hours
    pub fn timing_offset_hours(&self) -> f64 {
        match self {
            InsulinSensitivity::Low => 4.0,
            InsulinSensitivity::Normal => 0.0,
            InsulinSensitivity::High => -4.0,
        }
    }
}

/// Fasting experience personalization input
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FastingExperience {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl FastingExperience {
    /// Additive contribution to the ketosis timing adjustment, in hours
    pub fn timing_offset_hours(&self) -> f64 {
        match self {
            FastingExperience::Beginner => 6.0,
            FastingExperience::Intermediate => 2.0,
            FastingExperience::Advanced => -6.0,
        }
    }
}

/// A person's starting body composition and weekly fasting schedule.
///
/// `fasting_blocks` tiles a 168-hour week with alternating fasting/feeding
/// segments, the first block fasting. `ketosis_states` carries one flag per
/// block: `true` means the person is already ketosis-adapted when that
/// fasting block begins.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ForecastRequest {
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub body_fat_percent: f64,
    pub activity_level: f64,
    #[serde(default)]
    pub tdee_override: Option<f64>,
    pub fasting_blocks: Vec<u32>,
    pub ketosis_states: Vec<bool>,
    #[serde(default = "default_weeks")]
    pub weeks: u32,
    #[serde(default)]
    pub insulin_sensitivity: InsulinSensitivity,
    #[serde(default)]
    pub fasting_experience: FastingExperience,
}

fn default_weeks() -> u32 {
    12
}

impl ForecastRequest {
    /// Profile weight converted to kilograms
    pub fn weight_kg(&self) -> f64 {
        match self.weight_unit {
            WeightUnit::Kg => self.weight,
            WeightUnit::Lb => self.weight * crate::params::KG_PER_LB,
        }
    }
}

// ============================================================================
// Ketosis Phases
// ============================================================================

/// The four modeled metabolic stages of a fast
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum KetosisPhase {
    GlycogenDepletion,
    EarlyKetosis,
    FullKetosis,
    OptimalKetosis,
}

impl KetosisPhase {
    /// Human-readable phase name for reports
    pub fn label(&self) -> &'static str {
        match self {
            KetosisPhase::GlycogenDepletion => "glycogen depletion",
            KetosisPhase::EarlyKetosis => "early ketosis",
            KetosisPhase::FullKetosis => "full ketosis",
            KetosisPhase::OptimalKetosis => "optimal ketosis",
        }
    }
}

// ============================================================================
// Simulation State
// ============================================================================

/// Body composition and fasting-progress state threaded through the weekly
/// driver. Owned exclusively by the driver/aggregator; serializable so a run
/// can be inspected or resumed mid-trajectory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    pub fat_mass_kg: f64,
    pub ffm_kg: f64,
    /// Hours continuously fasted within the current fasting block
    pub cumulative_fasting_hours: f64,
    /// Index into `fasting_blocks` of the active fasting block, if any
    pub current_block: Option<usize>,
    pub hours_into_block: u32,
}

impl SimulationState {
    pub fn new(fat_mass_kg: f64, ffm_kg: f64) -> Self {
        Self {
            fat_mass_kg,
            ffm_kg,
            cumulative_fasting_hours: 0.0,
            current_block: None,
            hours_into_block: 0,
        }
    }

    pub fn weight_kg(&self) -> f64 {
        self.fat_mass_kg + self.ffm_kg
    }

    /// Body fat percentage, treating a fully collapsed weight as 0 rather
    /// than letting the division produce NaN.
    pub fn body_fat_percent(&self) -> f64 {
        let weight = self.weight_kg();
        if weight <= 0.0 {
            0.0
        } else {
            (self.fat_mass_kg / weight * 100.0).clamp(0.0, 100.0)
        }
    }

    /// Clamp masses to physically valid ranges after applying a week's losses
    pub fn clamp_to_valid(&mut self) {
        self.fat_mass_kg = self.fat_mass_kg.max(0.0);
        self.ffm_kg = self.ffm_kg.max(0.0);
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// Starting numbers computed once from the input profile
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InitialStats {
    pub weight_kg: f64,
    pub body_fat_percent: f64,
    pub fat_mass_kg: f64,
    pub fat_free_mass_kg: f64,
    pub bmr: f64,
    pub daily_tdee: f64,
}

/// One simulated week's resulting body composition and losses
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyResult {
    pub week: u32,
    pub weight_kg: f64,
    pub body_fat_percent: f64,
    pub fat_mass_kg: f64,
    pub fat_free_mass_kg: f64,
    pub fat_loss_kg: f64,
    pub ffm_loss_kg: f64,
    /// Phase occupying the most fasting hours this week
    pub dominant_phase: KetosisPhase,
    /// Base protein-maintenance energy of the dominant phase
    pub protein_maintenance_kcal_per_day: f64,
    /// Base FFM-loss multiplier of the dominant phase
    pub ffm_preservation_factor: f64,
}

/// Totals across the whole run
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_weeks: u32,
    pub final_weight_kg: f64,
    pub final_body_fat_percent: f64,
    pub total_fat_lost_kg: f64,
    pub total_ffm_lost_kg: f64,
    pub total_weight_lost_kg: f64,
}

/// Complete forecast for one run. Deterministic: two runs over identical
/// requests produce identical forecasts.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub initial_stats: InitialStats,
    pub weekly_results: Vec<WeeklyResult>,
    pub summary: Summary,
}
