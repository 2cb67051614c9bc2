//! Parameter resolver: turns an input profile into simulation constants.
//!
//! Everything downstream of this module works in kilograms and kcal; the
//! resolver is the only place unit conversion and personalization offsets
//! happen.

use crate::{ForecastRequest, SimulationState};

/// Pounds-to-kilograms conversion factor
pub const KG_PER_LB: f64 = 0.453592;

/// Katch-McArdle intercept and slope (kcal/day over FFM kg)
const KATCH_MCARDLE_BASE: f64 = 370.0;
const KATCH_MCARDLE_SLOPE: f64 = 21.6;

/// Simulation constants resolved once per run
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    pub weight_kg: f64,
    pub fat_mass_kg: f64,
    pub ffm_kg: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub hourly_tdee: f64,
    /// Additive shift of every phase threshold, in hours. Negative means
    /// the person reaches ketosis faster than baseline.
    pub ketosis_timing_adjustment_hours: f64,
}

impl SimulationParams {
    /// Starting simulation state for this run
    pub fn initial_state(&self) -> SimulationState {
        SimulationState::new(self.fat_mass_kg, self.ffm_kg)
    }
}

/// Resolve simulation constants from a validated profile.
///
/// BMR uses Katch-McArdle (lean-mass based); TDEE is `bmr * activity_level`
/// unless the profile carries an explicit override.
pub fn resolve(request: &ForecastRequest) -> SimulationParams {
    let input_weight_kg = request.weight_kg();
    let fat_mass_kg = input_weight_kg * request.body_fat_percent / 100.0;
    let ffm_kg = input_weight_kg - fat_mass_kg;
    // Express starting weight as the mass sum so an unchanged simulation
    // state reproduces it exactly
    let weight_kg = fat_mass_kg + ffm_kg;

    let bmr = KATCH_MCARDLE_BASE + KATCH_MCARDLE_SLOPE * ffm_kg;
    let tdee = request.tdee_override.unwrap_or(bmr * request.activity_level);

    let adjustment = request.insulin_sensitivity.timing_offset_hours()
        + request.fasting_experience.timing_offset_hours()
        + body_fat_timing_offset(request.body_fat_percent);

    tracing::debug!(
        "Resolved params: bmr={:.0} kcal, tdee={:.0} kcal, timing adjustment={:+.0}h",
        bmr,
        tdee,
        adjustment
    );

    SimulationParams {
        weight_kg,
        fat_mass_kg,
        ffm_kg,
        bmr,
        tdee,
        hourly_tdee: tdee / 24.0,
        ketosis_timing_adjustment_hours: adjustment,
    }
}

/// Body-fat correction to ketosis timing: higher reserves reach ketosis
/// sooner, very lean people slower.
fn body_fat_timing_offset(body_fat_percent: f64) -> f64 {
    if body_fat_percent > 25.0 {
        -2.0
    } else if body_fat_percent < 15.0 {
        2.0
    } else {
        0.0
    }
}
