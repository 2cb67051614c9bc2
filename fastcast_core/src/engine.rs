//! Forecast engine: sequential weekly simulation and result aggregation.
//!
//! Weeks run strictly in order, each starting from the previous week's
//! ending body composition. The engine is pure computation: no clocks,
//! randomness, or I/O, so identical requests produce identical forecasts.

use crate::driver::run_week;
use crate::params;
use crate::phases;
use crate::{Forecast, ForecastRequest, InitialStats, Result, Summary, WeeklyResult};

/// Run the full multi-week forecast for a validated profile.
///
/// The request is re-validated at this boundary; a malformed profile never
/// produces a silently wrong trajectory.
pub fn run_forecast(request: &ForecastRequest) -> Result<Forecast> {
    request.validate()?;

    let params = params::resolve(request);

    let initial_stats = InitialStats {
        weight_kg: params.weight_kg,
        body_fat_percent: request.body_fat_percent,
        fat_mass_kg: params.fat_mass_kg,
        fat_free_mass_kg: params.ffm_kg,
        bmr: params.bmr,
        daily_tdee: params.tdee,
    };

    tracing::info!(
        "Starting forecast: {:.1} kg at {:.1}% body fat, {} week(s)",
        params.weight_kg,
        request.body_fat_percent,
        request.weeks
    );

    let mut state = params.initial_state();
    let mut weekly_results = Vec::with_capacity(request.weeks as usize);

    for week in 1..=request.weeks {
        let outcome = run_week(
            &params,
            &request.fasting_blocks,
            &request.ketosis_states,
            &mut state,
        );

        state.fat_mass_kg -= outcome.fat_loss_kg;
        state.ffm_kg -= outcome.ffm_loss_kg;
        state.clamp_to_valid();

        let dominant = phases::descriptor(outcome.dominant_phase);

        weekly_results.push(WeeklyResult {
            week,
            weight_kg: state.weight_kg(),
            body_fat_percent: state.body_fat_percent(),
            fat_mass_kg: state.fat_mass_kg,
            fat_free_mass_kg: state.ffm_kg,
            fat_loss_kg: outcome.fat_loss_kg,
            ffm_loss_kg: outcome.ffm_loss_kg,
            dominant_phase: outcome.dominant_phase,
            protein_maintenance_kcal_per_day: dominant.protein_kcal_per_day,
            ffm_preservation_factor: dominant.ffm_preservation_factor(),
        });
    }

    let summary = Summary {
        total_weeks: request.weeks,
        final_weight_kg: state.weight_kg(),
        final_body_fat_percent: state.body_fat_percent(),
        total_fat_lost_kg: params.fat_mass_kg - state.fat_mass_kg,
        total_ffm_lost_kg: params.ffm_kg - state.ffm_kg,
        total_weight_lost_kg: params.weight_kg - state.weight_kg(),
    };

    tracing::info!(
        "Forecast complete: {:.1} kg -> {:.1} kg over {} week(s)",
        params.weight_kg,
        summary.final_weight_kg,
        summary.total_weeks
    );

    Ok(Forecast {
        initial_stats,
        weekly_results,
        summary,
    })
}

/// First week of the trajectory at or below a goal weight.
///
/// `Some(0)` if the starting weight already meets the goal; `None` if the
/// forecast never reaches it.
pub fn weeks_to_goal(forecast: &Forecast, goal_weight_kg: f64) -> Option<u32> {
    if forecast.initial_stats.weight_kg <= goal_weight_kg {
        return Some(0);
    }
    forecast
        .weekly_results
        .iter()
        .find(|result| result.weight_kg <= goal_weight_kg)
        .map(|result| result.week)
}
