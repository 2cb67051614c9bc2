//! Weekly driver: walks 168 simulated hours through the fasting schedule.
//!
//! The schedule tiles the week with alternating fasting/feeding blocks,
//! first block fasting. Hours beyond the tiled schedule are feeding. Each
//! fasting hour is classified and partitioned. Feeding hours contribute no
//! loss and do not erase ketosis progress; the hour counter only resets
//! when the next fasting block begins un-adapted.

use crate::params::SimulationParams;
use crate::partition::{partition_energy, BodyFatMode};
use crate::phases::{self, PHASE_COUNT, PHASE_TABLE};
use crate::{KetosisPhase, SimulationState};

/// Hours simulated per week
pub const HOURS_PER_WEEK: u32 = 168;

/// Accumulated losses and reporting data for one simulated week
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeekOutcome {
    pub fat_loss_kg: f64,
    pub ffm_loss_kg: f64,
    /// Phase occupying the most fasting hours; ties resolve to the
    /// earliest phase in table order
    pub dominant_phase: KetosisPhase,
}

/// Index of the block covering a given hour of the week, walking the block
/// lengths cumulatively. `None` once the tiled schedule is exhausted.
fn block_at(fasting_blocks: &[u32], hour: u32) -> Option<usize> {
    let mut block_start = 0u32;
    for (index, &length) in fasting_blocks.iter().enumerate() {
        let block_end = block_start.saturating_add(length);
        if hour < block_end {
            return Some(index);
        }
        block_start = block_end;
    }
    None
}

/// Blocks alternate fasting/feeding starting with fasting
fn is_fasting_block(index: usize) -> bool {
    index % 2 == 0
}

/// Simulate one week of the schedule, mutating `state` in place.
///
/// The oxidation mode and the fat-mass snapshot feeding the advanced-mode
/// cap are taken once from the week-start composition and held fixed for
/// all 168 hours.
pub fn run_week(
    params: &SimulationParams,
    fasting_blocks: &[u32],
    ketosis_states: &[bool],
    state: &mut SimulationState,
) -> WeekOutcome {
    let mode = BodyFatMode::for_body_fat(state.body_fat_percent());
    let fat_mass_snapshot = state.fat_mass_kg;
    let adjustment = params.ketosis_timing_adjustment_hours;

    let mut fat_loss_kg = 0.0;
    let mut ffm_loss_kg = 0.0;
    let mut phase_hours = [0u32; PHASE_COUNT];

    for hour in 0..HOURS_PER_WEEK {
        let block = block_at(fasting_blocks, hour);

        match block {
            Some(index) if is_fasting_block(index) => {
                let mut force_set = false;

                if state.current_block != Some(index) {
                    // Entering a new fasting block
                    state.current_block = Some(index);
                    state.hours_into_block = 0;

                    if ketosis_states.get(index).copied().unwrap_or(false) {
                        // Already ketosis-adapted: start the counter at the
                        // full-ketosis threshold instead of zero
                        state.cumulative_fasting_hours =
                            phases::full_ketosis_threshold(adjustment);
                        force_set = true;
                    } else {
                        state.cumulative_fasting_hours = 0.0;
                    }
                }

                state.hours_into_block += 1;
                if !force_set {
                    state.cumulative_fasting_hours += 1.0;
                }

                let phase = phases::classify(state.cumulative_fasting_hours, adjustment);
                let delta =
                    partition_energy(params.hourly_tdee, &phase, fat_mass_snapshot, mode);

                fat_loss_kg += delta.fat_loss_kg;
                ffm_loss_kg += delta.ffm_loss_kg;

                if let Some(index) = PHASE_TABLE.iter().position(|d| d.phase == phase.phase) {
                    phase_hours[index] += 1;
                }
            }
            _ => {
                // Feeding hour (or past the tiled schedule). The cumulative
                // fasting counter is left alone; only a new fasting block
                // decides whether it resets.
                state.current_block = None;
                state.hours_into_block = 0;
            }
        }
    }

    let dominant_phase = dominant_phase(&phase_hours);

    tracing::debug!(
        "Week simulated: fat -{:.3} kg, ffm -{:.3} kg, dominant phase {:?}",
        fat_loss_kg,
        ffm_loss_kg,
        dominant_phase
    );

    WeekOutcome {
        fat_loss_kg,
        ffm_loss_kg,
        dominant_phase,
    }
}

/// Phase with the most hours; ties (and the all-zero no-fasting week)
/// resolve to the earliest table entry.
fn dominant_phase(phase_hours: &[u32; PHASE_COUNT]) -> KetosisPhase {
    let mut best = 0;
    for (index, &hours) in phase_hours.iter().enumerate() {
        if hours > phase_hours[best] {
            best = index;
        }
    }
    PHASE_TABLE[best].phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SimulationParams;

    fn test_params() -> SimulationParams {
        SimulationParams {
            weight_kg: 90.0,
            fat_mass_kg: 22.5,
            ffm_kg: 67.5,
            bmr: 1828.0,
            tdee: 2559.2,
            hourly_tdee: 2559.2 / 24.0,
            ketosis_timing_adjustment_hours: 0.0,
        }
    }

    #[test]
    fn test_block_walk() {
        let blocks = [16, 8, 16, 8];
        assert_eq!(block_at(&blocks, 0), Some(0));
        assert_eq!(block_at(&blocks, 15), Some(0));
        assert_eq!(block_at(&blocks, 16), Some(1));
        assert_eq!(block_at(&blocks, 24), Some(2));
        assert_eq!(block_at(&blocks, 47), Some(3));
        assert_eq!(block_at(&blocks, 48), None);
    }

    #[test]
    fn test_empty_schedule_is_a_zero_loss_week() {
        let params = test_params();
        let mut state = params.initial_state();

        let outcome = run_week(&params, &[], &[], &mut state);

        assert_eq!(outcome.fat_loss_kg, 0.0);
        assert_eq!(outcome.ffm_loss_kg, 0.0);
        assert_eq!(outcome.dominant_phase, KetosisPhase::GlycogenDepletion);
        assert_eq!(state.fat_mass_kg, params.fat_mass_kg);
    }

    #[test]
    fn test_feeding_only_hours_lose_nothing() {
        // One fasting hour, rest feeding: losses come from exactly one hour
        let params = test_params();
        let mut state = params.initial_state();

        let outcome = run_week(&params, &[1, 167], &[false, false], &mut state);

        assert!(outcome.fat_loss_kg > 0.0);
        // cumulative hour 1 is deep in glycogen depletion
        assert_eq!(outcome.dominant_phase, KetosisPhase::GlycogenDepletion);
    }

    #[test]
    fn test_ketosis_shortcut_first_hour() {
        // Pre-adapted single fasting hour classifies at full ketosis, not
        // glycogen depletion
        let params = test_params();
        let mut state = params.initial_state();

        let outcome = run_week(&params, &[1, 167], &[true, false], &mut state);

        assert_eq!(outcome.dominant_phase, KetosisPhase::FullKetosis);
    }

    #[test]
    fn test_cumulative_hours_reset_per_unadapted_block() {
        let params = test_params();
        let mut state = params.initial_state();

        // 16h fast / 8h feed: the counter never gets past 16, so the week
        // stays in glycogen depletion throughout
        let outcome = run_week(
            &params,
            &[16, 8, 16, 8, 16, 8, 16, 8, 16, 8, 16, 8, 16, 24],
            &[false; 14],
            &mut state,
        );

        assert_eq!(outcome.dominant_phase, KetosisPhase::GlycogenDepletion);
    }

    #[test]
    fn test_long_fast_progresses_phases() {
        let params = test_params();
        let mut state = params.initial_state();

        // 24h fast, 24h feed, 120h fast: the long block spends most of its
        // hours in optimal ketosis
        let outcome = run_week(&params, &[24, 24, 120], &[false; 3], &mut state);

        assert_eq!(outcome.dominant_phase, KetosisPhase::OptimalKetosis);
        // Still mid-fast at week end
        assert_eq!(state.current_block, Some(2));
        assert_eq!(state.cumulative_fasting_hours, 120.0);
    }

    #[test]
    fn test_feeding_does_not_clear_cumulative_hours() {
        let params = test_params();
        let mut state = params.initial_state();

        // Fast 20h then feed for the rest of the week
        run_week(&params, &[20, 148], &[false, false], &mut state);

        assert_eq!(state.current_block, None);
        assert_eq!(state.hours_into_block, 0);
        // The counter holds its value until the next fasting block begins
        assert_eq!(state.cumulative_fasting_hours, 20.0);
    }

    #[test]
    fn test_losses_accumulate_across_fasting_hours() {
        let params = test_params();
        let mut state = params.initial_state();

        let short = run_week(&params, &[16, 152], &[false, false], &mut state.clone());
        let long = run_week(&params, &[40, 128], &[false, false], &mut state);

        assert!(long.fat_loss_kg > short.fat_loss_kg);
    }
}
