//! Ketosis phase table and classifier.
//!
//! The four phases of a fast are described by one ordered table of
//! descriptors. Classification picks the highest phase whose (personalized)
//! lower bound is met; within every phase past the baseline, the protein
//! maintenance energy and FFM preservation fraction are linearly
//! interpolated from the previous phase's base values to the current
//! phase's, so handoffs are smooth rather than stepwise.

use crate::KetosisPhase;

/// One row of the phase table
#[derive(Clone, Copy, Debug)]
pub struct PhaseDescriptor {
    pub phase: KetosisPhase,
    /// Unadjusted cumulative-fasting-hours lower bound
    pub lower_bound_hours: f64,
    /// Floor applied after the personalization adjustment, preventing a
    /// large negative adjustment from collapsing the phase ordering
    pub min_lower_bound_hours: f64,
    /// Energy spent maintaining protein turnover, kcal/day
    pub protein_kcal_per_day: f64,
    /// Fraction of lean-tissue loss spared in this phase
    pub preservation_fraction: f64,
}

impl PhaseDescriptor {
    /// Multiplier applied to FFM loss: 1 minus the spared fraction
    pub fn ffm_preservation_factor(&self) -> f64 {
        1.0 - self.preservation_fraction
    }
}

/// Number of modeled phases
pub const PHASE_COUNT: usize = 4;

/// Ordered phase table, earliest phase first
pub static PHASE_TABLE: [PhaseDescriptor; PHASE_COUNT] = [
    PhaseDescriptor {
        phase: KetosisPhase::GlycogenDepletion,
        lower_bound_hours: 0.0,
        min_lower_bound_hours: 0.0,
        protein_kcal_per_day: 160.0,
        preservation_fraction: 0.0,
    },
    PhaseDescriptor {
        phase: KetosisPhase::EarlyKetosis,
        lower_bound_hours: 16.0,
        min_lower_bound_hours: 8.0,
        protein_kcal_per_day: 120.0,
        preservation_fraction: 0.15,
    },
    PhaseDescriptor {
        phase: KetosisPhase::FullKetosis,
        lower_bound_hours: 24.0,
        min_lower_bound_hours: 16.0,
        protein_kcal_per_day: 50.0,
        preservation_fraction: 0.30,
    },
    PhaseDescriptor {
        phase: KetosisPhase::OptimalKetosis,
        lower_bound_hours: 48.0,
        min_lower_bound_hours: 32.0,
        protein_kcal_per_day: 40.0,
        preservation_fraction: 0.40,
    },
];

/// End of the optimal-ketosis interpolation span (hours, with its floor).
/// Past this point the optimal base values apply unchanged.
const OPTIMAL_SPAN_END_HOURS: f64 = 72.0;
const OPTIMAL_SPAN_END_FLOOR_HOURS: f64 = 56.0;

/// Classifier output for one fasting hour
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseResult {
    pub phase: KetosisPhase,
    pub protein_maintenance_kcal_per_day: f64,
    /// Multiplier applied to FFM loss (1 = no sparing)
    pub ffm_preservation_factor: f64,
}

/// Phase boundaries after applying the personalization adjustment.
///
/// Index `i` is the lower bound of `PHASE_TABLE[i]`; the final entry closes
/// the optimal-ketosis interpolation span. The baseline phase always starts
/// at hour 0.
fn adjusted_bounds(adjustment_hours: f64) -> [f64; 5] {
    let mut bounds = [0.0; 5];
    for (i, descriptor) in PHASE_TABLE.iter().enumerate().skip(1) {
        bounds[i] = (descriptor.lower_bound_hours + adjustment_hours)
            .max(descriptor.min_lower_bound_hours);
    }
    bounds[4] = (OPTIMAL_SPAN_END_HOURS + adjustment_hours).max(OPTIMAL_SPAN_END_FLOOR_HOURS);
    bounds
}

/// Adjusted lower bound of the full-ketosis phase. A fasting block flagged
/// as already ketosis-adapted starts its hour counter here.
pub fn full_ketosis_threshold(adjustment_hours: f64) -> f64 {
    adjusted_bounds(adjustment_hours)[2]
}

/// Look up the base descriptor for a phase
pub fn descriptor(phase: KetosisPhase) -> &'static PhaseDescriptor {
    PHASE_TABLE
        .iter()
        .find(|d| d.phase == phase)
        .unwrap_or(&PHASE_TABLE[0])
}

/// Classify one fasting hour by cumulative hours fasted.
///
/// The baseline phase returns its base values directly; every later phase
/// interpolates from the previous phase's base values across the adjusted
/// span, clamped so hours past the span end hold the phase's own values.
pub fn classify(cumulative_hours: f64, adjustment_hours: f64) -> PhaseResult {
    let bounds = adjusted_bounds(adjustment_hours);

    let index = (0..PHASE_TABLE.len())
        .rev()
        .find(|&i| cumulative_hours >= bounds[i])
        .unwrap_or(0);
    let current = &PHASE_TABLE[index];

    if index == 0 {
        return PhaseResult {
            phase: current.phase,
            protein_maintenance_kcal_per_day: current.protein_kcal_per_day,
            ffm_preservation_factor: current.ffm_preservation_factor(),
        };
    }

    let previous = &PHASE_TABLE[index - 1];
    let span_start = bounds[index];
    let span_end = bounds[index + 1];
    let progress = ((cumulative_hours - span_start) / (span_end - span_start)).clamp(0.0, 1.0);

    let protein = lerp(
        previous.protein_kcal_per_day,
        current.protein_kcal_per_day,
        progress,
    );
    let fraction = lerp(
        previous.preservation_fraction,
        current.preservation_fraction,
        progress,
    );

    PhaseResult {
        phase: current.phase,
        protein_maintenance_kcal_per_day: protein,
        ffm_preservation_factor: 1.0 - fraction,
    }
}

fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_phase_uses_base_values() {
        let result = classify(0.0, 0.0);
        assert_eq!(result.phase, KetosisPhase::GlycogenDepletion);
        assert_eq!(result.protein_maintenance_kcal_per_day, 160.0);
        assert_eq!(result.ffm_preservation_factor, 1.0);

        // Just under the first boundary is still baseline
        let result = classify(15.9, 0.0);
        assert_eq!(result.phase, KetosisPhase::GlycogenDepletion);
    }

    #[test]
    fn test_phase_boundaries_unadjusted() {
        assert_eq!(classify(16.0, 0.0).phase, KetosisPhase::EarlyKetosis);
        assert_eq!(classify(24.0, 0.0).phase, KetosisPhase::FullKetosis);
        assert_eq!(classify(48.0, 0.0).phase, KetosisPhase::OptimalKetosis);
        assert_eq!(classify(200.0, 0.0).phase, KetosisPhase::OptimalKetosis);
    }

    #[test]
    fn test_interpolation_midpoint() {
        // Halfway through early ketosis (16..24): values halfway between
        // glycogen-depletion and early-ketosis bases
        let result = classify(20.0, 0.0);
        assert_eq!(result.phase, KetosisPhase::EarlyKetosis);
        assert!((result.protein_maintenance_kcal_per_day - 140.0).abs() < 1e-9);
        assert!((result.ffm_preservation_factor - (1.0 - 0.075)).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_endpoints() {
        // At a phase's start the previous phase's base values apply
        let at_start = classify(24.0, 0.0);
        assert!((at_start.protein_maintenance_kcal_per_day - 120.0).abs() < 1e-9);

        // At the span end the phase's own base values apply
        let at_end = classify(48.0, 0.0);
        assert!((at_end.protein_maintenance_kcal_per_day - 50.0).abs() < 1e-9);
        assert!((at_end.ffm_preservation_factor - 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_optimal_holds_base_values_past_span() {
        let result = classify(100.0, 0.0);
        assert_eq!(result.phase, KetosisPhase::OptimalKetosis);
        assert!((result.protein_maintenance_kcal_per_day - 40.0).abs() < 1e-9);
        assert!((result.ffm_preservation_factor - 0.60).abs() < 1e-9);
    }

    #[test]
    fn test_positive_adjustment_delays_phases() {
        // +6h: early ketosis now starts at 22
        assert_eq!(classify(20.0, 6.0).phase, KetosisPhase::GlycogenDepletion);
        assert_eq!(classify(22.0, 6.0).phase, KetosisPhase::EarlyKetosis);
    }

    #[test]
    fn test_negative_adjustment_floors_hold() {
        // -20h would put bounds below their floors; floors win
        let bounds = adjusted_bounds(-20.0);
        assert_eq!(bounds, [0.0, 8.0, 16.0, 32.0, 56.0]);
        assert_eq!(classify(8.0, -20.0).phase, KetosisPhase::EarlyKetosis);
        assert_eq!(classify(7.9, -20.0).phase, KetosisPhase::GlycogenDepletion);
    }

    #[test]
    fn test_full_ketosis_threshold_adjusts() {
        assert_eq!(full_ketosis_threshold(0.0), 24.0);
        assert_eq!(full_ketosis_threshold(4.0), 28.0);
        assert_eq!(full_ketosis_threshold(-20.0), 16.0);
    }

    #[test]
    fn test_phase_never_regresses_with_hours() {
        for &adjustment in &[-10.0, 0.0, 8.0] {
            let mut last_index = 0;
            for hour in 0..96 {
                let phase = classify(hour as f64, adjustment).phase;
                let index = PHASE_TABLE.iter().position(|d| d.phase == phase).unwrap();
                assert!(
                    index >= last_index,
                    "phase regressed at hour {} (adjustment {})",
                    hour,
                    adjustment
                );
                last_index = index;
            }
        }
    }
}
