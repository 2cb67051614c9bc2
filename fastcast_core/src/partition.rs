//! Energy partitioner: splits one fasting hour's expenditure between lean
//! tissue and fat.
//!
//! Pure function of its inputs. The advanced mode models the limit on how
//! fast a lean body can mobilize fat: fat oxidation is capped per kg of fat
//! mass, and any expenditure past the cap falls on lean tissue instead.

use crate::phases::PhaseResult;

/// Energy density of adipose tissue, kcal per kg
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

/// Energy density of lean tissue, kcal per kg
pub const KCAL_PER_KG_LEAN: f64 = 1000.0;

/// Maximum daily fat oxidation per kg of fat mass, kcal
pub const MAX_FAT_OXIDATION_KCAL_PER_KG_PER_DAY: f64 = 69.0;

/// Body-fat percentage at or below which the oxidation cap applies
pub const ADVANCED_MODE_BODY_FAT_PERCENT: f64 = 10.0;

/// Oxidation mode for a simulated week
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyFatMode {
    /// Body fat above 10%: fat supplies all remaining expenditure
    Default,
    /// Body fat at or below 10%: fat oxidation capped, excess hits FFM
    Advanced,
}

impl BodyFatMode {
    /// Mode for a week, chosen from the body-fat snapshot at week start
    pub fn for_body_fat(body_fat_percent: f64) -> Self {
        if body_fat_percent <= ADVANCED_MODE_BODY_FAT_PERCENT {
            BodyFatMode::Advanced
        } else {
            BodyFatMode::Default
        }
    }
}

/// Losses from one fasting hour
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HourDelta {
    pub fat_loss_kg: f64,
    pub ffm_loss_kg: f64,
}

/// Partition one hour of energy expenditure into fat and FFM losses.
///
/// `fat_mass_kg` is the week-start snapshot, not the hour-by-hour running
/// value; the cap is deliberately held fixed across the week.
pub fn partition_energy(
    hourly_tdee: f64,
    phase: &PhaseResult,
    fat_mass_kg: f64,
    mode: BodyFatMode,
) -> HourDelta {
    let ffm_kcal = phase.protein_maintenance_kcal_per_day / 24.0;
    let mut ffm_loss_kg = ffm_kcal / KCAL_PER_KG_LEAN * phase.ffm_preservation_factor;

    let remaining_kcal = hourly_tdee - ffm_loss_kg * KCAL_PER_KG_LEAN;

    let fat_loss_kg = match mode {
        BodyFatMode::Default => remaining_kcal.max(0.0) / KCAL_PER_KG_FAT,
        BodyFatMode::Advanced => {
            let cap_kcal = MAX_FAT_OXIDATION_KCAL_PER_KG_PER_DAY / 24.0 * fat_mass_kg;
            let fat_kcal = remaining_kcal.min(cap_kcal).max(0.0);

            let excess_kcal = remaining_kcal - fat_kcal;
            if excess_kcal > 0.0 {
                // Deficit the body cannot source from fat comes out of lean mass
                ffm_loss_kg += excess_kcal / KCAL_PER_KG_LEAN;
            }

            fat_kcal / KCAL_PER_KG_FAT
        }
    };

    HourDelta {
        fat_loss_kg,
        ffm_loss_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::classify;

    #[test]
    fn test_mode_switch_boundary() {
        assert_eq!(BodyFatMode::for_body_fat(10.0), BodyFatMode::Advanced);
        assert_eq!(BodyFatMode::for_body_fat(10.1), BodyFatMode::Default);
        assert_eq!(BodyFatMode::for_body_fat(25.0), BodyFatMode::Default);
    }

    #[test]
    fn test_default_mode_partition() {
        // At the optimal boundary full-ketosis base values apply:
        // 50 kcal/day protein, preservation factor 0.70
        let phase = classify(48.0, 0.0);
        let delta = partition_energy(100.0, &phase, 20.0, BodyFatMode::Default);

        let expected_ffm = 50.0 / 24.0 / KCAL_PER_KG_LEAN * 0.70;
        assert!((delta.ffm_loss_kg - expected_ffm).abs() < 1e-12);

        let remaining = 100.0 - expected_ffm * KCAL_PER_KG_LEAN;
        assert!((delta.fat_loss_kg - remaining / KCAL_PER_KG_FAT).abs() < 1e-12);
    }

    #[test]
    fn test_advanced_mode_under_cap_matches_default() {
        let phase = classify(30.0, 0.0);
        // Plenty of fat mass: cap far above hourly expenditure
        let capped = partition_energy(90.0, &phase, 40.0, BodyFatMode::Advanced);
        let free = partition_energy(90.0, &phase, 40.0, BodyFatMode::Default);

        assert!((capped.fat_loss_kg - free.fat_loss_kg).abs() < 1e-12);
        assert!((capped.ffm_loss_kg - free.ffm_loss_kg).abs() < 1e-12);
    }

    #[test]
    fn test_advanced_mode_cap_diverts_excess_to_ffm() {
        let phase = classify(30.0, 0.0);
        // 5 kg fat mass: cap is 69/24*5 = 14.375 kcal/h, well under TDEE
        let delta = partition_energy(100.0, &phase, 5.0, BodyFatMode::Advanced);

        let cap_kcal = MAX_FAT_OXIDATION_KCAL_PER_KG_PER_DAY / 24.0 * 5.0;
        assert!((delta.fat_loss_kg - cap_kcal / KCAL_PER_KG_FAT).abs() < 1e-12);

        let base_ffm =
            phase.protein_maintenance_kcal_per_day / 24.0 / KCAL_PER_KG_LEAN
                * phase.ffm_preservation_factor;
        let remaining = 100.0 - base_ffm * KCAL_PER_KG_LEAN;
        let excess = remaining - cap_kcal;
        assert!(excess > 0.0);
        assert!((delta.ffm_loss_kg - (base_ffm + excess / KCAL_PER_KG_LEAN)).abs() < 1e-12);
    }

    #[test]
    fn test_energy_accounting_balances() {
        // kcal out of tissue equals the hourly expenditure when uncapped
        let phase = classify(20.0, 0.0);
        let delta = partition_energy(95.0, &phase, 25.0, BodyFatMode::Default);

        let kcal_accounted =
            delta.fat_loss_kg * KCAL_PER_KG_FAT + delta.ffm_loss_kg * KCAL_PER_KG_LEAN;
        assert!((kcal_accounted - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_fat_mass_advanced_mode() {
        let phase = classify(30.0, 0.0);
        let delta = partition_energy(100.0, &phase, 0.0, BodyFatMode::Advanced);

        assert_eq!(delta.fat_loss_kg, 0.0);
        assert!(delta.ffm_loss_kg > 0.0);
    }
}
