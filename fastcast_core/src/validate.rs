//! Boundary validation for forecast requests.
//!
//! The engine assumes validated input; everything that can make a run
//! silently wrong (mismatched schedule arrays, non-finite numbers, a week
//! count that unbounds the hour loop) is rejected here with a descriptive
//! error instead.

use crate::driver::HOURS_PER_WEEK;
use crate::{Error, ForecastRequest, Result};

/// Upper bound on simulated weeks, keeping `weeks * 168` hour iterations sane
pub const MAX_WEEKS: u32 = 520;

impl ForecastRequest {
    /// Validate the profile before it reaches the engine
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "weight must be a positive number, got {}",
                self.weight
            )));
        }

        if !self.body_fat_percent.is_finite()
            || !(0.0..=100.0).contains(&self.body_fat_percent)
        {
            return Err(Error::InvalidProfile(format!(
                "body_fat_percent must be between 0 and 100, got {}",
                self.body_fat_percent
            )));
        }

        if !self.activity_level.is_finite() || self.activity_level <= 0.0 {
            return Err(Error::InvalidProfile(format!(
                "activity_level must be a positive multiplier, got {}",
                self.activity_level
            )));
        }

        if let Some(tdee) = self.tdee_override {
            if !tdee.is_finite() || tdee <= 0.0 {
                return Err(Error::InvalidProfile(format!(
                    "tdee_override must be a positive number, got {}",
                    tdee
                )));
            }
        }

        if self.weeks == 0 {
            return Err(Error::InvalidProfile("weeks must be at least 1".into()));
        }
        if self.weeks > MAX_WEEKS {
            return Err(Error::InvalidProfile(format!(
                "weeks must be at most {}, got {}",
                MAX_WEEKS, self.weeks
            )));
        }

        if self.ketosis_states.len() != self.fasting_blocks.len() {
            return Err(Error::InvalidProfile(format!(
                "ketosis_states length ({}) must match fasting_blocks length ({})",
                self.ketosis_states.len(),
                self.fasting_blocks.len()
            )));
        }

        if self.fasting_blocks.iter().any(|&block| block == 0) {
            return Err(Error::InvalidProfile(
                "fasting_blocks must not contain zero-length blocks".into(),
            ));
        }

        // A final block running past hour 168 is truncated by the driver,
        // but a block that never starts inside the week is dead config.
        let mut block_start = 0u32;
        for (i, &block) in self.fasting_blocks.iter().enumerate() {
            if block_start >= HOURS_PER_WEEK {
                return Err(Error::InvalidProfile(format!(
                    "fasting_blocks[{}] starts at hour {}, past the {}-hour week",
                    i, block_start, HOURS_PER_WEEK
                )));
            }
            block_start += block;
        }

        Ok(())
    }
}
