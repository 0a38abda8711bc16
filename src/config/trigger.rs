//! Presence trigger configuration from TOML.

use serde::Deserialize;

use super::units::Centimeters;

/// Hysteresis band, pacing, and cooldown for the vending loop.
///
/// The near band is exclusive on both ends. Release happens only once the
/// reading is strictly beyond `far`.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    /// Lower (exclusive) bound of the trigger band.
    #[serde(rename = "near_min_cm", default = "default_near_min")]
    pub near_min: Centimeters,

    /// Upper (exclusive) bound of the trigger band.
    #[serde(rename = "near_max_cm", default = "default_near_max")]
    pub near_max: Centimeters,

    /// Readings beyond this distance re-arm the trigger.
    #[serde(rename = "far_cm", default = "default_far")]
    pub far: Centimeters,

    /// Pause between sensor reads.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u32,

    /// Pause after each vend before polling resumes.
    #[serde(default = "default_cooldown")]
    pub cooldown_ms: u32,

    /// Steps per vend. Defaults to one full revolution of the motor.
    #[serde(default)]
    pub vend_steps: Option<u32>,
}

fn default_near_min() -> Centimeters {
    Centimeters(1.0)
}

fn default_near_max() -> Centimeters {
    Centimeters(8.0)
}

fn default_far() -> Centimeters {
    Centimeters(10.0)
}

fn default_poll_interval() -> u32 {
    100
}

fn default_cooldown() -> u32 {
    3000
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            near_min: default_near_min(),
            near_max: default_near_max(),
            far: default_far(),
            poll_interval_ms: default_poll_interval(),
            cooldown_ms: default_cooldown(),
            vend_steps: None,
        }
    }
}

impl TriggerConfig {
    /// Check whether a reading lies inside the (exclusive) trigger band.
    #[inline]
    pub fn in_near_band(&self, distance: Centimeters) -> bool {
        distance.0 > self.near_min.0 && distance.0 < self.near_max.0
    }

    /// Check whether a reading is far enough to re-arm the trigger.
    #[inline]
    pub fn beyond_far(&self, distance: Centimeters) -> bool {
        distance.0 > self.far.0
    }

    /// Check that `near_min < near_max <= far` and all bounds are finite.
    pub fn is_band_valid(&self) -> bool {
        let finite = self.near_min.0.is_finite()
            && self.near_max.0.is_finite()
            && self.far.0.is_finite();
        finite && self.near_min.0 < self.near_max.0 && self.near_max.0 <= self.far.0
    }

    /// Steps to run per vend for a motor with the given revolution size.
    #[inline]
    pub fn vend_steps_for(&self, steps_per_revolution: u32) -> u32 {
        self.vend_steps.unwrap_or(steps_per_revolution)
    }
}
