//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Rpm;

/// Steps per output revolution of a 28BYJ-48 in half-step mode (64:1 gearbox).
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 4096;

/// Speed used by the standalone run when none is configured.
pub const DEFAULT_SPEED_RPM: f32 = 15.0;

/// Motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    #[serde(default = "default_name")]
    pub name: String<32>,

    /// Half-steps per output shaft revolution, gearbox included.
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u32,

    /// Target rotational speed.
    #[serde(default = "default_speed")]
    pub speed_rpm: Rpm,
}

fn default_name() -> String<32> {
    String::try_from("motor").unwrap_or_default()
}

fn default_steps_per_revolution() -> u32 {
    DEFAULT_STEPS_PER_REVOLUTION
}

fn default_speed() -> Rpm {
    Rpm(DEFAULT_SPEED_RPM)
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            steps_per_revolution: default_steps_per_revolution(),
            speed_rpm: default_speed(),
        }
    }
}
