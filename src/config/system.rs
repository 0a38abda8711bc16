//! System configuration - root configuration structure.

use serde::Deserialize;

use super::motor::MotorConfig;
use super::trigger::TriggerConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Motor parameters.
    #[serde(default)]
    pub motor: MotorConfig,

    /// Presence trigger parameters (only used by the vending loop).
    #[serde(default)]
    pub trigger: TriggerConfig,
}

impl SystemConfig {
    /// Steps to run per vend with this configuration.
    pub fn vend_steps(&self) -> u32 {
        self.trigger.vend_steps_for(self.motor.steps_per_revolution)
    }
}
