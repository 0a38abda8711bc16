//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig, TriggerConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Steps per revolution is positive
/// - Speed is finite and positive
/// - Trigger band is ordered (`near_min < near_max <= far`)
/// - Poll interval is positive
/// - Vend steps, when set, is positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motor(&config.motor)?;
    validate_trigger(&config.trigger)?;
    Ok(())
}

pub(crate) fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if !config.speed_rpm.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSpeed(config.speed_rpm.0)));
    }

    Ok(())
}

pub(crate) fn validate_trigger(config: &TriggerConfig) -> Result<()> {
    if !config.is_band_valid() {
        return Err(Error::Config(ConfigError::InvalidTriggerBand {
            near_min: config.near_min.0,
            near_max: config.near_max.0,
            far: config.far.0,
        }));
    }

    if config.poll_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidPollInterval(
            config.poll_interval_ms,
        )));
    }

    // A zero-step vend would trigger and silently do nothing.
    if let Some(0) = config.vend_steps {
        return Err(Error::Config(ConfigError::InvalidVendSteps(0)));
    }

    Ok(())
}
