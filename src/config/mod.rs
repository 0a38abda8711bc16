//! Configuration module for vendomatic.
//!
//! Provides types for loading and validating motor and trigger configurations
//! from TOML files (with `std` feature) or pre-built values.

mod motor;
mod system;
mod trigger;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::{MotorConfig, DEFAULT_SPEED_RPM, DEFAULT_STEPS_PER_REVOLUTION};
pub use system::SystemConfig;
pub use trigger::TriggerConfig;
pub use validation::validate_config;
pub(crate) use validation::validate_trigger;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Centimeters, Rpm};
