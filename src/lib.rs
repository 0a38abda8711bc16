//! # vendomatic
//!
//! Half-step sequencing for 4-coil unipolar stepper motors (28BYJ-48 class),
//! with an optional ultrasonic presence trigger for a vending-machine style
//! dispenser. Built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Fixed half-step table**: 8-phase excitation pattern for 4 output lines
//! - **embedded-hal 1.0**: Uses `OutputPin` for coil lines, `DelayNs` for dwell
//! - **no_std compatible**: Core library works without standard library
//! - **Speed-derived timing**: Dwell recomputed from RPM on every step
//! - **Presence trigger**: HC-SR04 driver and hysteresis detector for vending
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vendomatic::{Direction, Sequencer};
//!
//! let mut motor = Sequencer::builder()
//!     .channels([in1, in2, in3, in4])
//!     .delay(delay)
//!     .steps_per_revolution(4096)
//!     .speed_rpm(15.0)
//!     .build()?;
//!
//! motor.step(4096, Direction::Clockwise)?;
//! motor.reset()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the log macros are visible to every module below.
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod motion;
pub mod motor;
pub mod trigger;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig, TriggerConfig};
pub use driver::{run_steps, PollOutcome, RunReport, VendingLoop};
pub use error::{Error, Result};
pub use motion::{Direction, StepTiming};
pub use motor::{Phase, PhaseTable, Sequencer, SequencerBuilder, StopFlag, HALF_STEP};
pub use trigger::{DistanceSensor, Edge, PresenceDetector};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Centimeters, Rpm};
