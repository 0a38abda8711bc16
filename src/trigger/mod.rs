//! Presence trigger for vendomatic.
//!
//! Provides the distance sensor seam, an HC-SR04 driver, and the hysteresis
//! detector that turns noisy readings into trigger/release edges.

mod hcsr04;
mod presence;
mod sensor;

#[cfg(feature = "std")]
pub use hcsr04::SystemClock;
pub use hcsr04::{Clock, Hcsr04, DEFAULT_ECHO_TIMEOUT_US, MAX_RANGE};
pub use presence::{Edge, PresenceDetector, PresenceState};
pub use sensor::DistanceSensor;
