//! Hysteresis presence detection.

use crate::config::units::Centimeters;
use crate::config::TriggerConfig;

/// Debounced detector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenceState {
    /// Waiting for something to enter the near band.
    #[default]
    Idle,
    /// Fired; waiting for the reading to move beyond the far bound.
    Triggered,
}

/// Transition reported by [`PresenceDetector::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Idle -> Triggered: the reading entered the near band.
    Triggered,
    /// Triggered -> Idle: the reading moved beyond the far bound.
    Released,
}

/// Two-state detector with separate trigger and release thresholds.
///
/// Readings between the near band and the far bound never change state, so a
/// hand hovering at one distance cannot chatter.
#[derive(Debug, Clone)]
pub struct PresenceDetector {
    state: PresenceState,
    band: TriggerConfig,
}

impl PresenceDetector {
    /// Create an idle detector using the band from trigger configuration.
    pub fn from_config(config: &TriggerConfig) -> Self {
        Self {
            state: PresenceState::Idle,
            band: config.clone(),
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Whether the detector has fired and not yet released.
    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.state == PresenceState::Triggered
    }

    /// Feed one reading; `None` (no reading) never changes state.
    pub fn update(&mut self, reading: Option<Centimeters>) -> Option<Edge> {
        let distance = reading?;
        match self.state {
            PresenceState::Idle if self.band.in_near_band(distance) => {
                self.state = PresenceState::Triggered;
                Some(Edge::Triggered)
            }
            PresenceState::Triggered if self.band.beyond_far(distance) => {
                self.state = PresenceState::Idle;
                Some(Edge::Released)
            }
            _ => None,
        }
    }
}
