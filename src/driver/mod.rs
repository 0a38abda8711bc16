//! Drivers that own a [`Sequencer`](crate::motor::Sequencer) for a whole run.
//!
//! - [`run_steps`]: step a fixed count, then de-energize.
//! - [`VendingLoop`]: poll a distance sensor and vend on each trigger edge.

mod standalone;
mod vending;

pub use standalone::{run_steps, RunReport};
pub use vending::{PollOutcome, VendingLoop};
