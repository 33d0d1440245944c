//! Notification endpoint probes
//!
//! The probe battery and the rules that turn an HTTP exchange into a result.

mod battery;
mod classify;

pub use battery::{battery, DebugScenario, Probe};
pub use classify::{classify, ProbeError};
