//! Probe execution engine
//!
//! Runs probes sequentially against the configured endpoint.

mod runner;

pub use runner::ProbeRunner;
