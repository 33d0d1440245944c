//! Timer utilities

use std::time::{Duration, Instant};

/// Simple timer for measuring elapsed time
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed milliseconds, logged at debug level
    pub fn elapsed_ms(&self) -> u64 {
        let ms = self.elapsed().as_millis() as u64;
        tracing::debug!("{}: {}ms", self.label, ms);
        ms
    }
}
