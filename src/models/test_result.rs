//! Test case and result models
//!
//! Defines probe expectations, results, and run summaries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What the endpoint is expected to do with a probe
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    /// HTTP 200 with `success: true`
    Success,
    /// HTTP 200 with `success: true` and a non-empty `emailId`
    SuccessWithEmailId,
    /// HTTP 200 with `success: true` and a preview containing every substring
    SuccessWithPreview { must_contain: Vec<String> },
    /// HTTP >= 400, or HTTP 200 with `success: false`
    Rejected,
    /// HTTP 401 or 403
    AuthRejected,
}

impl Expectation {
    pub fn label(&self) -> &'static str {
        match self {
            Expectation::Success => "success",
            Expectation::SuccessWithEmailId => "success + email id",
            Expectation::SuccessWithPreview { .. } => "success + preview",
            Expectation::Rejected => "rejected (client error)",
            Expectation::AuthRejected => "rejected (auth)",
        }
    }
}

/// Which credentials a probe sends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer token and apikey headers
    Credentials,
    /// Content-Type only
    Anonymous,
}

/// One scripted request paired with its expected outcome
#[derive(Clone, Debug)]
pub struct TestCase {
    pub name: String,
    pub payload: serde_json::Value,
    pub expectation: Expectation,
    pub auth: AuthMode,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        payload: serde_json::Value,
        expectation: Expectation,
    ) -> Self {
        Self {
            name: name.into(),
            payload,
            expectation,
            auth: AuthMode::Credentials,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.auth = AuthMode::Anonymous;
        self
    }
}

/// Recorded outcome of one probe
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub test: String,
    pub success: bool,
    pub details: String,
    pub duration_ms: u64,
}

impl TestResult {
    pub fn pass(test: impl Into<String>, duration_ms: u64, details: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            success: true,
            details: details.into(),
            duration_ms,
        }
    }

    pub fn fail(test: impl Into<String>, duration_ms: u64, details: impl Into<String>) -> Self {
        Self {
            test: test.into(),
            success: false,
            details: details.into(),
            duration_ms,
        }
    }

    pub fn symbol(&self) -> &'static str {
        if self.success {
            "✅"
        } else {
            "❌"
        }
    }

    pub fn status(&self) -> &'static str {
        if self.success {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.symbol(),
            self.status(),
            self.test,
            self.details
        )
    }
}

/// Aggregate of one run over the battery
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>, duration_ms: u64, results: Vec<TestResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();

        Self {
            started_at,
            total,
            passed,
            failed: total - passed,
            duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}
