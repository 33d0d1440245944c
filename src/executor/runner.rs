//! Probe execution runner
//!
//! Sends probes one at a time and records their outcomes.

use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ProbeConfig;
use crate::http::{HttpClient, HttpResponse};
use crate::models::{AuthMode, RunSummary, TestCase, TestResult};
use crate::probes::{self, ProbeError};
use crate::utils::Timer;

/// Sequential runner for notification probes
pub struct ProbeRunner {
    endpoint: String,
    token: String,
    delay: Duration,
    client: HttpClient,
}

impl ProbeRunner {
    /// Create a runner from a validated configuration
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_timeout(config.timeout_secs)?;

        Ok(Self {
            endpoint: config.endpoint().to_string(),
            token: config.token().to_string(),
            delay: Duration::from_millis(config.delay_ms),
            client,
        })
    }

    fn headers(&self, auth: AuthMode) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if auth == AuthMode::Credentials {
            headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
            headers.insert("apikey".to_string(), self.token.clone());
        }
        headers
    }

    /// Send a raw payload and return the exchange unclassified
    pub async fn exchange(
        &self,
        payload: &serde_json::Value,
        auth: AuthMode,
    ) -> Result<HttpResponse, ProbeError> {
        let response = self
            .client
            .post_json(&self.endpoint, payload, self.headers(auth))
            .await?;
        Ok(response)
    }

    /// Run a single probe
    pub async fn run_probe(&self, test_case: &TestCase) -> TestResult {
        info!("Running {}", test_case.name);
        let timer = Timer::start(&test_case.name);

        let outcome = match self.exchange(&test_case.payload, test_case.auth).await {
            Ok(resp) => probes::classify(&test_case.expectation, &resp),
            Err(e) => Err(e),
        };
        let duration_ms = timer.elapsed_ms();

        match outcome {
            Ok(details) => TestResult::pass(&test_case.name, duration_ms, details),
            Err(e) => {
                warn!("{} failed ({} error): {}", test_case.name, e.kind(), e);
                TestResult::fail(&test_case.name, duration_ms, e.to_string())
            }
        }
    }

    /// Run all probes sequentially, pausing between them and handing each
    /// result to `on_result` as it completes
    pub async fn run_all(
        &self,
        test_cases: &[TestCase],
        mut on_result: impl FnMut(&TestResult),
    ) -> RunSummary {
        info!(
            "Starting {} probes against {}",
            test_cases.len(),
            self.endpoint
        );

        let started_at = Utc::now();
        let timer = Timer::start("probe run");
        let mut results = Vec::with_capacity(test_cases.len());

        for (i, test_case) in test_cases.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                debug!("Waiting {}ms before next probe", self.delay.as_millis());
                tokio::time::sleep(self.delay).await;
            }

            let result = self.run_probe(test_case).await;
            debug!("  {}", result);
            on_result(&result);
            results.push(result);
        }

        let summary = RunSummary::new(started_at, timer.elapsed_ms(), results);

        info!(
            "Probe run completed in {}ms - Pass: {}/{} ({:.1}%)",
            summary.duration_ms,
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }
}
