//! Output formatters for probe results
//!
//! Provides text, JSON, and one-line summary output.

use crate::models::{RunSummary, TestResult};

const RULE: &str = "============================================================";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Whether results should be printed as they complete
    pub fn streams(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Banner printed before the first probe
    pub fn format_header(&self) -> String {
        format!("🧪 Starting Email Notification System Tests\n{RULE}")
    }

    /// Format a single probe result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            _ => self.format_result_line(result),
        }
    }

    fn format_result_line(&self, result: &TestResult) -> String {
        let status = match (self.colorize, result.success) {
            (true, true) => "\x1b[32m✅ PASS\x1b[0m",
            (true, false) => "\x1b[31m❌ FAIL\x1b[0m",
            (false, true) => "✅ PASS",
            (false, false) => "❌ FAIL",
        };
        format!("{status} {}: {}", result.test, result.details)
    }

    /// Format the end-of-run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Text => self.format_summary_text(summary),
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_text(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{RULE}\n"));
        output.push_str(&format!(
            "📊 Test Results: {}/{} tests passed\n",
            summary.passed, summary.total
        ));

        if summary.is_all_passed() {
            output.push_str("🎉 All email notification tests passed!\n");
        } else {
            output.push_str(&format!("⚠️  {} tests failed\n", summary.failed));
        }

        output.push_str("\n📋 Detailed Test Summary:\n");
        for result in &summary.results {
            output.push_str(&format!(
                "{} {}: {}\n",
                result.symbol(),
                result.test,
                result.details
            ));
        }

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}/{} probes passed ({:.1}%) in {}ms",
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.duration_ms
        )
    }
}
