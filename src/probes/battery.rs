//! The fixed probe battery
//!
//! Probes 1-3 cover every notification type, 4-5 check rejection paths, and 6
//! checks template rendering.

use serde_json::json;
use std::fmt;

use crate::models::{
    Expectation, NotificationRequest, NotificationType, RequestData, TestCase,
};

const SWAP_MESSAGE: &str = "Hi Alex! I'd love to learn React from you. I can teach you Python data analysis in return.";

/// All probes in the battery
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Probe {
    RequestSent,
    RequestAccepted,
    RequestRejected,
    InvalidPayload,
    MissingAuth,
    TemplateGeneration,
}

impl Probe {
    /// Get probe number (1-6)
    pub fn number(&self) -> u8 {
        match self {
            Probe::RequestSent => 1,
            Probe::RequestAccepted => 2,
            Probe::RequestRejected => 3,
            Probe::InvalidPayload => 4,
            Probe::MissingAuth => 5,
            Probe::TemplateGeneration => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Probe::RequestSent => "Email Function - Request Sent",
            Probe::RequestAccepted => "Email Function - Request Accepted",
            Probe::RequestRejected => "Email Function - Request Rejected",
            Probe::InvalidPayload => "Email Function - Invalid Payload",
            Probe::MissingAuth => "Email Function - Missing Auth",
            Probe::TemplateGeneration => "Email Template Generation",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Probe::RequestSent => "request-sent",
            Probe::RequestAccepted => "request-accepted",
            Probe::RequestRejected => "request-rejected",
            Probe::InvalidPayload => "invalid-payload",
            Probe::MissingAuth => "missing-auth",
            Probe::TemplateGeneration => "template",
        }
    }

    pub fn all() -> Vec<Probe> {
        vec![
            Probe::RequestSent,
            Probe::RequestAccepted,
            Probe::RequestRejected,
            Probe::InvalidPayload,
            Probe::MissingAuth,
            Probe::TemplateGeneration,
        ]
    }

    pub fn from_number(n: u8) -> Option<Probe> {
        Probe::all().into_iter().find(|p| p.number() == n)
    }

    /// Parse from a number or slug
    pub fn parse(s: &str) -> Option<Probe> {
        match s.parse::<u8>() {
            Ok(n) => Probe::from_number(n),
            Err(_) => Probe::all()
                .into_iter()
                .find(|p| p.slug().eq_ignore_ascii_case(s)),
        }
    }

    /// Build the test case; `product_name` must appear in rendered templates
    pub fn test_case(&self, product_name: &str) -> TestCase {
        match self {
            Probe::RequestSent => TestCase::new(
                self.name(),
                NotificationRequest::new(
                    "test.recipient@example.com",
                    "New Skill Swap Request from Sarah Johnson",
                    NotificationType::RequestSent,
                    RequestData::new(
                        "Sarah Johnson",
                        "Alex Chen",
                        format!("{SWAP_MESSAGE} I have 3 years of experience with pandas and matplotlib."),
                    ),
                )
                .to_payload(),
                Expectation::SuccessWithEmailId,
            ),
            Probe::RequestAccepted => TestCase::new(
                self.name(),
                NotificationRequest::new(
                    "test.sender@example.com",
                    "Your skill swap request was accepted!",
                    NotificationType::RequestAccepted,
                    RequestData::new("Sarah Johnson", "Alex Chen", SWAP_MESSAGE),
                )
                .to_payload(),
                Expectation::Success,
            ),
            Probe::RequestRejected => TestCase::new(
                self.name(),
                NotificationRequest::new(
                    "test.sender@example.com",
                    "Update on your skill swap request",
                    NotificationType::RequestRejected,
                    RequestData::new("Sarah Johnson", "Alex Chen", SWAP_MESSAGE),
                )
                .to_payload(),
                Expectation::Success,
            ),
            Probe::InvalidPayload => TestCase::new(
                self.name(),
                json!({
                    "to": "invalid-email",
                    "subject": "Test",
                    "type": "invalid_type",
                    "requestData": {}
                }),
                Expectation::Rejected,
            ),
            Probe::MissingAuth => TestCase::new(
                self.name(),
                NotificationRequest::new(
                    "test@example.com",
                    "Test",
                    NotificationType::RequestSent,
                    RequestData::new("Test User", "Test Recipient", "Test message"),
                )
                .to_payload(),
                Expectation::AuthRejected,
            )
            .anonymous(),
            Probe::TemplateGeneration => TestCase::new(
                self.name(),
                NotificationRequest::new(
                    "template.test@example.com",
                    "Template Test",
                    NotificationType::RequestSent,
                    RequestData::new(
                        "Template Tester",
                        "Template Recipient",
                        "This is a test message to verify template generation works correctly.",
                    ),
                )
                .to_payload(),
                Expectation::SuccessWithPreview {
                    must_contain: vec![product_name.to_string(), "Template Tester".to_string()],
                },
            ),
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe {}: {}", self.number(), self.name())
    }
}

/// Build test cases for every probe in order
pub fn battery(product_name: &str) -> Vec<TestCase> {
    Probe::all()
        .iter()
        .map(|p| p.test_case(product_name))
        .collect()
}

/// Edge-case payloads sent by `debug`, printed without classification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugScenario {
    InvalidPayload,
    InvalidType,
    MissingFields,
    EmptyPayload,
}

impl DebugScenario {
    pub fn all() -> Vec<DebugScenario> {
        vec![
            DebugScenario::InvalidPayload,
            DebugScenario::InvalidType,
            DebugScenario::MissingFields,
            DebugScenario::EmptyPayload,
        ]
    }

    pub fn slug(&self) -> &'static str {
        match self {
            DebugScenario::InvalidPayload => "invalid-payload",
            DebugScenario::InvalidType => "invalid-type",
            DebugScenario::MissingFields => "missing-fields",
            DebugScenario::EmptyPayload => "empty-payload",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DebugScenario::InvalidPayload => "Invalid email and type",
            DebugScenario::InvalidType => "Valid email, invalid type",
            DebugScenario::MissingFields => "Missing required fields",
            DebugScenario::EmptyPayload => "Empty payload",
        }
    }

    pub fn parse(s: &str) -> Option<DebugScenario> {
        DebugScenario::all()
            .into_iter()
            .find(|d| d.slug().eq_ignore_ascii_case(s))
    }

    pub fn payload(&self) -> serde_json::Value {
        match self {
            DebugScenario::InvalidPayload => json!({
                "to": "invalid-email",
                "subject": "Test",
                "type": "invalid_type",
                "requestData": {}
            }),
            DebugScenario::InvalidType => json!({
                "to": "test@example.com",
                "subject": "Test",
                "type": "invalid_type",
                "requestData": {
                    "fromUserName": "Test User",
                    "toUserName": "Test Recipient",
                    "message": "Test message"
                }
            }),
            DebugScenario::MissingFields => json!({ "to": "test@example.com" }),
            DebugScenario::EmptyPayload => json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthMode;

    #[test]
    fn test_probe_numbers() {
        assert_eq!(Probe::RequestSent.number(), 1);
        assert_eq!(Probe::TemplateGeneration.number(), 6);
        assert_eq!(Probe::from_number(5), Some(Probe::MissingAuth));
        assert_eq!(Probe::from_number(7), None);
    }

    #[test]
    fn test_probe_parse() {
        assert_eq!(Probe::parse("4"), Some(Probe::InvalidPayload));
        assert_eq!(Probe::parse("Template"), Some(Probe::TemplateGeneration));
        assert_eq!(Probe::parse("nope"), None);
    }

    #[test]
    fn test_battery_order_and_size() {
        let cases = battery("SkillSwap");
        assert_eq!(cases.len(), 6);
        assert_eq!(cases[0].name, "Email Function - Request Sent");
        assert_eq!(cases[5].name, "Email Template Generation");
    }

    #[test]
    fn test_valid_types_expect_success() {
        assert_eq!(
            Probe::RequestSent.test_case("SkillSwap").expectation,
            Expectation::SuccessWithEmailId
        );
        for probe in [Probe::RequestSent, Probe::RequestAccepted, Probe::RequestRejected] {
            let case = probe.test_case("SkillSwap");
            assert!(matches!(
                case.expectation,
                Expectation::Success | Expectation::SuccessWithEmailId
            ));
            assert_eq!(case.auth, AuthMode::Credentials);
            assert!(case.payload["requestData"]["fromUserName"].is_string());
        }
    }

    #[test]
    fn test_request_sent_scenario_payload() {
        let case = Probe::RequestSent.test_case("SkillSwap");
        assert_eq!(case.payload["to"], "test.recipient@example.com");
        assert_eq!(case.payload["type"], "request_sent");
        assert_eq!(case.payload["requestData"]["toUserName"], "Alex Chen");
    }

    #[test]
    fn test_negative_probes() {
        let invalid = Probe::InvalidPayload.test_case("SkillSwap");
        assert_eq!(invalid.expectation, Expectation::Rejected);
        assert_eq!(invalid.payload["type"], "invalid_type");

        let anon = Probe::MissingAuth.test_case("SkillSwap");
        assert_eq!(anon.auth, AuthMode::Anonymous);
        assert_eq!(anon.expectation, Expectation::AuthRejected);
    }

    #[test]
    fn test_template_probe_uses_product_name() {
        let case = Probe::TemplateGeneration.test_case("Acme");
        assert_eq!(
            case.expectation,
            Expectation::SuccessWithPreview {
                must_contain: vec!["Acme".to_string(), "Template Tester".to_string()]
            }
        );
    }

    #[test]
    fn test_debug_scenarios() {
        assert_eq!(DebugScenario::all().len(), 4);
        assert_eq!(DebugScenario::parse("empty-payload"), Some(DebugScenario::EmptyPayload));
        assert_eq!(DebugScenario::EmptyPayload.payload(), json!({}));
        assert!(DebugScenario::MissingFields.payload().get("type").is_none());
    }
}
