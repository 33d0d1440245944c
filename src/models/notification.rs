//! Wire models for the email-notification function
//!
//! Request and response bodies exchanged with the remote endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email event category understood by the remote function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    RequestSent,
    RequestAccepted,
    RequestRejected,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::RequestSent => "request_sent",
            NotificationType::RequestAccepted => "request_accepted",
            NotificationType::RequestRejected => "request_rejected",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill swap request details rendered into the email template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    pub from_user_name: String,
    pub to_user_name: String,
    pub message: String,
}

impl RequestData {
    pub fn new(
        from_user_name: impl Into<String>,
        to_user_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from_user_name: from_user_name.into(),
            to_user_name: to_user_name.into(),
            message: message.into(),
        }
    }
}

/// Body of a send-email-notification request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub to: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub request_data: RequestData,
}

impl NotificationRequest {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        kind: NotificationType,
        request_data: RequestData,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            kind,
            request_data,
        }
    }

    /// Convert into a raw JSON payload
    pub fn to_payload(&self) -> serde_json::Value {
        // Plain strings and an enum with string tags cannot fail to serialize
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Body returned by the function on HTTP 200
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl NotificationResponse {
    pub fn email_id_or_na(&self) -> &str {
        self.email_id.as_deref().unwrap_or("N/A")
    }

    pub fn error_or_unknown(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }

    /// First `max_chars` characters of the preview, if any
    pub fn preview_excerpt(&self, max_chars: usize) -> String {
        self.email_preview
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(max_chars)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = NotificationRequest::new(
            "test.recipient@example.com",
            "New Skill Swap Request from Sarah Johnson",
            NotificationType::RequestSent,
            RequestData::new("Sarah Johnson", "Alex Chen", "Hi Alex!"),
        );

        assert_eq!(
            request.to_payload(),
            json!({
                "to": "test.recipient@example.com",
                "subject": "New Skill Swap Request from Sarah Johnson",
                "type": "request_sent",
                "requestData": {
                    "fromUserName": "Sarah Johnson",
                    "toUserName": "Alex Chen",
                    "message": "Hi Alex!"
                }
            })
        );
    }

    #[test]
    fn test_response_optional_fields() {
        let resp: NotificationResponse =
            serde_json::from_str(r#"{"success": true, "emailId": "abc", "extra": 1}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.email_id_or_na(), "abc");
        assert_eq!(resp.error_or_unknown(), "Unknown error");
        assert!(resp.email_preview.is_none());
    }

    #[test]
    fn test_response_missing_success_is_false() {
        let resp: NotificationResponse =
            serde_json::from_str(r#"{"error": "Invalid email type"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error_or_unknown(), "Invalid email type");
    }

    #[test]
    fn test_preview_excerpt_respects_char_boundaries() {
        let resp = NotificationResponse {
            email_preview: Some("🤝 SkillSwap welcome".to_string()),
            ..Default::default()
        };
        assert_eq!(resp.preview_excerpt(3), "🤝 S");
        assert_eq!(NotificationResponse::default().preview_excerpt(10), "");
    }

    #[test]
    fn test_notification_type_names() {
        let names: Vec<_> = [
            NotificationType::RequestSent,
            NotificationType::RequestAccepted,
            NotificationType::RequestRejected,
        ]
        .iter()
        .map(|t| serde_json::to_value(t).unwrap())
        .collect();
        assert_eq!(names, ["request_sent", "request_accepted", "request_rejected"]);
    }
}
