//! Response classification
//!
//! Maps one HTTP exchange onto pass/fail for a given expectation.

use thiserror::Error;

use crate::http::{HttpError, HttpResponse};
use crate::models::{Expectation, NotificationResponse};

/// Number of preview characters echoed back on a template mismatch
const PREVIEW_EXCERPT_CHARS: usize = 100;

/// Why a probe did not meet its expectation
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Timeout, connection failure, unreadable body
    #[error("{0}")]
    Transport(#[from] HttpError),

    /// Status code did not match the expectation
    #[error("{0}")]
    Protocol(String),

    /// HTTP 200 whose `success` flag contradicts the expectation
    #[error("{0}")]
    Application(String),

    /// Body lacks expected content
    #[error("{0}")]
    Assertion(String),
}

impl ProbeError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Transport(_) => "transport",
            ProbeError::Protocol(_) => "protocol",
            ProbeError::Application(_) => "application",
            ProbeError::Assertion(_) => "assertion",
        }
    }
}

fn raw(resp: &HttpResponse) -> String {
    format!("HTTP {}: {}", resp.status_code, resp.body)
}

/// Classify a completed exchange; `Ok` carries the pass detail
pub fn classify(expectation: &Expectation, resp: &HttpResponse) -> Result<String, ProbeError> {
    match expectation {
        Expectation::AuthRejected => {
            if resp.is_auth_error() {
                Ok(format!(
                    "Correctly rejected request without auth: HTTP {}",
                    resp.status_code
                ))
            } else {
                Err(ProbeError::Protocol(format!(
                    "Function should require authentication but returned: HTTP {}",
                    resp.status_code
                )))
            }
        }
        Expectation::Rejected if resp.is_error() => Ok(format!(
            "Correctly rejected invalid payload with HTTP {}",
            resp.status_code
        )),
        _ if resp.is_error() => Err(ProbeError::Protocol(raw(resp))),
        _ if !resp.is_ok() => Err(ProbeError::Protocol(format!(
            "Unexpected response: {}",
            raw(resp)
        ))),
        _ => {
            let body: NotificationResponse = resp
                .json()
                .map_err(|_| ProbeError::Protocol(format!("Unparseable body: {}", raw(resp))))?;
            classify_body(expectation, &body)
        }
    }
}

fn classify_body(expectation: &Expectation, body: &NotificationResponse) -> Result<String, ProbeError> {
    match expectation {
        Expectation::Rejected => {
            if body.success {
                Err(ProbeError::Application(
                    "Function accepted invalid payload when it should have rejected it".to_string(),
                ))
            } else {
                Ok(format!(
                    "Correctly rejected invalid payload: {}",
                    body.error_or_unknown()
                ))
            }
        }
        Expectation::SuccessWithEmailId => {
            if !body.success {
                return Err(ProbeError::Application(format!(
                    "Function returned success=false: {}",
                    body.error_or_unknown()
                )));
            }
            match body.email_id.as_deref() {
                Some(id) if !id.trim().is_empty() => {
                    Ok(format!("Email sent successfully. ID: {id}"))
                }
                _ => Err(ProbeError::Assertion(
                    "Function reported success but returned no emailId".to_string(),
                )),
            }
        }
        Expectation::Success => {
            if body.success {
                Ok(format!(
                    "Email sent successfully. ID: {}",
                    body.email_id_or_na()
                ))
            } else {
                Err(ProbeError::Application(format!(
                    "Function returned success=false: {}",
                    body.error_or_unknown()
                )))
            }
        }
        Expectation::SuccessWithPreview { must_contain } => {
            let preview = match body.email_preview.as_deref() {
                Some(p) if body.success && !p.is_empty() => p,
                _ => {
                    return Err(ProbeError::Assertion(format!(
                        "No email preview returned: {}",
                        serde_json::to_string(body).unwrap_or_default()
                    )))
                }
            };

            let missing: Vec<&str> = must_contain
                .iter()
                .map(String::as_str)
                .filter(|needle| !preview.contains(needle))
                .collect();

            if missing.is_empty() {
                Ok("Template generated correctly with user data".to_string())
            } else {
                Err(ProbeError::Assertion(format!(
                    "Template missing expected content {:?}: {}...",
                    missing,
                    body.preview_excerpt(PREVIEW_EXCERPT_CHARS)
                )))
            }
        }
        // Handled on the status code before the body is parsed
        Expectation::AuthRejected => Err(ProbeError::Protocol(
            "Function should require authentication but returned: HTTP 200".to_string(),
        )),
    }
}
