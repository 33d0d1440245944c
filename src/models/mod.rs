//! Data models for notification probing
//!
//! Wire payloads, test cases, and results used throughout the application.

mod notification;
mod test_result;

pub use notification::{NotificationRequest, NotificationResponse, NotificationType, RequestData};
pub use test_result::{AuthMode, Expectation, RunSummary, TestCase, TestResult};
