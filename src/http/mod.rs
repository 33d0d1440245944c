//! HTTP client module
//!
//! Provides the transport used to reach the notification endpoint.

mod client;

pub use client::{HttpClient, HttpError, HttpResponse};
