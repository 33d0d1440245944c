//! HTTP client for notification probing
//!
//! Thin wrapper over `reqwest` that turns transport failures into typed errors
//! and buffers every response body so it can be classified afterwards.

use reqwest::{
    header::{HeaderName, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// HTTP client errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request timeout ({0}s)")]
    Timeout(u64),

    #[error("Connection failed to {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),
}

impl HttpError {
    fn from_reqwest(e: reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            HttpError::Timeout(timeout_secs)
        } else if e.is_connect() {
            HttpError::Connect(format!("{url}: {}", error_chain(&e)))
        } else {
            HttpError::RequestFailed(e.to_string())
        }
    }
}

/// Render an error with its sources, e.g. the DNS or TLS cause behind a connect failure
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}

/// HTTP client for probing
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Create client with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Send HTTP request
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        debug!("Sending {} request to {}", request.method, request.url);

        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| HttpError::RequestFailed(e.to_string()))?;

        let mut req_builder = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            let (name, value) = parse_header(key, value)?;
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let start = Instant::now();

        let response = req_builder
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(e, &request.url, self.timeout_secs))?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::from_reqwest(e, &request.url, self.timeout_secs))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            body,
            duration_ms,
        })
    }

    /// POST a JSON document
    pub async fn post_json(
        &self,
        url: &str,
        payload: &serde_json::Value,
        headers: BTreeMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::post(url)
            .headers(headers)
            .header(CONTENT_TYPE.as_str(), "application/json")
            .body(payload.to_string());
        self.send(request).await
    }
}

fn parse_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue), HttpError> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| HttpError::InvalidHeader(format!("name: {key}")))?;
    // Header values may carry credentials, so they stay out of the error
    let value =
        HeaderValue::from_str(value).map_err(|_| HttpError::InvalidHeader(format!("value for {key}")))?;
    Ok((name, value))
}

/// HTTP request builder
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// HTTP response
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response(status_code: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status_code,
            body: body.to_string(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_http_request_builder() {
        let req = HttpRequest::post("http://example.com")
            .header("apikey", "token")
            .header("Authorization", "Bearer token");

        assert_eq!(req.method, "POST");
        assert_eq!(req.headers.len(), 2);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_http_response_status_helpers() {
        assert!(response(200, "{}").is_ok());
        assert!(!response(201, "{}").is_ok());
        assert!(response(400, "").is_error());
        assert!(response(403, "").is_auth_error());
        assert!(!response(500, "").is_auth_error());
    }

    #[test]
    fn test_http_response_json() {
        let resp = response(200, r#"{"success": true}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["success"], true);

        assert!(response(200, "not json").json::<serde_json::Value>().is_err());
    }

    #[tokio::test]
    async fn test_invalid_header_hides_value() {
        let mut headers = BTreeMap::new();
        headers.insert("apikey".to_string(), "secret\nvalue".to_string());

        let err = HttpClient::with_timeout(5)
            .unwrap()
            .post_json("http://127.0.0.1:9/", &json!({}), headers)
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::InvalidHeader(_)));
        assert!(!err.to_string().contains("secret"));
    }

    #[tokio::test]
    async fn test_post_json_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/functions/v1/send-email-notification"))
            .and(header("content-type", "application/json"))
            .and(header("apikey", "anon"))
            .and(body_json(json!({"to": "a@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(5).unwrap();
        let mut headers = BTreeMap::new();
        headers.insert("apikey".to_string(), "anon".to_string());

        let resp = client
            .post_json(
                &format!("{}/functions/v1/send-email-notification", server.uri()),
                &json!({"to": "a@example.com"}),
                headers,
            )
            .await
            .unwrap();

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, r#"{"success":true}"#);
    }

    #[tokio::test]
    async fn test_timeout_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(1).unwrap();
        let err = client
            .post_json(&server.uri(), &json!({}), BTreeMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::Timeout(1)));
        assert_eq!(err.to_string(), "Request timeout (1s)");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop a listener to obtain a port nobody is serving
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();

        let client = HttpClient::with_timeout(5).unwrap();
        let err = client
            .post_json(&format!("http://{addr}/"), &json!({}), BTreeMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::Connect(_)));
        // The underlying cause is kept, not just the URL
        let message = err.to_string();
        assert!(message.contains(&addr.to_string()));
        assert!(message.len() > format!("Connection failed to http://{addr}/: ").len());
    }
}
