//! Configuration module
//!
//! Resolves probe settings from defaults, a config file, and the environment.

mod env;
mod file;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use env::{print_env_help, EnvConfig};

/// Product name the rendered templates are expected to mention
pub const DEFAULT_PRODUCT_NAME: &str = "SkillSwap";

/// Probe configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Notification function URL
    pub endpoint_url: Option<String>,

    /// Bearer and apikey credential
    pub api_token: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Pause between probes in milliseconds
    pub delay_ms: u64,

    /// Product name expected in email templates
    pub product_name: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            api_token: None,
            timeout_secs: 30,
            delay_ms: 1000,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
        }
    }
}

impl std::fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("delay_ms", &self.delay_ms)
            .field("product_name", &self.product_name)
            .finish()
    }
}

impl ProbeConfig {
    /// Load from an explicit path, or the first standard location, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => file::load(path),
            None => match file::find() {
                Some(found) => {
                    tracing::debug!("Using config file {}", found.display());
                    file::load(found)
                }
                None => Ok(Self::default()),
            },
        }
    }

    /// Apply environment overrides
    pub fn merge_env(mut self, env: &EnvConfig) -> Self {
        if let Some(url) = env.resolved_endpoint() {
            self.endpoint_url = Some(url);
        }
        if let Some(token) = env.resolved_token() {
            self.api_token = Some(token);
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(delay) = env.delay_ms {
            self.delay_ms = delay;
        }
        if let Some(product) = &env.product_name {
            self.product_name = product.clone();
        }
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Check that everything a run needs is present
    pub fn validate(&self) -> Result<()> {
        let url = self
            .endpoint_url
            .as_deref()
            .context("No endpoint configured; set ENDPOINT_URL or SUPABASE_URL")?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Endpoint must be an http(s) URL: {url}");
        }

        match self.api_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => bail!("No API token configured; set API_TOKEN or SUPABASE_ANON_KEY"),
        }

        if self.timeout_secs == 0 {
            bail!("Timeout must be greater than zero");
        }

        Ok(())
    }

    /// Endpoint URL; call after `validate`
    pub fn endpoint(&self) -> &str {
        self.endpoint_url.as_deref().unwrap_or_default()
    }

    /// Credential; call after `validate`
    pub fn token(&self) -> &str {
        self.api_token.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProbeConfig {
        ProbeConfig {
            endpoint_url: Some("https://abc.supabase.co/functions/v1/send-email-notification".into()),
            api_token: Some("anon".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.product_name, "SkillSwap");
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());
        assert!(ProbeConfig::default().validate().is_err());

        let mut config = valid();
        config.endpoint_url = Some("ftp://example.com".into());
        assert!(config.validate().is_err());

        let mut config = valid();
        config.api_token = Some("  ".into());
        assert!(config.validate().is_err());

        assert!(valid().with_timeout(0).validate().is_err());
    }

    #[test]
    fn test_merge_env_overrides_file_values() {
        let env = EnvConfig {
            endpoint_url: Some("http://localhost:9999/fn".into()),
            timeout: Some(5),
            delay_ms: Some(0),
            ..Default::default()
        };

        let config = valid().merge_env(&env);
        assert_eq!(config.endpoint(), "http://localhost:9999/fn");
        assert_eq!(config.token(), "anon");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.delay_ms, 0);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", valid());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"anon\""));
    }
}
