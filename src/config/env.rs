//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "NOTIFY_PROBE";

/// Path of the notification function below a Supabase project URL
pub const FUNCTION_PATH: &str = "/functions/v1/send-email-notification";

/// Environment configuration from environment variables
#[derive(Clone, Default)]
pub struct EnvConfig {
    /// Endpoint from ENDPOINT_URL
    pub endpoint_url: Option<String>,
    /// Project base URL from SUPABASE_URL
    pub supabase_url: Option<String>,
    /// Credential from API_TOKEN
    pub api_token: Option<String>,
    /// Credential from SUPABASE_ANON_KEY
    pub anon_key: Option<String>,
    /// Timeout from NOTIFY_PROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Delay between probes from NOTIFY_PROBE_DELAY_MS
    pub delay_ms: Option<u64>,
    /// Product name from NOTIFY_PROBE_PRODUCT
    pub product_name: Option<String>,
    /// Output format from NOTIFY_PROBE_FORMAT
    pub format: Option<String>,
    /// Config file from NOTIFY_PROBE_CONFIG
    pub config_file: Option<String>,
    /// Verbose from NOTIFY_PROBE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            endpoint_url: non_empty("ENDPOINT_URL"),
            supabase_url: non_empty("SUPABASE_URL"),
            api_token: non_empty("API_TOKEN"),
            anon_key: non_empty("SUPABASE_ANON_KEY"),
            timeout: get_env_parse("TIMEOUT"),
            delay_ms: get_env_parse("DELAY_MS"),
            product_name: get_env("PRODUCT"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Endpoint, either explicit or derived from the project URL
    pub fn resolved_endpoint(&self) -> Option<String> {
        self.endpoint_url.clone().or_else(|| {
            self.supabase_url
                .as_deref()
                .map(|base| format!("{}{FUNCTION_PATH}", base.trim_end_matches('/')))
        })
    }

    /// Token, preferring API_TOKEN over SUPABASE_ANON_KEY
    pub fn resolved_token(&self) -> Option<String> {
        self.api_token.clone().or_else(|| self.anon_key.clone())
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        let token = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");

        println!("Environment Configuration:");
        println!("  ENDPOINT_URL:            {:?}", self.endpoint_url);
        println!("  SUPABASE_URL:            {:?}", self.supabase_url);
        println!("  API_TOKEN:               {:?}", token(&self.api_token));
        println!("  SUPABASE_ANON_KEY:       {:?}", token(&self.anon_key));
        println!("  {ENV_PREFIX}_TIMEOUT:    {:?}", self.timeout);
        println!("  {ENV_PREFIX}_DELAY_MS:   {:?}", self.delay_ms);
        println!("  {ENV_PREFIX}_PRODUCT:    {:?}", self.product_name);
        println!("  {ENV_PREFIX}_FORMAT:     {:?}", self.format);
        println!("  {ENV_PREFIX}_CONFIG:     {:?}", self.config_file);
        println!("  {ENV_PREFIX}_VERBOSE:    {:?}", self.verbose);
    }
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("supabase_url", &self.supabase_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("delay_ms", &self.delay_ms)
            .field("product_name", &self.product_name)
            .field("format", &self.format)
            .field("config_file", &self.config_file)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Unprefixed variable, ignoring empty values
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all recognised environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  ENDPOINT_URL              Notification function URL");
    println!("  SUPABASE_URL              Project URL; endpoint becomes <url>{FUNCTION_PATH}");
    println!("  API_TOKEN                 Bearer/apikey credential");
    println!("  SUPABASE_ANON_KEY         Credential fallback when API_TOKEN is unset");
    println!("  {ENV_PREFIX}_TIMEOUT      Request timeout in seconds (default 30)");
    println!("  {ENV_PREFIX}_DELAY_MS     Pause between probes in ms (default 1000)");
    println!("  {ENV_PREFIX}_PRODUCT      Product name expected in templates (default SkillSwap)");
    println!("  {ENV_PREFIX}_FORMAT       Output format (text, json, summary)");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
    println!("  {ENV_PREFIX}_VERBOSE      Enable verbose output (true/false)");
    println!();
    println!("Example:");
    println!("  export ENDPOINT_URL=https://<project>.supabase.co{FUNCTION_PATH}");
    println!("  export API_TOKEN=<anon key>");
    println!("  notify-probe");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.resolved_endpoint().is_none());
        assert!(config.resolved_token().is_none());
    }

    #[test]
    fn test_endpoint_derived_from_project_url() {
        let config = EnvConfig {
            supabase_url: Some("https://abc.supabase.co/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_endpoint().as_deref(),
            Some("https://abc.supabase.co/functions/v1/send-email-notification")
        );
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let config = EnvConfig {
            endpoint_url: Some("http://localhost:54321/fn".to_string()),
            supabase_url: Some("https://abc.supabase.co".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_endpoint().as_deref(),
            Some("http://localhost:54321/fn")
        );
    }

    #[test]
    fn test_token_fallback() {
        let config = EnvConfig {
            anon_key: Some("anon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_token().as_deref(), Some("anon"));

        let config = EnvConfig {
            api_token: Some("primary".to_string()),
            anon_key: Some("anon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_token().as_deref(), Some("primary"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = EnvConfig {
            api_token: Some("super-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
