//! Console configuration from the environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use vax_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use vax_flows::config::{DEFAULT_OTP_TTL_SECS, DEFAULT_RESET_DELAY};
use vax_flows::FlowConfig;

/// Console configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub otp_ttl_secs: u32,
    pub reset_delay: Duration,
    pub request_timeout: Duration,
    /// Credentials used to open a session without prompting.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_url: var("VAXADMIN_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            otp_ttl_secs: match var("VAXADMIN_OTP_TTL_SECS") {
                Some(raw) => raw
                    .parse()
                    .context("VAXADMIN_OTP_TTL_SECS must be a whole number of seconds")?,
                None => DEFAULT_OTP_TTL_SECS,
            },
            reset_delay: match var("VAXADMIN_RESET_DELAY_MS") {
                Some(raw) => Duration::from_millis(
                    raw.parse()
                        .context("VAXADMIN_RESET_DELAY_MS must be a whole number of milliseconds")?,
                ),
                None => DEFAULT_RESET_DELAY,
            },
            request_timeout: match var("VAXADMIN_REQUEST_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.parse()
                        .context("VAXADMIN_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => DEFAULT_TIMEOUT,
            },
            admin_email: var("VAXADMIN_EMAIL").filter(|v| !v.is_empty()),
            admin_password: var("VAXADMIN_PASSWORD").filter(|v| !v.is_empty()),
        })
    }

    /// Command-line overrides win over the environment.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig::default()
            .with_otp_ttl_secs(self.otp_ttl_secs)
            .with_reset_delay(self.reset_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.otp_ttl_secs, 180);
        assert_eq!(config.reset_delay, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.admin_email, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("VAXADMIN_API_URL", "https://vax.example.org"),
            ("VAXADMIN_OTP_TTL_SECS", "60"),
            ("VAXADMIN_RESET_DELAY_MS", "0"),
            ("VAXADMIN_EMAIL", "admin@clinic.org"),
            ("VAXADMIN_PASSWORD", ""),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://vax.example.org");
        assert_eq!(config.otp_ttl_secs, 60);
        assert_eq!(config.reset_delay, Duration::ZERO);
        assert_eq!(config.admin_email.as_deref(), Some("admin@clinic.org"));
        assert_eq!(config.admin_password, None);

        let flow = config.flow_config();
        assert_eq!(flow.otp_ttl_secs, 60);
        assert_eq!(flow.reset_delay, Duration::ZERO);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = load(&[("VAXADMIN_OTP_TTL_SECS", "three minutes")]).unwrap_err();
        assert!(err.to_string().contains("VAXADMIN_OTP_TTL_SECS"));
    }

    #[test]
    fn test_flag_beats_env() {
        let config = load(&[("VAXADMIN_API_URL", "http://env:8080")])
            .unwrap()
            .with_api_url(Some("http://flag:9090".into()));
        assert_eq!(config.api_url, "http://flag:9090");
    }
}
