use anyhow::{Context, Result};
use std::time::Duration;

/// Placeholder shipped in the sample .env; treated as "no token"
const TOKEN_PLACEHOLDER: &str = "YOUR_TOKEN_HERE";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub brapi_token: Option<String>,
    pub brapi_base_url: String,
    pub brapi_timeout: Duration,
    pub host: String,
    pub port: u16,
    /// Send HSTS; only meaningful behind TLS termination
    pub enable_hsts: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let brapi_token = lookup("BRAPI_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && t != TOKEN_PLACEHOLDER);

        let brapi_timeout_secs: u64 = lookup("BRAPI_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("BRAPI_TIMEOUT_SECS must be a whole number of seconds")?;

        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        Ok(Self {
            brapi_token,
            brapi_base_url: lookup("BRAPI_BASE_URL")
                .unwrap_or_else(|| brapi_client::DEFAULT_BASE_URL.to_string()),
            brapi_timeout: Duration::from_secs(brapi_timeout_secs),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            enable_hsts: lookup("ENABLE_HSTS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn token_configured(&self) -> bool {
        self.brapi_token.is_some()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(!config.token_configured());
        assert_eq!(config.brapi_base_url, "https://brapi.dev/api");
        assert_eq!(config.brapi_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
        assert!(!config.enable_hsts);
    }

    #[test]
    fn test_placeholder_token_is_ignored() {
        let config = config_from(&[("BRAPI_TOKEN", "YOUR_TOKEN_HERE")]).unwrap();
        assert!(!config.token_configured());

        let config = config_from(&[("BRAPI_TOKEN", "   ")]).unwrap();
        assert!(!config.token_configured());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BRAPI_TOKEN", "abc123"),
            ("BRAPI_TIMEOUT_SECS", "5"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("ENABLE_HSTS", "TRUE"),
        ])
        .unwrap();
        assert_eq!(config.brapi_token.as_deref(), Some("abc123"));
        assert_eq!(config.brapi_timeout, Duration::from_secs(5));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(config.enable_hsts);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("BRAPI_TIMEOUT_SECS", "-1")]).is_err());
    }
}
