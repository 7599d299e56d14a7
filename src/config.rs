//! Client configuration.
//! Defaults point at the public Netro API with a 30 second timeout.

use std::time::Duration;

use crate::error::NetroClientError;

pub const DEFAULT_BASE_URL: &str = "https://api.netrohome.com/npa/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ClientConfig {
    /// Device API key (the controller's serial number on the Netro account).
    pub api_key: String,
    /// API root without trailing slash.
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the agent's default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `NETRO_API_KEY` (required), `NETRO_BASE_URL` and `NETRO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, NetroClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NetroClientError> {
        let api_key = match lookup("NETRO_API_KEY") {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => return Err(NetroClientError::Config("Missing API key: set NETRO_API_KEY".to_string())),
        };

        let mut config = ClientConfig::new(api_key);

        if let Some(url) = lookup("NETRO_BASE_URL").filter(|s| !s.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = lookup("NETRO_TIMEOUT_SECS").filter(|s| !s.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| NetroClientError::Config("NETRO_TIMEOUT_SECS must be a positive integer".to_string()))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &crate::utils::redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = ClientConfig::from_lookup(lookup(&[("NETRO_API_KEY", " abc123 ")])).unwrap();
        assert_eq!(cfg.api_key, "abc123");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[])),
            Err(NetroClientError::Config(_))
        ));
        assert!(ClientConfig::from_lookup(lookup(&[("NETRO_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("NETRO_API_KEY", "abc123"),
            ("NETRO_BASE_URL", "http://localhost:8080/npa/v1/"),
            ("NETRO_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8080/npa/v1");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for bad in ["0", "-1", "soon"] {
            let res = ClientConfig::from_lookup(lookup(&[("NETRO_API_KEY", "abc123"), ("NETRO_TIMEOUT_SECS", bad)]));
            assert!(res.is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn debug_output_hides_key() {
        let cfg = ClientConfig::new("supersecretkey");
        let out = format!("{cfg:?}");
        assert!(!out.contains("supersecretkey"));
        assert!(out.contains("tkey"));
    }
}
