//! Client configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SUPPORT_EMAIL: &str = "support@smp.local";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Screen paths the gateway and route gating redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub login: String,
    pub dashboard: String,
    pub error: String,
    /// Paths reachable without a session.
    pub public: Vec<String>,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            dashboard: "/dashboard".to_string(),
            error: "/error".to_string(),
            public: vec![
                "/login".to_string(),
                "/error".to_string(),
                "/forgot-password".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base path, without trailing slash.
    pub api_url: String,
    pub request_timeout: Duration,
    pub toast_duration: Duration,
    pub search_debounce: Duration,
    pub page_size: u32,
    /// Recipient of the error screen's contact link.
    pub support_email: String,
    pub paths: AppPaths,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            toast_duration: Duration::from_secs(5),
            search_debounce: Duration::from_millis(500),
            page_size: 10,
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
            paths: AppPaths::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read `SMP_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("SMP_API_URL") {
            let trimmed = url.trim().trim_end_matches('/');
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: "SMP_API_URL",
                    value: url.clone(),
                    reason: "must be an http(s) URL".to_string(),
                });
            }
            config.api_url = trimmed.to_string();
        }
        if let Some(secs) = parse_u64(&lookup, "SMP_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_u64(&lookup, "SMP_TOAST_SECS")? {
            config.toast_duration = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_u64(&lookup, "SMP_SEARCH_DEBOUNCE_MS")? {
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Some(size) = parse_u64(&lookup, "SMP_PAGE_SIZE")? {
            if size == 0 || size > u64::from(u32::MAX) {
                return Err(ConfigError::Invalid {
                    var: "SMP_PAGE_SIZE",
                    value: size.to_string(),
                    reason: "must be a positive page size".to_string(),
                });
            }
            config.page_size = size as u32;
        }
        if let Some(email) = lookup("SMP_SUPPORT_EMAIL").filter(|e| !e.trim().is_empty()) {
            config.support_email = email.trim().to_string();
        }

        Ok(config)
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                var,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
