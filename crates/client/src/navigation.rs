//! Navigation seam: where the gateway sends the user on session or server
//! failures, and the query shape of the error screen.

use std::sync::{Mutex, MutexGuard};

use reqwest::Url;
use smp_core::Severity;

/// Something that owns the current location (browser history, a desktop
/// shell's router, a terminal app's screen stack).
pub trait Navigator: Send + Sync {
    /// Current path without query string.
    fn current_path(&self) -> String;

    /// Replace the current location (path plus optional query).
    fn navigate(&self, location: &str);
}

/// Navigator that records history in memory.
#[derive(Debug)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial.into()]),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.history.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Full current location, including the query string.
    pub fn current_location(&self) -> String {
        self.lock().last().cloned().unwrap_or_else(|| "/".to_string())
    }

    pub fn history(&self) -> Vec<String> {
        self.lock().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        let location = self.current_location();
        match location.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => location,
        }
    }

    fn navigate(&self, location: &str) {
        tracing::info!(location, "navigate");
        self.lock().push(location.to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error screen parameters
// ─────────────────────────────────────────────────────────────────────────────

const LOCATION_BASE: &str = "http://smp.local";

/// Query parameters of the generic error screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorParams {
    pub code: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: Option<String>,
}

impl Default for ErrorParams {
    fn default() -> Self {
        Self {
            code: "500".to_string(),
            message: String::new(),
            severity: Severity::Error,
            timestamp: None,
        }
    }
}

impl ErrorParams {
    /// `error_path?code=..&message=..&severity=..&timestamp=..`
    pub fn to_location(&self, error_path: &str) -> String {
        let Ok(mut url) = Url::parse(LOCATION_BASE) else {
            return error_path.to_string();
        };
        url.set_path(error_path);
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("code", &self.code)
                .append_pair("message", &self.message)
                .append_pair("severity", self.severity.as_str());
            if let Some(ts) = &self.timestamp {
                pairs.append_pair("timestamp", ts);
            }
        }
        match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        }
    }

    /// Parse a location (or bare `?query`) back; missing or unknown values
    /// fall back to code `500` and severity `ERROR`.
    pub fn from_location(location: &str) -> Self {
        let mut params = Self::default();
        let location = if location.starts_with('/') {
            location.to_string()
        } else {
            format!("/{location}")
        };
        let Ok(url) = Url::parse(&format!("{LOCATION_BASE}{location}")) else {
            return params;
        };
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" if !value.trim().is_empty() => params.code = value.into_owned(),
                "message" => params.message = value.into_owned(),
                "severity" => params.severity = value.parse().unwrap_or_default(),
                "timestamp" if !value.is_empty() => params.timestamp = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }
}
