//! In-memory cookie jar with `maxAge` expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Shared cookie store. Clones share the same cookies.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: Arc<Mutex<HashMap<String, Cookie>>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Cookie>> {
        self.cookies.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Set a cookie on path `/` that expires `max_age` from now.
    pub fn set(&self, name: &str, value: impl Into<String>, max_age: Duration) {
        self.set_at(name, value, max_age, Utc::now());
    }

    pub fn set_at(&self, name: &str, value: impl Into<String>, max_age: Duration, now: DateTime<Utc>) {
        let cookie = Cookie {
            name: name.to_string(),
            value: value.into(),
            path: "/".to_string(),
            expires_at: now + max_age,
        };
        self.lock().insert(name.to_string(), cookie);
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.get_at(name, Utc::now())
    }

    /// Value of `name` as seen at `now`; expired cookies are evicted.
    pub fn get_at(&self, name: &str, now: DateTime<Utc>) -> Option<String> {
        let mut cookies = self.lock();
        match cookies.get(name) {
            Some(c) if c.is_expired_at(now) => {
                cookies.remove(name);
                None
            }
            Some(c) => Some(c.value.clone()),
            None => None,
        }
    }

    /// Read and delete in one step.
    pub fn take(&self, name: &str) -> Option<String> {
        let value = self.get(name);
        self.remove(name);
        value
    }

    pub fn remove(&self, name: &str) -> bool {
        self.lock().remove(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_max_age() {
        let jar = CookieJar::new();
        let now = Utc::now();
        jar.set_at("smp.flash", "{}", Duration::seconds(5), now);

        assert_eq!(jar.get_at("smp.flash", now + Duration::seconds(4)).as_deref(), Some("{}"));
        assert_eq!(jar.get_at("smp.flash", now + Duration::seconds(5)), None);
        // Evicted, even when asked about the past again.
        assert_eq!(jar.get_at("smp.flash", now), None);
    }

    #[test]
    fn clones_share_state() {
        let jar = CookieJar::new();
        let other = jar.clone();
        jar.set("a", "1", Duration::hours(1));
        assert_eq!(other.take("a").as_deref(), Some("1"));
        assert_eq!(jar.get("a"), None);
    }
}
