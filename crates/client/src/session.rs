//! Session and flash cookies.
//!
//! The session token and the flash message are the only state the dashboard
//! keeps beyond a screen's lifetime. Everything reads them through these two
//! handles instead of touching cookies directly.

use std::time::Duration as StdDuration;

use chrono::Duration;
use smp_notify::{FlashMessage, Notifier};

use crate::cookies::CookieJar;

pub const SESSION_COOKIE: &str = "smp.token";
pub const FLASH_COOKIE: &str = "smp.flash";

pub fn session_max_age() -> Duration {
    Duration::hours(8)
}

pub fn flash_max_age() -> Duration {
    Duration::seconds(5)
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SessionManager {
    jar: CookieJar,
}

impl SessionManager {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn get_token(&self) -> Option<String> {
        self.jar.get(SESSION_COOKIE).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.jar.set(SESSION_COOKIE, token, session_max_age());
        tracing::info!("session established");
    }

    pub fn clear(&self) {
        if self.jar.remove(SESSION_COOKIE) {
            tracing::info!("session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Flash
// ─────────────────────────────────────────────────────────────────────────────

/// A single message that survives one full navigation.
#[derive(Debug, Clone)]
pub struct FlashStore {
    jar: CookieJar,
}

impl FlashStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// Stage a message for the next page; replaces any staged message.
    pub fn stage(&self, flash: &FlashMessage) {
        self.jar.set(FLASH_COOKIE, flash.to_json(), flash_max_age());
    }

    pub fn is_staged(&self) -> bool {
        self.jar.get(FLASH_COOKIE).is_some()
    }

    /// Consume the staged message, if any. Malformed cookies are discarded.
    pub fn drain(&self) -> Option<FlashMessage> {
        let raw = self.jar.take(FLASH_COOKIE)?;
        let parsed = FlashMessage::from_json(&raw);
        if parsed.is_none() {
            tracing::warn!("discarding malformed flash cookie");
        }
        parsed
    }

    /// Wait `delay` after a page mounts, then drain once into `notifier`.
    pub async fn drain_after(&self, delay: StdDuration, notifier: &dyn Notifier) -> Option<FlashMessage> {
        tokio::time::sleep(delay).await;
        let flash = self.drain()?;
        notifier.notify(&flash.message, flash.severity);
        Some(flash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smp_core::Severity;
    use smp_notify::NotificationChannel;

    #[test]
    fn token_round_trip_and_clear() {
        let session = SessionManager::new(CookieJar::new());
        assert!(!session.is_authenticated());
        session.set_token("jwt-abc");
        assert_eq!(session.get_token().as_deref(), Some("jwt-abc"));
        session.clear();
        assert_eq!(session.get_token(), None);
    }

    #[test]
    fn flash_is_drained_once() {
        let jar = CookieJar::new();
        let flash = FlashStore::new(jar.clone());
        flash.stage(&FlashMessage::new("Welcome", Severity::Success));

        assert_eq!(flash.drain().map(|f| f.message), Some("Welcome".to_string()));
        assert_eq!(flash.drain(), None);
    }

    #[test]
    fn malformed_flash_is_dropped() {
        let jar = CookieJar::new();
        jar.set(FLASH_COOKIE, "not-json", flash_max_age());
        let flash = FlashStore::new(jar.clone());
        assert_eq!(flash.drain(), None);
        assert_eq!(jar.get(FLASH_COOKIE), None);
    }

    #[tokio::test(start_paused = true)]
    async fn drain_after_delay_shows_toast() {
        let flash = FlashStore::new(CookieJar::new());
        let channel = NotificationChannel::default();
        flash.stage(&FlashMessage::new("Logged in", Severity::Success));

        let drained = flash
            .drain_after(StdDuration::from_millis(100), &channel)
            .await;
        assert!(drained.is_some());
        assert_eq!(channel.current().map(|t| t.message), Some("Logged in".to_string()));
    }
}
