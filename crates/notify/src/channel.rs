//! The notification channel: one toast slot plus fan-out to subscribers.

use std::sync::{Arc, Mutex, MutexGuard, mpsc};
use std::time::Duration;

use smp_core::Severity;
use tokio::time::Instant;

use crate::bus::Subscription;
use crate::toast::{Toast, ToastId};

/// How long a toast stays visible unless dismissed.
pub const DEFAULT_DISPLAY_FOR: Duration = Duration::from_secs(5);

/// Anything that can surface a message to the user.
///
/// The API gateway depends on this rather than on a concrete UI, so deeply
/// nested service calls can report out-of-band failures.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Shown(Toast),
    Dismissed(ToastId),
}

#[derive(Debug)]
struct ActiveToast {
    toast: Toast,
    expires_at: Instant,
}

#[derive(Debug)]
struct Inner {
    slot: Mutex<Option<ActiveToast>>,
    subscribers: Mutex<Vec<mpsc::Sender<NotificationEvent>>>,
    display_for: Duration,
}

/// Cheaply cloneable handle to the process-wide toast slot.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    inner: Arc<Inner>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_FOR)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl NotificationChannel {
    pub fn new(display_for: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(None),
                subscribers: Mutex::new(Vec::new()),
                display_for,
            }),
        }
    }

    pub fn display_for(&self) -> Duration {
        self.inner.display_for
    }

    /// Show a toast, replacing whatever is currently visible.
    ///
    /// When called inside a tokio runtime a timer dismisses the toast after
    /// `display_for`; otherwise expiry is applied lazily by [`current`](Self::current).
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> Toast {
        let toast = Toast::new(message, severity);
        let expires_at = Instant::now() + self.inner.display_for;

        let replaced = lock(&self.inner.slot).replace(ActiveToast {
            toast: toast.clone(),
            expires_at,
        });
        if let Some(prev) = replaced {
            self.publish(NotificationEvent::Dismissed(prev.toast.id));
        }
        tracing::debug!(severity = %toast.severity, "toast shown");
        self.publish(NotificationEvent::Shown(toast.clone()));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let channel = self.clone();
            let id = toast.id;
            let display_for = self.inner.display_for;
            handle.spawn(async move {
                tokio::time::sleep(display_for).await;
                channel.dismiss(id);
            });
        }

        toast
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.show(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.show(message, Severity::Error)
    }

    /// Dismiss `id` if it is still the visible toast. Returns whether it was.
    pub fn dismiss(&self, id: ToastId) -> bool {
        let mut slot = lock(&self.inner.slot);
        match slot.as_ref() {
            Some(active) if active.toast.id == id => {
                *slot = None;
                drop(slot);
                self.publish(NotificationEvent::Dismissed(id));
                true
            }
            _ => false,
        }
    }

    /// The visible toast, if any and not yet expired.
    pub fn current(&self) -> Option<Toast> {
        let mut slot = lock(&self.inner.slot);
        match slot.as_ref() {
            Some(active) if Instant::now() >= active.expires_at => {
                let id = active.toast.id;
                *slot = None;
                drop(slot);
                self.publish(NotificationEvent::Dismissed(id));
                None
            }
            Some(active) => Some(active.toast.clone()),
            None => None,
        }
    }

    pub fn subscribe(&self) -> Subscription<NotificationEvent> {
        let (tx, rx) = mpsc::channel();
        lock(&self.inner.subscribers).push(tx);
        Subscription::new(rx)
    }

    fn publish(&self, event: NotificationEvent) {
        let mut subs = lock(&self.inner.subscribers);

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Notifier for NotificationChannel {
    fn notify(&self, message: &str, severity: Severity) {
        self.show(message, severity);
    }
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}
