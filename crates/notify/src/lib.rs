//! `smp-notify`
//!
//! **Responsibility:** process-wide transient notifications (toasts).
//!
//! - A single "current toast" slot (last writer wins)
//! - Self-dismiss after a fixed duration
//! - Pub/sub subscriptions for whatever renders the toasts
//! - The [`Notifier`] seam injected into the API gateway

pub mod bus;
pub mod channel;
pub mod flash;
pub mod toast;

pub use bus::Subscription;
pub use channel::{DEFAULT_DISPLAY_FOR, NotificationChannel, NotificationEvent, Notifier};
pub use flash::FlashMessage;
pub use toast::{Toast, ToastId};
