use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smp_core::Severity;
use uuid::Uuid;

/// Identifier of a shown toast.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ToastId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: ToastId::new(),
            message: message.into(),
            severity,
            shown_at: Utc::now(),
        }
    }
}
