//! Reusable debounce utility shared by every search/filter input.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::sequence::Sequence;

/// Delays an action until calls have stopped for `delay`.
///
/// Each call to [`settle`](Self::settle) starts a new quiet period and
/// supersedes any period still running.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<Sequence>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(Sequence::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the quiet period. `true` if no newer call arrived meanwhile.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.next();
        tokio::time::sleep(self.delay).await;
        self.generation.is_current(ticket)
    }

    /// Abandon any running quiet period.
    pub fn cancel(&self) {
        self.generation.invalidate();
    }
}

/// A [`Debouncer`] that also suppresses a settled value equal to the last
/// applied key (e.g. text that was pre-filled programmatically).
#[derive(Debug)]
pub struct KeyedDebouncer<K> {
    inner: Debouncer,
    applied: Mutex<Option<K>>,
}

impl<K: Clone + PartialEq> KeyedDebouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Debouncer::new(delay),
            applied: Mutex::new(None),
        }
    }

    /// Settle `key`; yields it only if it is stable and differs from the last
    /// applied key. A yielded key becomes the applied one.
    pub async fn settle(&self, key: K) -> Option<K> {
        if !self.inner.settle().await {
            return None;
        }
        let mut applied = self.applied.lock().unwrap_or_else(|p| p.into_inner());
        if applied.as_ref() == Some(&key) {
            return None;
        }
        *applied = Some(key.clone());
        Some(key)
    }

    /// Record `key` as applied without waiting (programmatic pre-fill).
    pub fn mark_applied(&self, key: K) {
        self.inner.cancel();
        *self.applied.lock().unwrap_or_else(|p| p.into_inner()) = Some(key);
    }

    pub fn applied(&self) -> Option<K> {
        self.applied.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }
}
