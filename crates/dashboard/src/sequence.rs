//! Monotonic request tickets.
//!
//! Only the response to the most recently issued ticket may update visible
//! state; anything older is discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Sequence(AtomicU64);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }

    /// Supersede all outstanding tickets without issuing a new one.
    pub fn invalidate(&self) {
        self.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = Sequence::new();
        let a = seq.next();
        let b = seq.next();
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
        seq.invalidate();
        assert!(!seq.is_current(b));
    }
}
