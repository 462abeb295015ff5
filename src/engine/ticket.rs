//! Tickets tie a resolved remote call back to the state it was issued for.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifies the item state a request was issued against.
///
/// The epoch advances whenever the controller starts loading an item, so a
/// ticket from before a `next` or `retry` never matches again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    epoch: u64,
    item_index: usize,
}

impl Ticket {
    pub(crate) fn new(epoch: u64, item_index: usize) -> Self {
        Self { epoch, item_index }
    }

    /// Load generation the ticket belongs to.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Item index captured when the request was issued.
    pub fn item_index(&self) -> usize {
        self.item_index
    }
}

/// Latch allowing one outstanding call at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleFlight {
    in_flight: Option<Ticket>,
}

impl SingleFlight {
    /// Creates an open latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the latch for `ticket`. Returns false if a call is already out.
    pub fn try_acquire(&mut self, ticket: Ticket) -> bool {
        if let Some(current) = self.in_flight {
            debug!(in_flight = ?current, "Call already in flight");
            return false;
        }
        self.in_flight = Some(ticket);
        true
    }

    /// Opens the latch if it is held by `ticket`. Returns false otherwise.
    pub fn release(&mut self, ticket: Ticket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Opens the latch unconditionally.
    pub fn reset(&mut self) {
        self.in_flight = None;
    }

    /// Returns true while a call is out.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_rejected() {
        let mut latch = SingleFlight::new();
        let ticket = Ticket::new(1, 0);
        assert!(latch.try_acquire(ticket));
        assert!(!latch.try_acquire(ticket));
        assert!(latch.release(ticket));
        assert!(latch.try_acquire(ticket));
    }

    #[test]
    fn test_foreign_ticket_cannot_release() {
        let mut latch = SingleFlight::new();
        assert!(latch.try_acquire(Ticket::new(2, 1)));
        assert!(!latch.release(Ticket::new(1, 1)));
        assert!(latch.is_busy());
    }
}
