//! Request sequencing for dependent lookups.
//!
//! Responses may arrive in any order; only the most recently issued ticket may
//! be applied. Superseded responses are dropped at the response boundary.

/// Identifies one issued lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Monotonic per-dialog lookup counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSequence {
    latest: u64,
}

impl SearchSequence {
    /// Issue the next ticket, superseding every earlier one.
    pub const fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    /// Whether `ticket` is the most recently issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }
}
