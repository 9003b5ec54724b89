// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Latest-wins coalescing of pointer moves into frame passes.
//!
//! Pointer events can arrive far faster than the UI repaints. Every move is recorded,
//! but only the first move after a pass asks the host for a new frame; later moves
//! overwrite the pending position. The host flushes with [`MoveCoalescer::take`] on
//! its next frame.
//!
//! ```
//! use trellis_drag::coalesce::{MoveCoalescer, Schedule};
//!
//! let mut c = MoveCoalescer::new();
//! assert_eq!(c.push(1), Schedule::Requested);
//! assert_eq!(c.push(2), Schedule::Coalesced);
//! assert_eq!(c.push(3), Schedule::Coalesced);
//! assert_eq!(c.take(), Some(3));
//! assert_eq!(c.take(), None);
//! ```

/// What a push asks of the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Nothing was pending: schedule a frame pass.
    Requested,
    /// A pass is already scheduled and will see this value.
    Coalesced,
}

/// Holds at most one pending value.
#[derive(Clone, Debug, Default)]
pub struct MoveCoalescer<T> {
    pending: Option<T>,
    coalesced: u32,
}

impl<T> MoveCoalescer<T> {
    /// An empty coalescer.
    pub fn new() -> Self {
        Self {
            pending: None,
            coalesced: 0,
        }
    }

    /// Record `value`, replacing any pending one.
    pub fn push(&mut self, value: T) -> Schedule {
        if self.pending.replace(value).is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
            Schedule::Coalesced
        } else {
            Schedule::Requested
        }
    }

    /// Take the pending value, ending the scheduled pass.
    pub fn take(&mut self) -> Option<T> {
        self.coalesced = 0;
        self.pending.take()
    }

    /// Forget the pending value. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.coalesced = 0;
        self.pending.take().is_some()
    }

    /// True if a pass is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of values overwritten since the last pass.
    pub fn coalesced_count(&self) -> u32 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_request_per_pass() {
        let mut c = MoveCoalescer::new();
        assert_eq!(c.push('a'), Schedule::Requested);
        assert_eq!(c.push('b'), Schedule::Coalesced);
        assert_eq!(c.coalesced_count(), 1);
        assert_eq!(c.take(), Some('b'));
        assert_eq!(c.push('c'), Schedule::Requested);
    }

    #[test]
    fn cancel_drops_pending() {
        let mut c = MoveCoalescer::new();
        assert!(!c.cancel());
        c.push(1_u8);
        assert!(c.is_pending());
        assert!(c.cancel());
        assert!(!c.is_pending());
        assert_eq!(c.take(), None);
    }
}
