//! Virtual clock and event queue
//!
//! The simulation runs in logical time measured in days. Time advances in
//! jumps: the clock pops the earliest pending wake-up, moves `now` to its
//! wake time, and hands the attached process handle back to the caller.
//! Nothing here knows about hospital state; the clock stores only opaque
//! [`ProcessId`] handles.
//!
//! # Ordering
//!
//! Wake-ups are ordered by wake time ascending, then by insertion sequence
//! ascending. The sequence tie-break gives stable FIFO behavior at equal
//! times: two runs with the same seed and the same call sequence replay
//! bit-identically. A wake-up scheduled *during* a pop (even with delay 0)
//! gets a fresh sequence number and therefore runs after every wake-up
//! already due at the same instant.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a suspended process continuation.
///
/// Handles are allocated by the process arena and held by the clock while
/// the process is waiting. The clock never dereferences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub(crate) u32);

impl ProcessId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised by the clock itself.
///
/// A negative or non-finite delay is a kernel invariant violation, never
/// expected in normal operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClockError {
    #[error("invalid suspension delay {0}: must be finite and non-negative")]
    InvalidDelay(f64),
}

/// A pending wake-up in the event queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduledWake {
    wake_time: f64,
    seq: u64,
    pid: ProcessId,
}

impl PartialEq for ScheduledWake {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for ScheduledWake {}

impl PartialOrd for ScheduledWake {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledWake {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap pops the earliest wake time, with
        // the lowest sequence number winning ties (stable FIFO).
        other
            .wake_time
            .total_cmp(&self.wake_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual clock owning the time-ordered queue of pending wake-ups.
///
/// The driving loop alternates `pop_due(target)` with resuming the returned
/// process until `pop_due` yields `None`, then calls `advance_to(target)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualClock {
    /// Current simulated time in days
    now: f64,
    /// Next insertion sequence number
    next_seq: u64,
    /// Pending wake-ups, earliest first
    queue: BinaryHeap<ScheduledWake>,
}

impl VirtualClock {
    /// Create a clock at time zero with an empty queue.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current simulated time in days.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of pending wake-ups.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedule `pid` to wake at `now + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidDelay`] if `delay` is negative, NaN, or
    /// infinite.
    pub fn schedule(&mut self, delay: f64, pid: ProcessId) -> Result<(), ClockError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(ClockError::InvalidDelay(delay));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        self.queue.push(ScheduledWake {
            wake_time: self.now + delay,
            seq,
            pid,
        });
        Ok(())
    }

    /// Pop the earliest wake-up due at or before `target`, advancing `now`
    /// to its wake time.
    ///
    /// Returns `None` when the queue is empty or the earliest wake-up lies
    /// strictly beyond `target`; in that case the queue is left untouched
    /// and `now` does not move.
    pub fn pop_due(&mut self, target: f64) -> Option<ProcessId> {
        if self.queue.peek()?.wake_time > target {
            return None;
        }

        let wake = self.queue.pop()?;
        self.now = wake.wake_time;
        Some(wake.pid)
    }

    /// Clamp `now` forward to `target` at the end of a run.
    ///
    /// The clock never moves backwards; a `target` in the past is ignored.
    pub fn advance_to(&mut self, target: f64) {
        if target > self.now {
            self.now = target;
        }
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(2.0, ProcessId(0)).unwrap();
        clock.schedule(0.5, ProcessId(1)).unwrap();
        clock.schedule(1.0, ProcessId(2)).unwrap();

        assert_eq!(clock.pop_due(10.0), Some(ProcessId(1)));
        assert_eq!(clock.now(), 0.5);
        assert_eq!(clock.pop_due(10.0), Some(ProcessId(2)));
        assert_eq!(clock.pop_due(10.0), Some(ProcessId(0)));
        assert_eq!(clock.now(), 2.0);
        assert!(clock.is_empty());
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut clock = VirtualClock::new();
        for i in 0..5 {
            clock.schedule(1.0, ProcessId(i)).unwrap();
        }

        for i in 0..5 {
            assert_eq!(clock.pop_due(1.0), Some(ProcessId(i)));
        }
    }

    #[test]
    fn rejects_negative_delay() {
        let mut clock = VirtualClock::new();
        assert_eq!(
            clock.schedule(-0.25, ProcessId(0)),
            Err(ClockError::InvalidDelay(-0.25))
        );
        assert!(clock.is_empty());
    }

    #[test]
    fn rejects_non_finite_delay() {
        let mut clock = VirtualClock::new();
        assert!(clock.schedule(f64::NAN, ProcessId(0)).is_err());
        assert!(clock.schedule(f64::INFINITY, ProcessId(0)).is_err());
    }

    #[test]
    fn wake_beyond_target_stays_queued() {
        let mut clock = VirtualClock::new();
        clock.schedule(3.0, ProcessId(7)).unwrap();

        assert_eq!(clock.pop_due(1.0), None);
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.len(), 1);

        clock.advance_to(1.0);
        assert_eq!(clock.now(), 1.0);

        // Still due later, with the original wake time.
        assert_eq!(clock.pop_due(3.0), Some(ProcessId(7)));
        assert_eq!(clock.now(), 3.0);
    }

    #[test]
    fn wake_exactly_at_target_is_due() {
        let mut clock = VirtualClock::new();
        clock.schedule(1.0, ProcessId(0)).unwrap();
        assert_eq!(clock.pop_due(1.0), Some(ProcessId(0)));
    }

    #[test]
    fn advance_to_never_moves_backwards() {
        let mut clock = VirtualClock::new();
        clock.advance_to(2.0);
        clock.advance_to(1.0);
        assert_eq!(clock.now(), 2.0);
    }
}
