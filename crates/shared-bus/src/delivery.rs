//! # Ordered Delivery
//!
//! Serializes event delivery across threads and flattens nested deliveries
//! on the delivering thread.
//!
//! ```text
//! set_value / emit ──→ lock gate ──→ enqueue ──┬─ draining? ──→ return (queued)
//!                                              │
//!                                              └─ drain: deliver(e1), deliver(e2), ...
//! ```
//!
//! An observer that writes or emits from its callback re-enters the gate on
//! the same thread. Its event is queued behind the one being delivered, so
//! every observer sees event N before event N+1.

use crate::observers::DeliveryReport;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use tracing::trace;

struct Pending<E> {
    draining: bool,
    queue: VecDeque<E>,
}

/// Re-entrant delivery gate with a pending queue.
pub struct DeliveryGate<E> {
    inner: ReentrantMutex<RefCell<Pending<E>>>,
}

impl<E> DeliveryGate<E> {
    /// Create an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(Pending {
                draining: false,
                queue: VecDeque::new(),
            })),
        }
    }

    /// Acquire the gate. Re-entrant on the holding thread.
    pub fn lock(&self) -> GateGuard<'_, E> {
        GateGuard {
            guard: self.inner.lock(),
        }
    }
}

impl<E> Default for DeliveryGate<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for DeliveryGate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryGate").finish_non_exhaustive()
    }
}

/// Held gate. State changes made under it are ordered with delivery.
pub struct GateGuard<'a, E> {
    guard: ReentrantMutexGuard<'a, RefCell<Pending<E>>>,
}

impl<E> GateGuard<'_, E> {
    /// Deliver `event` with `deliver`, after anything already queued.
    ///
    /// # Returns
    ///
    /// - `Some(report)` - This call drained the queue; the report is for `event`
    /// - `None` - A delivery is in progress on this thread; `event` was queued
    ///   and is delivered before that outer call returns
    pub fn deliver<F>(&self, event: E, mut deliver: F) -> Option<DeliveryReport>
    where
        F: FnMut(E) -> DeliveryReport,
    {
        {
            let mut pending = self.guard.borrow_mut();
            pending.queue.push_back(event);
            if pending.draining {
                trace!(queued = pending.queue.len(), "Nested delivery queued");
                return None;
            }
            pending.draining = true;
        }

        let _reset = DrainReset { guard: &self.guard };
        let mut first = None;
        loop {
            let next = self.guard.borrow_mut().queue.pop_front();
            let Some(event) = next else { break };
            let report = deliver(event);
            first.get_or_insert(report);
        }
        first
    }
}

/// Clears the draining flag even if a delivery unwinds.
struct DrainReset<'g, 'a, E> {
    guard: &'g ReentrantMutexGuard<'a, RefCell<Pending<E>>>,
}

impl<E> Drop for DrainReset<'_, '_, E> {
    fn drop(&mut self) {
        let mut pending = self.guard.borrow_mut();
        pending.draining = false;
        pending.queue.clear();
    }
}
