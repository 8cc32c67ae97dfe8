//! Bounded blocking FIFO handoff between the split engine and the write
//! workers.
//!
//! The producer side blocks while the queue is at capacity, which caps the
//! memory held by in-flight flush payloads and couples the parse rate to the
//! write rate (backpressure). The consumer side blocks while the queue is
//! empty. Shutdown is cooperative: [`finish`](BoundedQueue::finish) enqueues
//! one sentinel, and a consumer that pops it exits without re-enqueueing it,
//! so the runner pushes one sentinel per consumer thread.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// A thread-safe FIFO with a maximum depth and sentinel-based shutdown.
///
/// There is no timeout or cancellation support; both `push` and `pop` wait
/// on condition variables rather than polling.
pub struct BoundedQueue<T> {
    inner: Mutex<VecDeque<Option<T>>>,
    not_empty: Condvar,
    not_full: Condvar,
    max_depth: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue that holds at most `max_depth` items (sentinels
    /// included).
    ///
    /// # Panics
    /// Panics if `max_depth` is zero.
    pub fn new(max_depth: usize) -> Self {
        assert!(max_depth > 0, "queue depth must be at least 1");
        Self {
            inner: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            max_depth,
        }
    }

    /// Enqueue an item, blocking while the queue is full.
    pub fn push(&self, item: T) {
        self.push_slot(Some(item));
    }

    /// Enqueue exactly one shutdown sentinel, blocking while the queue is
    /// full. Call once per consumer thread.
    pub fn finish(&self) {
        self.push_slot(None);
    }

    fn push_slot(&self, slot: Option<T>) {
        let mut q = self.inner.lock().unwrap();
        while q.len() == self.max_depth {
            q = self.not_full.wait(q).unwrap();
        }
        let was_empty = q.is_empty();
        q.push_back(slot);
        if was_empty {
            self.not_empty.notify_all();
        }
    }

    /// Dequeue the next item, blocking while the queue is empty.
    ///
    /// Returns `None` when the dequeued slot is a sentinel; each sentinel
    /// is delivered exactly once.
    pub fn pop(&self) -> Option<T> {
        let mut q = self.inner.lock().unwrap();
        while q.is_empty() {
            q = self.not_empty.wait(q).unwrap();
        }
        let slot = q.pop_front().expect("queue is non-empty");
        if q.len() == self.max_depth - 1 {
            self.not_full.notify_all();
        }
        slot
    }

    /// Current depth, sentinels included. Racy by nature; intended for
    /// tests and diagnostics.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
