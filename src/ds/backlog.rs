//! Bounded blocking FIFO of undelivered snapshots.
//!
//! The backlog is the only blocking-relevant state in the queue: enqueue
//! suspends the calling thread while the backlog is at capacity, dequeue
//! suspends while it is empty. Non-blocking and deadline-bounded variants
//! fail fast with [`Full`]/[`Empty`] and perform no mutation.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                    Backlog (capacity = 3)                         │
//! │                                                                   │
//! │   enqueue ──► ┌────────┬────────┬────────┐ ──► dequeue            │
//! │   (push_back) │ oldest │  ...   │ newest │     (pop_front, FIFO)  │
//! │               └────────┴────────┴────────┘                        │
//! │                                                                   │
//! │   State machine (capacity > 0):                                   │
//! │                                                                   │
//! │     EMPTY ⇄ PARTIAL ⇄ FULL                                        │
//! │       │                  │                                        │
//! │       └─ dequeue waits   └─ enqueue waits on `not_full`           │
//! │          on `not_empty`                                           │
//! │                                                                   │
//! │   capacity == 0: unbounded, enqueue never waits, never FULL.      │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation              | Description                            |
//! |------------------------|----------------------------------------|
//! | [`enqueue`]            | Block while at capacity, then push     |
//! | [`enqueue_nowait`]     | Fail fast with `Full`, no mutation     |
//! | [`enqueue_deadline`]   | Bounded wait, `Full` on timeout        |
//! | [`dequeue`]            | Block while empty, then pop oldest     |
//! | [`dequeue_nowait`]     | Fail fast with `Empty`, no mutation    |
//! | [`dequeue_deadline`]   | Bounded wait, `Empty` on timeout       |
//!
//! [`enqueue`]: Backlog::enqueue
//! [`enqueue_nowait`]: Backlog::enqueue_nowait
//! [`enqueue_deadline`]: Backlog::enqueue_deadline
//! [`dequeue`]: Backlog::dequeue
//! [`dequeue_nowait`]: Backlog::dequeue_nowait
//! [`dequeue_deadline`]: Backlog::dequeue_deadline
//!
//! ## Fairness
//!
//! Waiters suspended on the same condition are woken oldest-first:
//! `parking_lot`'s parking queues are FIFO and `Condvar::notify_one` wakes
//! the longest-waiting thread.
//!
//! ## Example Usage
//!
//! ```
//! use snapq::ds::Backlog;
//!
//! let backlog: Backlog<u32> = Backlog::new(2);
//! backlog.enqueue_nowait(1).unwrap();
//! backlog.enqueue_nowait(2).unwrap();
//!
//! // At capacity: fail fast, value handed back
//! let err = backlog.enqueue_nowait(3).unwrap_err();
//! assert_eq!(err.into_inner(), 3);
//!
//! // FIFO order
//! assert_eq!(backlog.dequeue_nowait(), Ok(1));
//! assert_eq!(backlog.dequeue_nowait(), Ok(2));
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use crate::error::{Empty, Full};

/// Bounded blocking FIFO. `capacity` of `0` means unbounded.
///
/// All operations take `&self`; the backlog is internally synchronized and
/// safe to share across producer and consumer threads.
#[derive(Debug)]
pub struct Backlog<T> {
    capacity: usize,
    queue: Mutex<VecDeque<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> Backlog<T> {
    /// Creates an empty backlog. A `capacity` of `0` means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: Mutex::new(VecDeque::new()),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Returns the configured capacity (`0` = unbounded).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of values currently queued.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns `true` if no values are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Returns `true` iff the backlog holds `capacity` values.
    ///
    /// Always `false` when unbounded.
    pub fn is_full(&self) -> bool {
        self.at_capacity(&self.queue.lock())
    }

    /// Enqueues a value, blocking while the backlog is at capacity.
    ///
    /// An unbounded backlog never blocks.
    pub fn enqueue(&self, value: T) {
        let mut queue = self.queue.lock();
        while self.at_capacity(&queue) {
            self.not_full.wait(&mut queue);
        }
        queue.push_back(value);
        drop(queue);
        self.not_empty.notify_one();
    }

    /// Enqueues a value if a slot is free, otherwise fails immediately.
    ///
    /// On failure the backlog is unchanged and the value is handed back
    /// inside the error.
    pub fn enqueue_nowait(&self, value: T) -> Result<(), Full<T>> {
        let mut queue = self.queue.lock();
        if self.at_capacity(&queue) {
            return Err(Full(value));
        }
        queue.push_back(value);
        drop(queue);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Enqueues a value, blocking until `deadline` at the latest.
    ///
    /// On timeout the backlog is unchanged and the value is handed back.
    pub fn enqueue_deadline(&self, value: T, deadline: Instant) -> Result<(), Full<T>> {
        let mut queue = self.queue.lock();
        while self.at_capacity(&queue) {
            if self.not_full.wait_until(&mut queue, deadline).timed_out()
                && self.at_capacity(&queue)
            {
                return Err(Full(value));
            }
        }
        queue.push_back(value);
        drop(queue);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Removes and returns the oldest value, blocking while empty.
    pub fn dequeue(&self) -> T {
        let mut queue = self.queue.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                drop(queue);
                self.not_full.notify_one();
                return value;
            }
            self.not_empty.wait(&mut queue);
        }
    }

    /// Removes and returns the oldest value, or fails immediately if empty.
    pub fn dequeue_nowait(&self) -> Result<T, Empty> {
        let mut queue = self.queue.lock();
        match queue.pop_front() {
            Some(value) => {
                drop(queue);
                self.not_full.notify_one();
                Ok(value)
            },
            None => Err(Empty),
        }
    }

    /// Removes and returns the oldest value, blocking until `deadline` at
    /// the latest.
    ///
    /// On timeout nothing is consumed.
    pub fn dequeue_deadline(&self, deadline: Instant) -> Result<T, Empty> {
        let mut queue = self.queue.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                drop(queue);
                self.not_full.notify_one();
                return Ok(value);
            }
            if self.not_empty.wait_until(&mut queue, deadline).timed_out() && queue.is_empty() {
                return Err(Empty);
            }
        }
    }

    #[inline]
    fn at_capacity(&self, queue: &VecDeque<T>) -> bool {
        self.capacity > 0 && queue.len() >= self.capacity
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Size never exceeds a nonzero capacity, whatever the op sequence.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_size_within_capacity(
            ops in prop::collection::vec(any::<bool>(), 0..200),
            cap in 1usize..6,
        ) {
            let backlog: Backlog<u32> = Backlog::new(cap);
            let mut n = 0u32;
            for is_put in ops {
                if is_put {
                    let _ = backlog.enqueue_nowait(n);
                    n += 1;
                } else {
                    let _ = backlog.dequeue_nowait();
                }
                prop_assert!(backlog.len() <= cap);
            }
        }

        /// Values come out in exactly the order they went in.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_fifo_matches_reference(
            values in prop::collection::vec(any::<u32>(), 0..100),
        ) {
            let backlog: Backlog<u32> = Backlog::new(0);
            for v in &values {
                backlog.enqueue_nowait(*v).unwrap();
            }
            let mut out = Vec::new();
            while let Ok(v) = backlog.dequeue_nowait() {
                out.push(v);
            }
            prop_assert_eq!(out, values);
        }

        /// A rejected enqueue_nowait changes nothing observable.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_rejected_enqueue_is_pure(
            fill in prop::collection::vec(any::<u32>(), 1..5),
        ) {
            let backlog: Backlog<u32> = Backlog::new(fill.len());
            for v in &fill {
                backlog.enqueue_nowait(*v).unwrap();
            }

            let before = backlog.len();
            prop_assert!(backlog.enqueue_nowait(999).is_err());
            prop_assert_eq!(backlog.len(), before);

            let mut out = Vec::new();
            while let Ok(v) = backlog.dequeue_nowait() {
                out.push(v);
            }
            prop_assert_eq!(out, fill);
        }
    }
}
