//! Bounded blocking queue that delivers snapshots with trailing history.
//!
//! [`HistoryQueue`] composes two bounded collections under one blocking
//! contract: a sliding [`HistoryWindow`] of the most recently put raw items,
//! and a [`Backlog`] FIFO of undelivered [`Snapshot`]s. Every accepted put
//! pushes the item into the window, captures a newest-first snapshot, and
//! enqueues it into the backlog as one atomic unit. Every get dequeues a
//! snapshot from the backlog only; the window is never read by the get path.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          HistoryQueue                               │
//! │                                                                     │
//! │   put(item)                                                         │
//! │     │                                                               │
//! │     ▼                                                               │
//! │   ┌───────────────────┐  stage    ┌──────────────────────────────┐  │
//! │   │  HistoryWindow    │ ────────► │ Snapshot [item, prev, ...]   │  │
//! │   │  (newest first,   │           └──────────────┬───────────────┘  │
//! │   │   tail evicted)   │  commit                  │ enqueue          │
//! │   │                   │ ◄── push_front           ▼ (may block)      │
//! │   └───────────────────┘           ┌──────────────────────────────┐  │
//! │                                   │  Backlog (FIFO of snapshots) │  │
//! │                                   └──────────────┬───────────────┘  │
//! │                                                  │ dequeue          │
//! │                                                  ▼ (may block)      │
//! │                                              get() -> Snapshot      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stage-then-commit: the prospective snapshot is computed without mutating
//! the window, the backlog enqueue is attempted, and the window mutation is
//! applied only once the backlog has accepted the snapshot. A rejected or
//! timed-out put therefore leaves no partial effect, with no rollback step.
//! The whole sequence runs under the window lock, so the two mutations are
//! indivisible to any observer.
//!
//! ## Operations
//!
//! | Operation                  | Blocking | Failure                       |
//! |----------------------------|----------|-------------------------------|
//! | [`put`] / [`put_many`]     | backlog FULL | never fails               |
//! | [`put_nowait`]             | no       | [`Full`], item handed back    |
//! | [`put_timeout`]            | bounded  | [`Full`] after deadline       |
//! | [`get`]                    | backlog EMPTY | never fails              |
//! | [`get_nowait`]             | no       | [`Empty`]                     |
//! | [`get_timeout`]            | bounded  | [`Empty`] after deadline      |
//! | [`clear_history`]          | no       | never fails                   |
//!
//! [`put`]: HistoryQueue::put
//! [`put_many`]: HistoryQueue::put_many
//! [`put_nowait`]: HistoryQueue::put_nowait
//! [`put_timeout`]: HistoryQueue::put_timeout
//! [`get`]: HistoryQueue::get
//! [`get_nowait`]: HistoryQueue::get_nowait
//! [`get_timeout`]: HistoryQueue::get_timeout
//! [`clear_history`]: HistoryQueue::clear_history
//!
//! ## Example Usage
//!
//! ```
//! use snapq::queue::HistoryQueue;
//!
//! // Current item plus up to two of history; unbounded backlog.
//! let queue: HistoryQueue<u32> = HistoryQueue::new(Some(2), 0).unwrap();
//!
//! queue.put_nowait(0).unwrap();
//! queue.put_nowait(1).unwrap();
//! assert_eq!(queue.get_nowait().unwrap().as_slice(), &[0]);
//! assert_eq!(queue.get_nowait().unwrap().as_slice(), &[1, 0]);
//!
//! queue.put_many_nowait([2, 3, 4]).unwrap();
//! assert_eq!(queue.get_nowait().unwrap().as_slice(), &[2, 1, 0]);
//! assert_eq!(queue.get_nowait().unwrap().as_slice(), &[3, 2, 1]);
//! ```
//!
//! ## Threaded Producer/Consumer
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use snapq::queue::HistoryQueue;
//!
//! let queue = Arc::new(HistoryQueue::<u32>::new(Some(1), 4).unwrap());
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         for n in 0..10 {
//!             queue.put(n); // blocks while the backlog is full
//!         }
//!     })
//! };
//!
//! for n in 0..10 {
//!     let snap = queue.get(); // blocks while the backlog is empty
//!     assert_eq!(*snap.current().unwrap(), n);
//! }
//! producer.join().unwrap();
//! ```
//!
//! ## Thread Safety
//!
//! All operations take `&self`; share the queue across threads with `Arc`.
//! The window lock serializes concurrent puts, and `get` never takes the
//! window lock, so a producer blocked inside `put` cannot deadlock the
//! consumer that frees its slot. Fan-out is not provided: each snapshot is
//! delivered to exactly one get.

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::builder::HistoryQueueBuilder;
use crate::ds::{Backlog, HistoryWindow, Snapshot};
use crate::error::{ConfigError, Empty, Full};

/// Blocking queue whose consumer receives, on every get, a newest-first
/// snapshot of the most recent items.
///
/// Configuration is fixed at construction:
///
/// - `history_len`: snapshots contain the current item plus up to
///   `history_len` predecessors; `None` means the entire history since the
///   last [`clear_history`](Self::clear_history).
/// - `max_backlog`: number of undelivered snapshots the queue holds before
///   put blocks; `0` means unbounded.
///
/// The queue starts empty. To seed it from an existing sequence, use
/// [`put_many`](Self::put_many) with the items in oldest-to-newest order.
pub struct HistoryQueue<T> {
    history_len: Option<usize>,
    max_backlog: usize,
    window: Mutex<HistoryWindow<T>>,
    backlog: Backlog<Snapshot<T>>,
}

impl<T> HistoryQueue<T> {
    /// Creates a queue with the given history length and backlog capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `history_len` is `Some(usize::MAX)`: the
    /// window capacity is `history_len + 1`, which would overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::queue::HistoryQueue;
    ///
    /// let queue: HistoryQueue<u32> = HistoryQueue::new(Some(2), 1).unwrap();
    /// assert_eq!(queue.history_len(), Some(2));
    /// assert_eq!(queue.max_backlog(), 1);
    /// ```
    pub fn new(history_len: Option<usize>, max_backlog: usize) -> Result<Self, ConfigError> {
        let window_capacity = match history_len {
            Some(usize::MAX) => {
                return Err(ConfigError::new(
                    "history_len must be less than usize::MAX (window capacity is history_len + 1)",
                ));
            },
            Some(n) => Some(n + 1),
            None => None,
        };
        Ok(Self {
            history_len,
            max_backlog,
            window: Mutex::new(HistoryWindow::new(window_capacity)),
            backlog: Backlog::new(max_backlog),
        })
    }

    /// Returns a builder for configuring a queue.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::queue::HistoryQueue;
    ///
    /// let queue = HistoryQueue::<String>::builder()
    ///     .history_len(2)
    ///     .max_backlog(8)
    ///     .build::<String>()
    ///     .unwrap();
    /// assert_eq!(queue.history_len(), Some(2));
    /// ```
    pub fn builder() -> HistoryQueueBuilder {
        HistoryQueueBuilder::new()
    }

    /// Returns the configured history length (`None` = unbounded).
    #[inline]
    pub fn history_len(&self) -> Option<usize> {
        self.history_len
    }

    /// Returns the configured backlog capacity (`0` = unbounded).
    #[inline]
    pub fn max_backlog(&self) -> usize {
        self.max_backlog
    }

    /// Returns the number of undelivered snapshots.
    pub fn backlog_size(&self) -> usize {
        self.backlog.len()
    }

    /// Returns `true` if no snapshot is waiting to be delivered.
    pub fn backlog_empty(&self) -> bool {
        self.backlog.is_empty()
    }

    /// Returns `true` iff the backlog holds `max_backlog` snapshots.
    ///
    /// Always `false` for an unbounded backlog.
    pub fn backlog_full(&self) -> bool {
        self.backlog.is_full()
    }

    /// Returns `true` iff the history window holds `history_len + 1` items.
    ///
    /// Always `false` when the history is unbounded.
    pub fn history_full(&self) -> bool {
        self.window.lock().is_full()
    }

    /// Returns the number of items currently in the history window.
    pub fn history_size(&self) -> usize {
        self.window.lock().len()
    }

    /// Returns `true` if the history window holds no items.
    pub fn history_empty(&self) -> bool {
        self.window.lock().is_empty()
    }

    /// Returns `true` if the history window currently holds an equal item.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.window.lock().contains(item)
    }

    /// Resets the history window to empty.
    ///
    /// Snapshots already committed to the backlog are unaffected. The next
    /// successful put builds a snapshot of length 1, regardless of how deep
    /// the history was before the clear.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::queue::HistoryQueue;
    ///
    /// let queue: HistoryQueue<u32> = HistoryQueue::new(Some(2), 0).unwrap();
    /// queue.put_many_nowait([1, 2, 3]).unwrap();
    ///
    /// queue.clear_history();
    /// queue.put_nowait(4).unwrap();
    ///
    /// // Earlier snapshots keep their history...
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[1]);
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[2, 1]);
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[3, 2, 1]);
    /// // ...but the post-clear put starts fresh.
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[4]);
    /// ```
    pub fn clear_history(&self) {
        self.window.lock().clear();
    }
}

impl<T: Clone> HistoryQueue<T> {
    /// Puts an item, blocking while the backlog is at capacity.
    ///
    /// Once the backlog accepts the snapshot the operation is committed and
    /// cannot be rolled back.
    pub fn put(&self, item: T) {
        let mut window = self.window.lock();
        let staged = window.staged_snapshot(&item);
        self.backlog.enqueue(staged);
        window.push_front(item);
    }

    /// Puts an item if the backlog has a free slot, otherwise fails
    /// immediately.
    ///
    /// On [`Full`] neither the window nor the backlog has been mutated and
    /// the item is handed back inside the error. On success both mutations
    /// commit together; no intermediate state is observable.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::queue::HistoryQueue;
    ///
    /// let queue: HistoryQueue<u32> = HistoryQueue::new(Some(2), 1).unwrap();
    /// queue.put_nowait(0).unwrap();
    /// assert_eq!(queue.backlog_size(), 1);
    ///
    /// // Backlog full: rejected, nothing mutated
    /// assert!(queue.put_nowait(1).is_err());
    /// assert_eq!(queue.backlog_size(), 1);
    ///
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[0]);
    /// queue.put_nowait(1).unwrap();
    /// assert_eq!(queue.get_nowait().unwrap().as_slice(), &[1, 0]);
    /// ```
    pub fn put_nowait(&self, item: T) -> Result<(), Full<T>> {
        let mut window = self.window.lock();
        let staged = window.staged_snapshot(&item);
        match self.backlog.enqueue_nowait(staged) {
            Ok(()) => {
                window.push_front(item);
                Ok(())
            },
            Err(Full(_staged)) => Err(Full(item)),
        }
    }

    /// Puts an item, blocking until `deadline` at the latest.
    ///
    /// On timeout nothing has been mutated and the item is handed back.
    pub fn put_deadline(&self, item: T, deadline: Instant) -> Result<(), Full<T>> {
        let mut window = self.window.lock();
        let staged = window.staged_snapshot(&item);
        match self.backlog.enqueue_deadline(staged, deadline) {
            Ok(()) => {
                window.push_front(item);
                Ok(())
            },
            Err(Full(_staged)) => Err(Full(item)),
        }
    }

    /// Puts an item, blocking for at most `timeout`.
    ///
    /// See [`put_deadline`](Self::put_deadline).
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), Full<T>> {
        self.put_deadline(item, Instant::now() + timeout)
    }

    /// Puts each item in turn, blocking whenever the backlog is full.
    ///
    /// Items are applied in iteration order, oldest first, so the last item
    /// becomes the current one. Not transactional as a whole: each item
    /// commits independently.
    pub fn put_many<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.put(item);
        }
    }

    /// Puts each item in turn without blocking.
    ///
    /// Stops at the first item the backlog rejects; items already applied
    /// remain applied and the rejected item is handed back inside the error.
    /// The caller decides whether to retry or continue.
    pub fn put_many_nowait<I>(&self, items: I) -> Result<(), Full<T>>
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            self.put_nowait(item)?;
        }
        Ok(())
    }

    /// Returns the oldest undelivered snapshot, blocking while the backlog
    /// is empty.
    ///
    /// Snapshots are delivered in the exact order their puts committed. The
    /// history window is untouched by get.
    pub fn get(&self) -> Snapshot<T> {
        self.backlog.dequeue()
    }

    /// Returns the oldest undelivered snapshot, or fails immediately if the
    /// backlog is empty. Nothing is consumed on failure.
    pub fn get_nowait(&self) -> Result<Snapshot<T>, Empty> {
        self.backlog.dequeue_nowait()
    }

    /// Returns the oldest undelivered snapshot, blocking until `deadline` at
    /// the latest.
    ///
    /// On timeout nothing has been consumed; the snapshot (if one arrives
    /// later) remains available to the next get.
    pub fn get_deadline(&self, deadline: Instant) -> Result<Snapshot<T>, Empty> {
        self.backlog.dequeue_deadline(deadline)
    }

    /// Returns the oldest undelivered snapshot, blocking for at most
    /// `timeout`. See [`get_deadline`](Self::get_deadline).
    pub fn get_timeout(&self, timeout: Duration) -> Result<Snapshot<T>, Empty> {
        self.get_deadline(Instant::now() + timeout)
    }

    /// Returns a point-in-time, read-only view of the history window.
    ///
    /// This is a copy: later puts and clears do not affect it. Unlike the
    /// snapshots delivered by get, this view may be empty.
    pub fn history(&self) -> Snapshot<T> {
        self.window.lock().snapshot()
    }
}

impl<T> fmt::Debug for HistoryQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryQueue")
            .field("history_len", &self.history_len)
            .field("max_backlog", &self.max_backlog)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// After N puts, the next snapshot has length min(puts so far,
        /// history_len + 1); with unbounded history, exactly puts-so-far.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_snapshot_length_law(
            items in prop::collection::vec(any::<u32>(), 1..40),
            history_len in proptest::option::of(0usize..5),
        ) {
            let queue = HistoryQueue::new(history_len, 0).unwrap();
            for item in &items {
                queue.put_nowait(*item).unwrap();
            }
            for n in 1..=items.len() {
                let snap = queue.get_nowait().unwrap();
                let expected = match history_len {
                    Some(h) => n.min(h + 1),
                    None => n,
                };
                prop_assert_eq!(snap.len(), expected);
            }
        }

        /// Snapshot element k is the item put k puts before the current one.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_snapshot_ordering_law(
            items in prop::collection::vec(any::<u32>(), 1..40),
            history_len in proptest::option::of(0usize..5),
        ) {
            let queue = HistoryQueue::new(history_len, 0).unwrap();
            for item in &items {
                queue.put_nowait(*item).unwrap();
            }
            for n in 1..=items.len() {
                let snap = queue.get_nowait().unwrap();
                for (k, value) in snap.iter().enumerate() {
                    prop_assert_eq!(*value, items[n - 1 - k]);
                }
            }
        }

        /// backlog_size == min(P - G, max_backlog) when bounded, P - G else.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_backlog_size_law(
            ops in prop::collection::vec(any::<bool>(), 0..100),
            max_backlog in 0usize..5,
        ) {
            let queue: HistoryQueue<u32> = HistoryQueue::new(Some(1), max_backlog).unwrap();
            let mut puts = 0usize;
            let mut gets = 0usize;
            for is_put in ops {
                if is_put {
                    if queue.put_nowait(puts as u32).is_ok() {
                        puts += 1;
                    }
                } else if queue.get_nowait().is_ok() {
                    gets += 1;
                }
                let outstanding = puts - gets;
                let expected = if max_backlog > 0 {
                    outstanding.min(max_backlog)
                } else {
                    outstanding
                };
                prop_assert_eq!(queue.backlog_size(), expected);
            }
        }

        /// Rollback law: a rejected put_nowait changes nothing observable —
        /// neither backlog size nor the contents of subsequent snapshots.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_rejected_put_leaves_no_trace(
            fill in prop::collection::vec(any::<u32>(), 1..4),
        ) {
            let queue: HistoryQueue<u32> =
                HistoryQueue::new(Some(2), fill.len()).unwrap();
            queue.put_many_nowait(fill.clone()).unwrap();

            let history_before = queue.history();
            prop_assert!(queue.put_nowait(9999).is_err());

            prop_assert_eq!(queue.backlog_size(), fill.len());
            prop_assert_eq!(queue.history(), history_before);

            // Drain one, then the retried put sees history without 9999's
            // failed attempt.
            let first = queue.get_nowait().unwrap();
            prop_assert_eq!(first.as_slice(), &[fill[0]]);
            queue.put_nowait(9999).unwrap();
            let occurrences = queue.history().iter().filter(|v| **v == 9999).count();
            prop_assert_eq!(occurrences, 1);
        }

        /// The queue behaves like a model built from plain Vec bookkeeping.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_model(
            ops in prop::collection::vec(any::<bool>(), 0..120),
            history_len in 0usize..4,
            max_backlog in 0usize..4,
        ) {
            let queue: HistoryQueue<u32> =
                HistoryQueue::new(Some(history_len), max_backlog).unwrap();

            let mut model_window: Vec<u32> = Vec::new(); // newest first
            let mut model_backlog: Vec<Vec<u32>> = Vec::new();
            let mut next = 0u32;

            for is_put in ops {
                if is_put {
                    let accepted = queue.put_nowait(next).is_ok();
                    let model_accepts =
                        max_backlog == 0 || model_backlog.len() < max_backlog;
                    prop_assert_eq!(accepted, model_accepts);
                    if accepted {
                        model_window.insert(0, next);
                        model_window.truncate(history_len + 1);
                        model_backlog.push(model_window.clone());
                    }
                    next += 1;
                } else {
                    match queue.get_nowait() {
                        Ok(snap) => {
                            prop_assert!(!model_backlog.is_empty());
                            let expected = model_backlog.remove(0);
                            prop_assert_eq!(snap.into_vec(), expected);
                        },
                        Err(Empty) => prop_assert!(model_backlog.is_empty()),
                    }
                }
                prop_assert_eq!(queue.backlog_size(), model_backlog.len());
                prop_assert_eq!(queue.history_size(), model_window.len());
            }
        }
    }
}
