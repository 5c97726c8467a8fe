//! Builder for [`HistoryQueue`] configuration.
//!
//! Collects the two construction parameters and validates them once in
//! [`build`](HistoryQueueBuilder::build), returning [`ConfigError`] on
//! invalid input. Defaults: unbounded history, unbounded backlog.
//!
//! ## Example
//!
//! ```
//! use snapq::builder::HistoryQueueBuilder;
//!
//! let queue = HistoryQueueBuilder::new()
//!     .history_len(2)
//!     .max_backlog(16)
//!     .build::<u64>()
//!     .unwrap();
//!
//! assert_eq!(queue.history_len(), Some(2));
//! assert_eq!(queue.max_backlog(), 16);
//! ```

use crate::error::ConfigError;
use crate::queue::HistoryQueue;

/// Configures and constructs a [`HistoryQueue`].
#[derive(Debug, Clone, Default)]
pub struct HistoryQueueBuilder {
    history_len: Option<usize>,
    max_backlog: usize,
}

impl HistoryQueueBuilder {
    /// Starts a builder with unbounded history and unbounded backlog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps snapshots at the current item plus `history_len` predecessors.
    pub fn history_len(mut self, history_len: usize) -> Self {
        self.history_len = Some(history_len);
        self
    }

    /// Removes the history cap: snapshots contain the entire history since
    /// the last clear. This is the default.
    pub fn unbounded_history(mut self) -> Self {
        self.history_len = None;
        self
    }

    /// Caps the number of undelivered snapshots; `0` (the default) means
    /// unbounded and put never blocks.
    pub fn max_backlog(mut self, max_backlog: usize) -> Self {
        self.max_backlog = max_backlog;
        self
    }

    /// Validates the configuration and constructs the queue.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `history_len` is `usize::MAX` (the window
    /// capacity `history_len + 1` would overflow).
    pub fn build<T>(self) -> Result<HistoryQueue<T>, ConfigError> {
        HistoryQueue::new(self.history_len, self.max_backlog)
    }
}
