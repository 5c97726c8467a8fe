//! Error types for the snapq library.
//!
//! ## Key Components
//!
//! - [`Full`]: Returned by non-blocking and timed put paths when the backlog
//!   is at capacity. Carries the rejected item back to the caller.
//! - [`Empty`]: Returned by non-blocking and timed get paths when the backlog
//!   holds no snapshot.
//! - [`ConfigError`]: Returned when queue configuration parameters are
//!   invalid at construction time.
//!
//! The blocking API never returns `Full` or `Empty`; it suspends the calling
//! thread instead. A `Full` or `Empty` result guarantees that no mutation
//! occurred for that attempt.
//!
//! ## Example Usage
//!
//! ```
//! use snapq::queue::HistoryQueue;
//!
//! let queue: HistoryQueue<u32> = HistoryQueue::new(Some(2), 1).unwrap();
//! queue.put_nowait(0).unwrap();
//!
//! // Backlog capacity is 1; the second item is rejected and handed back.
//! let err = queue.put_nowait(7).unwrap_err();
//! assert_eq!(err.into_inner(), 7);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// Full
// ---------------------------------------------------------------------------

/// Error returned when the backlog cannot accept a snapshot.
///
/// Produced by [`HistoryQueue::put_nowait`](crate::queue::HistoryQueue::put_nowait)
/// and the timed put variants. The rejected item is handed back inside the
/// error so a failed attempt loses nothing, in the manner of
/// [`std::sync::mpsc::TrySendError`].
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Consumes the error, returning the rejected item.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

// Manual Debug so the item type need not implement it.
impl<T> fmt::Debug for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Full(..)")
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backlog is full")
    }
}

impl<T> std::error::Error for Full<T> {}

// ---------------------------------------------------------------------------
// Empty
// ---------------------------------------------------------------------------

/// Error returned when the backlog holds no snapshot.
///
/// Produced by [`HistoryQueue::get_nowait`](crate::queue::HistoryQueue::get_nowait)
/// and the timed get variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backlog is empty")
    }
}

impl std::error::Error for Empty {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when queue configuration parameters are invalid.
///
/// Produced by [`HistoryQueue::new`](crate::queue::HistoryQueue::new) and
/// [`HistoryQueueBuilder::build`](crate::builder::HistoryQueueBuilder::build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use snapq::queue::HistoryQueue;
///
/// let err = HistoryQueue::<u64>::new(Some(usize::MAX), 0).unwrap_err();
/// assert!(err.to_string().contains("history_len"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
