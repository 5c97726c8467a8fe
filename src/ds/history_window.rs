//! Capacity-bounded sliding window of the most recently put items.
//!
//! Stores raw items newest-first, evicting the oldest item silently when a
//! push would exceed capacity. The window is never read by the get path; it
//! only grows/shifts via put and resets via clear-history.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  HistoryWindow (capacity = 3)                    │
//! │                                                                  │
//! │   Index:      0        1        2                                │
//! │             ┌──────┬────────┬────────┐                           │
//! │   items:    │ newest│  ...   │ oldest │                          │
//! │             └──────┴────────┴────────┘                           │
//! │               ▲                   │                              │
//! │   push_front ─┘                   └─► evicted when over capacity │
//! │                                                                  │
//! │   staged_snapshot(&x) computes the post-push contents            │
//! │   without mutating: [x, items...] truncated to capacity.         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation            | Description                          | Complexity |
//! |----------------------|--------------------------------------|------------|
//! | [`push_front`]       | Prepend, evict tail if over capacity | O(1)       |
//! | [`snapshot`]         | Newest-first copy of contents        | O(n)       |
//! | [`staged_snapshot`]  | Copy as if one more item were pushed | O(n)       |
//! | [`clear`]            | Reset to empty, capacity unchanged   | O(n)       |
//! | [`is_full`]          | Length equals capacity               | O(1)       |
//!
//! [`push_front`]: HistoryWindow::push_front
//! [`snapshot`]: HistoryWindow::snapshot
//! [`staged_snapshot`]: HistoryWindow::staged_snapshot
//! [`clear`]: HistoryWindow::clear
//! [`is_full`]: HistoryWindow::is_full
//!
//! ## Example Usage
//!
//! ```
//! use snapq::ds::HistoryWindow;
//!
//! // Capacity 3: current item plus two of history
//! let mut window = HistoryWindow::new(Some(3));
//!
//! window.push_front(1);
//! window.push_front(2);
//! window.push_front(3);
//! assert!(window.is_full());
//!
//! // Oldest item (1) evicted silently
//! window.push_front(4);
//! assert_eq!(window.snapshot().as_slice(), &[4, 3, 2]);
//! ```
//!
//! ## Thread Safety
//!
//! `HistoryWindow` is not thread-safe. It is owned by a
//! [`HistoryQueue`](crate::queue::HistoryQueue) and protected by the queue's
//! synchronization.

use std::collections::VecDeque;

use crate::ds::Snapshot;

/// Bounded newest-first buffer of raw items.
///
/// `capacity` of `None` means unbounded: no eviction ever occurs and
/// [`is_full`](Self::is_full) is always `false`.
#[derive(Debug, Clone)]
pub struct HistoryWindow<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T> HistoryWindow<T> {
    /// Creates an empty window with the given capacity (`None` = unbounded).
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    /// Returns the maximum number of items retained (`None` = unbounded).
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Returns the number of items currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the window holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` iff the current length equals capacity.
    ///
    /// Always `false` for an unbounded window.
    #[inline]
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(cap) => self.items.len() == cap,
            None => false,
        }
    }

    /// Prepends an item, evicting the oldest if capacity would be exceeded.
    ///
    /// Infallible: overflow is absorbed silently, not signaled.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::ds::HistoryWindow;
    ///
    /// let mut window = HistoryWindow::new(Some(2));
    /// window.push_front("a");
    /// window.push_front("b");
    /// window.push_front("c");
    /// assert_eq!(window.snapshot().as_slice(), &["c", "b"]);
    /// ```
    pub fn push_front(&mut self, item: T) {
        if self.capacity == Some(0) {
            return;
        }
        self.items.push_front(item);
        if let Some(cap) = self.capacity {
            if self.items.len() > cap {
                self.items.pop_back();
            }
        }
    }

    /// Resets the window to empty. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns an iterator over current contents, newest first.
    #[inline]
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns `true` if the window currently holds an equal item.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(item)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Some(cap) = self.capacity {
            assert!(self.items.len() <= cap);
        }
    }
}

impl<T: Clone> HistoryWindow<T> {
    /// Returns a newest-first copy of the current contents. Pure.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.items.iter().cloned().collect::<Vec<_>>().into()
    }

    /// Returns the snapshot that would result from `push_front(item)`,
    /// without mutating the window.
    ///
    /// This is the stage half of the queue's stage-then-commit protocol: the
    /// prospective snapshot is built first, the backlog enqueue is attempted,
    /// and the window mutation is applied only if the enqueue succeeds.
    ///
    /// # Example
    ///
    /// ```
    /// use snapq::ds::HistoryWindow;
    ///
    /// let mut window = HistoryWindow::new(Some(2));
    /// window.push_front(1);
    ///
    /// let staged = window.staged_snapshot(&2);
    /// assert_eq!(staged.as_slice(), &[2, 1]);
    /// // Window itself untouched
    /// assert_eq!(window.len(), 1);
    /// ```
    pub fn staged_snapshot(&self, item: &T) -> Snapshot<T> {
        if self.capacity == Some(0) {
            return Vec::new().into();
        }
        let take = match self.capacity {
            Some(cap) => (cap - 1).min(self.items.len()),
            None => self.items.len(),
        };
        let mut staged = Vec::with_capacity(take + 1);
        staged.push(item.clone());
        staged.extend(self.items.iter().take(take).cloned());
        staged.into()
    }
}

impl<'a, T> IntoIterator for &'a HistoryWindow<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_keeps_newest_first_order() {
        let mut window = HistoryWindow::new(Some(3));
        window.push_front(10);
        window.push_front(20);
        window.push_front(30);
        assert_eq!(window.snapshot().as_slice(), &[30, 20, 10]);
    }

    #[test]
    fn overflow_evicts_tail_silently() {
        let mut window = HistoryWindow::new(Some(2));
        window.push_front(1);
        window.push_front(2);
        window.push_front(3);
        assert_eq!(window.len(), 2);
        assert_eq!(window.snapshot().as_slice(), &[3, 2]);
    }

    #[test]
    fn unbounded_never_evicts_and_never_full() {
        let mut window = HistoryWindow::new(None);
        for n in 0..100 {
            window.push_front(n);
            assert!(!window.is_full());
        }
        assert_eq!(window.len(), 100);
        assert_eq!(window.snapshot()[0], 99);
        assert_eq!(window.snapshot()[99], 0);
    }

    #[test]
    fn is_full_tracks_capacity() {
        let mut window = HistoryWindow::new(Some(2));
        assert!(!window.is_full());
        window.push_front(1);
        assert!(!window.is_full());
        window.push_front(2);
        assert!(window.is_full());
        window.push_front(3);
        assert!(window.is_full());
    }

    #[test]
    fn clear_empties_but_keeps_capacity() {
        let mut window = HistoryWindow::new(Some(3));
        window.push_front(1);
        window.push_front(2);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), Some(3));

        window.push_front(9);
        assert_eq!(window.snapshot().as_slice(), &[9]);
    }

    #[test]
    fn snapshot_is_pure() {
        let mut window = HistoryWindow::new(Some(3));
        window.push_front(1);
        let snap = window.snapshot();
        let again = window.snapshot();
        assert_eq!(snap, again);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn staged_snapshot_does_not_mutate() {
        let mut window = HistoryWindow::new(Some(3));
        window.push_front(1);
        window.push_front(2);

        let staged = window.staged_snapshot(&3);
        assert_eq!(staged.as_slice(), &[3, 2, 1]);
        assert_eq!(window.len(), 2);
        assert_eq!(window.snapshot().as_slice(), &[2, 1]);
    }

    #[test]
    fn staged_snapshot_truncates_at_capacity() {
        let mut window = HistoryWindow::new(Some(2));
        window.push_front(1);
        window.push_front(2);

        let staged = window.staged_snapshot(&3);
        assert_eq!(staged.as_slice(), &[3, 2]);
    }

    #[test]
    fn staged_snapshot_matches_push_then_snapshot() {
        let mut window = HistoryWindow::new(Some(3));
        for n in 0..6 {
            let staged = window.staged_snapshot(&n);
            window.push_front(n);
            assert_eq!(staged, window.snapshot());
        }
    }

    #[test]
    fn staged_snapshot_unbounded_grows_without_limit() {
        let mut window = HistoryWindow::new(None);
        for n in 0..10 {
            window.push_front(n);
        }
        let staged = window.staged_snapshot(&10);
        assert_eq!(staged.len(), 11);
        assert_eq!(staged[0], 10);
    }

    #[test]
    fn zero_capacity_window_stays_empty() {
        let mut window = HistoryWindow::new(Some(0));
        window.push_front(1);
        assert!(window.is_empty());
        assert_eq!(window.staged_snapshot(&2).len(), 0);
    }

    #[test]
    fn contains_and_iter_view() {
        let mut window = HistoryWindow::new(Some(3));
        window.push_front(1);
        window.push_front(2);
        assert!(window.contains(&1));
        assert!(!window.contains(&7));

        let seen: Vec<_> = (&window).into_iter().copied().collect();
        assert_eq!(seen, vec![2, 1]);
    }
}
