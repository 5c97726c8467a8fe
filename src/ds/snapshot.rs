//! Immutable newest-first snapshot of the history window.
//!
//! A [`Snapshot`] is the unit stored in the backlog and the unit returned by
//! every get: a point-in-time copy of the history window taken at the moment
//! a put committed. Position 0 is always the most recently put item (the
//! "current" item); later positions walk backwards through the trailing
//! history.
//!
//! ## Key Components
//!
//! - [`Snapshot`]: Frozen newest-first sequence of items
//!
//! ## Operations
//!
//! | Operation            | Description                        | Complexity |
//! |----------------------|------------------------------------|------------|
//! | [`current`]          | Most recently put item             | O(1)       |
//! | [`len`] / [`is_empty`] | Number of items captured         | O(1)       |
//! | indexing / [`iter`]  | Newest-first access (via `Deref`)  | O(1)/O(n)  |
//!
//! [`current`]: Snapshot::current
//! [`len`]: Snapshot::len
//! [`is_empty`]: Snapshot::is_empty
//! [`iter`]: Snapshot::iter
//!
//! ## Example Usage
//!
//! ```
//! use snapq::ds::Snapshot;
//!
//! let snap: Snapshot<u32> = vec![3, 2, 1].into();
//!
//! assert_eq!(snap.current(), Some(&3));
//! assert_eq!(snap.len(), 3);
//! assert_eq!(snap[2], 1);
//! assert_eq!(snap.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//! ```
//!
//! ## Immutability
//!
//! A snapshot never changes after it is built. Later puts and
//! `clear_history` calls on the queue that produced it have no effect on
//! snapshots already delivered or still sitting in the backlog.

use std::ops::Deref;

/// Immutable newest-first sequence of items captured at put time.
///
/// Dereferences to `[T]`, so the full slice API (indexing, `contains`,
/// `first`, iteration) is available directly.
///
/// # Example
///
/// ```
/// use snapq::ds::Snapshot;
///
/// let snap: Snapshot<&str> = vec!["new", "mid", "old"].into();
/// assert_eq!(snap.current(), Some(&"new"));
/// assert!(snap.contains(&"mid"));
///
/// // Oldest-first walk of the same data
/// let oldest_first: Vec<_> = snap.iter().rev().collect();
/// assert_eq!(oldest_first, vec![&"old", &"mid", &"new"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot<T> {
    items: Box<[T]>,
}

impl<T> Snapshot<T> {
    /// Returns the most recently put item, or `None` if the snapshot is empty.
    ///
    /// Snapshots delivered by a queue always contain at least one item; empty
    /// snapshots arise only from viewing a history window before any put.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the number of items captured.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items were captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the items, newest first.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the items as a newest-first slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the snapshot, returning the items as a newest-first `Vec`.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_vec()
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    /// Freezes a newest-first `Vec` into a snapshot.
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> AsRef<[T]> for Snapshot<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Consumes the snapshot, yielding items newest first.
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
