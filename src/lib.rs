//! snapq: a bounded, blocking queue with snapshot history.
//!
//! Every value put on a [`HistoryQueue`](queue::HistoryQueue) is delivered to
//! the consumer together with the items that preceded it, as an immutable
//! newest-first [`Snapshot`](ds::Snapshot). See `DESIGN.md` for internal
//! architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod queue;
