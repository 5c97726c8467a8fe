pub use crate::builder::HistoryQueueBuilder;
pub use crate::ds::{Backlog, HistoryWindow, Snapshot};
pub use crate::error::{ConfigError, Empty, Full};
pub use crate::queue::HistoryQueue;
