pub mod backlog;
pub mod history_window;
pub mod snapshot;

pub use backlog::Backlog;
pub use history_window::HistoryWindow;
pub use snapshot::Snapshot;
