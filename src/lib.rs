// tasklist - Single-user task list with filtering, search and key-value persistence

pub mod config;
pub mod edit;
pub mod filter;
pub mod storage;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use config::Config;
pub use edit::EditState;
pub use filter::{FilterMode, view};
pub use storage::{DEFAULT_KEY, MemoryStorage, SqliteStorage, Storage};
pub use store::TaskStore;
pub use task::{Task, now_ms};
