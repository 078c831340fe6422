//! Conversation thread storage.
//!
//! - [`ThreadStore`]: concurrent, TTL-evicting map of thread id to thread
//! - [`ThreadSweeper`]: background task removing expired threads

pub mod store;
pub mod sweeper;

pub use store::ThreadStore;
pub use sweeper::ThreadSweeper;
