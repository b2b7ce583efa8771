//! File watcher for compile-on-save
//!
//! Implements the `watch` command with:
//! - Debouncing (`watch.debounceMs`, 100ms by default)
//! - Dedup of repeated notifications for one write (content hash + mtime)
//! - Self-output suppression (a compile's own write never re-triggers it)
//! - Graceful Ctrl+C shutdown

mod event;
mod sync;

pub use event::{is_document, WatchOptions, DEFAULT_DEBOUNCE_MS};
pub use sync::watch;
