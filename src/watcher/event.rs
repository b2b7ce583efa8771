//! Watch options and debounce state

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

/// Debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// JavaScript and TypeScript document extensions
pub(crate) const DOCUMENT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Directories whose contents are never treated as saves
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Workspace root (watched recursively)
    pub workspace_root: PathBuf,
    /// Quiet period before pending saves are handled
    pub debounce_ms: u64,
}

impl WatchOptions {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

/// True for JS/TS documents outside dependency and VCS directories.
pub fn is_document(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| DOCUMENT_EXTENSIONS.contains(&e))
        .unwrap_or(false);

    has_extension
        && !path.components().any(|c| match c {
            Component::Normal(name) => IGNORED_DIRS.iter().any(|d| name == *d),
            _ => false,
        })
}

/// Watcher state for debouncing
pub(crate) struct WatcherState {
    pub(crate) pending_changes: HashSet<PathBuf>,
    pub(crate) last_change: Option<Instant>,
    debounce: Duration,
}

impl WatcherState {
    pub(crate) fn new(debounce_ms: u64) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce: Duration::from_millis(debounce_ms),
        }
    }

    pub(crate) fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    pub(crate) fn should_flush(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= self.debounce
        } else {
            false
        }
    }

    /// Pending paths in sorted order.
    pub(crate) fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }
}
