//! Watch loop: notify events to save handling

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::SaveSession;
use crate::domain::ports::CompileEvent;
use crate::domain::value_objects::normalize;
use crate::error::OnSaveResult;
use crate::infrastructure::fs::LocalFs;

use super::event::{is_document, WatchOptions, WatcherState};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STARTUP_COOLDOWN: Duration = Duration::from_millis(500);

/// Watch the workspace and hand every saved document to `session`.
///
/// Returns once `running` is cleared. Compiles run on the session's worker,
/// so a slow transpiler never stalls event collection.
pub fn watch(options: WatchOptions, running: Arc<AtomicBool>, session: &SaveSession) -> OnSaveResult<()> {
    let sink = session.sink().clone();
    sink.on_event(CompileEvent::WatchStarted {
        workspace: session.workspace_root().to_path_buf(),
    });

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if event.kind.is_create() || event.kind.is_modify() {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            }
        },
        Config::default(),
    )?;
    watcher.watch(&options.workspace_root, RecursiveMode::Recursive)?;

    let fs = LocalFs::new();
    let mut state = WatcherState::new(options.debounce_ms);
    let mut fingerprints: HashMap<PathBuf, Fingerprint> = HashMap::new();

    // notify sometimes reports existing files right after registration
    let cooldown_end = Instant::now() + STARTUP_COOLDOWN;
    while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
        let _ = rx.recv_timeout(POLL_INTERVAL);
    }

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(POLL_INTERVAL) {
            if let Some(path) = accept_change(&path, session, &fs, &mut fingerprints) {
                state.add_change(path);
            }
        }

        if state.should_flush() {
            for path in state.take_changes() {
                session.on_save(&path)?;
            }
        }
    }

    sink.on_event(CompileEvent::Shutdown);
    Ok(())
}

/// Content hash plus modification time of a file.
///
/// A re-save of unchanged content bumps the mtime and still counts; repeated
/// notifications for one write share both and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fingerprint {
    hash: String,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    fn read(fs: &LocalFs, path: &Path) -> Option<Self> {
        let hash = fs.hash(path).ok()?;
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        Some(Self { hash, modified })
    }
}

/// Filter one raw notification down to a save worth handling.
///
/// Rejects non-documents, unreadable files, repeated notifications for the
/// same write, and the write that produced one of the session's outputs.
pub(crate) fn accept_change(
    path: &Path,
    session: &SaveSession,
    fs: &LocalFs,
    fingerprints: &mut HashMap<PathBuf, Fingerprint>,
) -> Option<PathBuf> {
    if !is_document(path) {
        return None;
    }

    let path = normalize(path);
    let fingerprint = Fingerprint::read(fs, &path)?;
    if fingerprints.get(&path) == Some(&fingerprint) {
        return None;
    }
    fingerprints.insert(path.clone(), fingerprint);

    if session.take_own_output(&path) {
        return None;
    }

    Some(path)
}
