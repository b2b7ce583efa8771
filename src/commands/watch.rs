use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use onsave::application::SaveSession;
use onsave::config::CompileConfig;
use onsave::watcher::{watch, WatchOptions, DEFAULT_DEBOUNCE_MS};

pub fn cmd_watch(workspace: &Path, json: bool, verbose: u8) -> Result<()> {
    // Only the debounce is read up front; everything else is re-read per save
    let debounce_ms = CompileConfig::load_for_workspace(workspace)
        .map(|loaded| loaded.config.watch.debounce_ms)
        .unwrap_or(DEFAULT_DEBOUNCE_MS);
    let options = WatchOptions::new(workspace).with_debounce_ms(debounce_ms);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let sink = crate::ui::event_sink(json, verbose);
    let mut session = SaveSession::start(workspace, sink)?;

    let result = watch(options, running, &session);
    session.shutdown();
    result?;

    Ok(())
}
