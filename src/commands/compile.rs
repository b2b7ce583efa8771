//! Compile command - run the save flow once for explicit files

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use onsave::application::{SaveOutcome, SaveSession};
use onsave::domain::ports::SkipReason;

use super::absolute;

pub fn cmd_compile(workspace: &Path, files: &[PathBuf], json: bool, verbose: u8) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let sink = crate::ui::event_sink(json, verbose);
    let mut session = SaveSession::start(workspace, sink)?;

    let mut tickets = Vec::new();
    let mut failed = 0usize;

    for file in files {
        match session.on_save(&absolute(&cwd, file))? {
            SaveOutcome::Dispatched(ticket) => tickets.push(ticket),
            SaveOutcome::Skipped(SkipReason::ConfigError) => failed += 1,
            SaveOutcome::Skipped(_) => {}
        }
    }

    for ticket in tickets {
        if !ticket.wait()?.is_success() {
            failed += 1;
        }
    }

    session.shutdown();

    if failed > 0 {
        bail!("{} file(s) failed to compile", failed);
    }
    Ok(())
}
