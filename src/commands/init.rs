//! Init command - write a starter `.onsave.toml`

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use onsave::config::{default_config_template, PROJECT_CONFIG_FILE};

#[derive(Debug, Serialize)]
struct InitEvent<'a> {
    event: &'static str,
    path: &'a Path,
    overwritten: bool,
}

pub fn cmd_init(workspace: &Path, force: bool, json: bool) -> Result<()> {
    let path = workspace.join(PROJECT_CONFIG_FILE);
    let exists = path.exists();

    if exists && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::create_dir_all(workspace)
        .with_context(|| format!("cannot create {}", workspace.display()))?;
    fs::write(&path, default_config_template())
        .with_context(|| format!("cannot write {}", path.display()))?;

    if json {
        crate::ui::json::emit(&InitEvent {
            event: "init",
            path: &path,
            overwritten: exists,
        })?;
    } else {
        println!("✓ Created {}", path.display());
        println!("  Edit include, srcDir and outDir, then run 'onsave watch'.");
    }

    Ok(())
}
