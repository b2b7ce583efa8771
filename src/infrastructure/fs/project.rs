//! Project root discovery
//!
//! Compilers resolve their own config (`.babelrc`, `tsconfig.json`) and
//! `node_modules` relative to the package a file belongs to, so they run from
//! the nearest directory holding a `package.json`.

use std::path::{Path, PathBuf};

/// Walk up from `start_dir` to the nearest directory containing `package.json`.
///
/// Stops at `workspace_root` or the filesystem root, returning where it
/// stopped even if no manifest was found there.
pub fn find_project_root(start_dir: &Path, workspace_root: &Path) -> PathBuf {
    let mut step = start_dir;
    loop {
        if step.join("package.json").is_file() || step == workspace_root {
            return step.to_path_buf();
        }
        match step.parent() {
            Some(parent) => step = parent,
            None => return step.to_path_buf(),
        }
    }
}

/// Nearest file named `file_name` in `start_dir` or any ancestor.
pub fn find_up(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}
