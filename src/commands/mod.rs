//! Subcommand implementations

pub mod compile;
pub mod init;
pub mod resolve;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use onsave::domain::value_objects::normalize;

/// Absolute, normalized workspace root (`--workspace` or the current directory).
pub fn workspace_root(flag: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    Ok(match flag {
        Some(path) => absolute(&cwd, path),
        None => normalize(&cwd),
    })
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_base() {
        assert_eq!(
            absolute(Path::new("/ws"), Path::new("src/../src/a.ts")),
            PathBuf::from("/ws/src/a.ts")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        assert_eq!(absolute(Path::new("/ws"), Path::new("/other/a.ts")), PathBuf::from("/other/a.ts"));
    }
}
