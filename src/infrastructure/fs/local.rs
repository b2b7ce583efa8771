//! Local File System Implementation
//!
//! Writes compiled output next to (or away from) the sources.

use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::domain::ports::Transpiled;
use crate::domain::value_objects::ResolvedOutput;
use crate::error::{OnSaveError, OnSaveResult};

/// Local file system writer
///
/// Provides atomic writes and creates missing output directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    /// Write content to a file atomically (tempfile in the same dir + rename).
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> OnSaveResult<()> {
        let parent = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| OnSaveError::Io(e.error))?;
        Ok(())
    }

    /// Write transpiled code (and its map, if any) to `output`.
    ///
    /// A `sourceMappingURL` comment pointing at the map file is appended
    /// unless the code already carries one.
    pub fn write_output(&self, output: &ResolvedOutput, transpiled: &Transpiled) -> OnSaveResult<()> {
        let mut code = transpiled.code.clone();

        if let Some(map) = &transpiled.map {
            if !has_source_mapping_url(&code) {
                code.push_str("\n//# sourceMappingURL=");
                code.push_str(&output.map_file_name());
            }
            self.write_atomic(&output.map_path, map.as_bytes())?;
        }

        self.write_atomic(&output.code_path, code.as_bytes())
    }

    /// SHA-256 of a file's content, `sha256:`-prefixed.
    pub fn hash(&self, path: &Path) -> OnSaveResult<String> {
        let content = std::fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&content);
        Ok(format!("sha256:{:x}", hasher.finalize()))
    }
}

/// True when some line is a `//# sourceMappingURL` comment.
fn has_source_mapping_url(code: &str) -> bool {
    code.lines().any(|line| {
        line.trim_start()
            .strip_prefix("//#")
            .map(|rest| rest.trim_start().starts_with("sourceMappingURL"))
            .unwrap_or(false)
    })
}
