//! Compiler ports
//!
//! The transpiler and the declaration emitter are external tools. The domain
//! only knows these traits; `infrastructure::compilers` drives the real
//! processes and tests substitute in-memory fakes.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ResolvedOutput;
use crate::error::OnSaveResult;

/// One file to transpile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileJob {
    /// Absolute path of the saved source file
    pub source: PathBuf,
    /// Where the result will be written
    pub output: ResolvedOutput,
    /// Source path as referenced from the output directory (for the map)
    pub source_file_name: String,
    /// Nearest directory with a `package.json`; compilers run from here
    pub project_root: PathBuf,
}

impl TranspileJob {
    pub fn new(source: PathBuf, output: ResolvedOutput, project_root: PathBuf) -> Self {
        let source_file_name = source_file_name(&source, &output.code_path);
        Self {
            source,
            output,
            source_file_name,
            project_root,
        }
    }
}

/// Transformed code and an optional source map (JSON text)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transpiled {
    pub code: String,
    pub map: Option<String>,
}

/// One file to emit type declarations for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationJob {
    pub source: PathBuf,
    pub emit_map: bool,
    pub project_root: PathBuf,
}

/// What the declaration emitter did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationOutcome {
    Emitted,
    /// Nothing to do (not a TypeScript file, or no tsconfig.json found)
    Skipped { reason: String },
}

/// Source-to-JS transpiler (Babel by default)
pub trait Transpiler: Send {
    fn transpile(&self, job: &TranspileJob) -> OnSaveResult<Transpiled>;
}

/// `.d.ts` emitter (tsc by default); writes its files itself
pub trait DeclarationEmitter: Send {
    fn emit(&self, job: &DeclarationJob) -> OnSaveResult<DeclarationOutcome>;
}

/// Path of `source` relative to the directory `code_path` lives in.
///
/// Always uses forward slashes since it ends up inside a source map.
pub fn source_file_name(source: &Path, code_path: &Path) -> String {
    let out_dir = code_path.parent().unwrap_or(Path::new(""));
    let relative = pathdiff::diff_paths(source, out_dir).unwrap_or_else(|| source.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_name_is_relative_to_output_dir() {
        assert_eq!(
            source_file_name(Path::new("/ws/src/a/b.ts"), Path::new("/ws/lib/a/b.js")),
            "../../src/a/b.ts"
        );
        assert_eq!(
            source_file_name(Path::new("/ws/x.ts"), Path::new("/ws/x.mjs")),
            "x.ts"
        );
    }
}
