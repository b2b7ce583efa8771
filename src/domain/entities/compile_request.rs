//! Compile request entity
//!
//! One save event: the saved file, the workspace it belongs to, and the
//! configuration read for this event.

use std::path::{Path, PathBuf};

use crate::config::CompileConfig;
use crate::domain::value_objects::{
    normalize, resolve_output_path, FilterDecision, IncludeFilter, ResolvedOutput,
};
use crate::error::{OnSaveError, OnSaveResult};

#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub source_file_path: PathBuf,
    pub workspace_root: PathBuf,
    pub config: CompileConfig,
}

impl CompileRequest {
    /// Build a request; `source_file_path` must live under `workspace_root`.
    pub fn new(
        source_file_path: impl Into<PathBuf>,
        workspace_root: impl Into<PathBuf>,
        config: CompileConfig,
    ) -> OnSaveResult<Self> {
        let source_file_path = source_file_path.into();
        let workspace_root = workspace_root.into();

        if !normalize(&source_file_path).starts_with(normalize(&workspace_root)) {
            return Err(OnSaveError::OutsideWorkspace {
                path: source_file_path,
                root: workspace_root,
            });
        }

        Ok(Self {
            source_file_path,
            workspace_root,
            config,
        })
    }

    /// Compile the include globs of this request's config.
    pub fn include_filter(&self) -> OnSaveResult<IncludeFilter> {
        IncludeFilter::new(&self.workspace_root, &self.config.include)
    }

    pub fn decide(&self) -> OnSaveResult<FilterDecision> {
        Ok(self.include_filter()?.decide(&self.source_file_path))
    }

    pub fn resolve(&self) -> ResolvedOutput {
        resolve_output_path(
            &self.source_file_path,
            &self.workspace_root,
            self.config.layout(),
        )
    }

    pub fn source(&self) -> &Path {
        &self.source_file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CompileConfig {
        CompileConfig {
            include: vec!["src/**/*.ts".to_string()],
            src_dir: "src".to_string(),
            out_dir: "lib".to_string(),
            ..CompileConfig::default()
        }
    }

    #[test]
    fn request_outside_workspace_is_rejected() {
        let err = CompileRequest::new("/elsewhere/a.ts", "/ws", config()).unwrap_err();
        assert!(matches!(err, OnSaveError::OutsideWorkspace { .. }));
    }

    #[test]
    fn request_decides_and_resolves() {
        let request = CompileRequest::new("/ws/src/a/b.ts", "/ws", config()).unwrap();
        assert_eq!(request.decide().unwrap(), FilterDecision::Compile);
        assert_eq!(request.resolve().code_path, PathBuf::from("/ws/lib/a/b.js"));
    }

    #[test]
    fn sibling_prefix_is_not_inside_workspace() {
        assert!(CompileRequest::new("/ws2/src/a.ts", "/ws", config()).is_err());
    }
}
