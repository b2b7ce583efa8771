//! Include filter value object
//!
//! Decides whether a saved file qualifies for compilation. Patterns are
//! workspace-relative globs; they are re-rooted under the workspace root and
//! matched against the absolute, forward-slash normalized file path.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{OnSaveError, OnSaveResult};

/// Suffix of type declaration files, which are never compiled.
pub(crate) const DECLARATION_SUFFIX: &str = ".d.ts";

/// Why a file was (or was not) selected for compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// File matches an include pattern and is not a declaration file
    Compile,
    /// No include pattern matches the file
    NotIncluded,
    /// File is a `.d.ts` declaration file
    Declaration,
}

impl FilterDecision {
    pub fn is_compile(self) -> bool {
        self == FilterDecision::Compile
    }
}

/// Compiled set of include globs for one workspace.
#[derive(Debug, Clone)]
pub struct IncludeFilter {
    matcher: GlobSet,
    expanded: Vec<String>,
}

impl IncludeFilter {
    /// Compile `patterns` relative to `workspace_root`.
    ///
    /// Returns `InvalidPattern` for the first glob that does not compile.
    pub fn new<S: AsRef<str>>(workspace_root: &Path, patterns: &[S]) -> OnSaveResult<Self> {
        let root = to_slash(&workspace_root.to_string_lossy());
        // The root is literal text; only the user's pattern carries glob syntax
        let root = globset::escape(root.trim_end_matches('/'));

        let mut builder = GlobSetBuilder::new();
        let mut expanded = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = to_slash(pattern.as_ref());
            let absolute = format!("{}/{}", root, pattern);
            // `*` stays within one segment, only `**` crosses directories
            let glob = GlobBuilder::new(&absolute)
                .literal_separator(true)
                .build()
                .map_err(|e| OnSaveError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.kind().to_string(),
                })?;
            builder.add(glob);
            expanded.push(absolute);
        }

        let matcher = builder.build().map_err(|e| OnSaveError::InvalidPattern {
            pattern: expanded.join(";"),
            message: e.to_string(),
        })?;

        Ok(Self { matcher, expanded })
    }

    /// Classify an absolute file path.
    pub fn decide(&self, file_path: &Path) -> FilterDecision {
        let candidate = to_slash(&file_path.to_string_lossy());

        if candidate.ends_with(DECLARATION_SUFFIX) {
            return FilterDecision::Declaration;
        }

        if self.matcher.is_match(candidate.as_str()) {
            FilterDecision::Compile
        } else {
            FilterDecision::NotIncluded
        }
    }

    /// The absolute globs the filter matches against.
    pub fn expanded_patterns(&self) -> &[String] {
        &self.expanded
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Returns true iff `file_path` should be compiled for the given patterns.
pub fn should_compile<S: AsRef<str>>(
    file_path: &Path,
    workspace_root: &Path,
    include_patterns: &[S],
) -> OnSaveResult<bool> {
    let filter = IncludeFilter::new(workspace_root, include_patterns)?;
    Ok(filter.decide(file_path).is_compile())
}

/// Replace Windows separators with forward slashes.
pub(crate) fn to_slash(s: &str) -> String {
    s.replace('\\', "/")
}
