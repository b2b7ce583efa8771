//! Output path resolution
//!
//! Re-roots a saved file from `srcDir` to `outDir` and swaps its extension.
//! Purely lexical: the filesystem is never consulted.

use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// Layout options that drive resolution (a subset of the compile config).
#[derive(Debug, Clone, Copy)]
pub struct OutputLayout<'a> {
    pub src_dir: &'a str,
    pub out_dir: &'a str,
    pub out_ext: &'a str,
}

/// Where the compiled code and its source map go.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedOutput {
    pub code_path: PathBuf,
    pub map_path: PathBuf,
}

impl ResolvedOutput {
    fn from_code_path(code_path: PathBuf) -> Self {
        let mut map = code_path.clone().into_os_string();
        map.push(".map");
        Self {
            code_path,
            map_path: PathBuf::from(map),
        }
    }

    /// File name of the source map, as referenced from the code file.
    pub fn map_file_name(&self) -> String {
        self.map_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for ResolvedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_path.display())
    }
}

/// Compute the output paths for `file_path`.
///
/// A file outside `srcDir` yields a path that climbs out of `outDir` via
/// `..` segments; this is accepted, not rejected.
pub fn resolve_output_path(
    file_path: &Path,
    workspace_root: &Path,
    layout: OutputLayout<'_>,
) -> ResolvedOutput {
    let file = normalize(file_path);
    // srcDir is always appended to the root, even with a leading separator
    let src_dir = layout.src_dir.trim_start_matches(|c| c == '/' || c == '\\');
    let src_root = normalize(&workspace_root.join(src_dir));

    // Only fails when one side is relative and the other absolute
    let relative_from_src = pathdiff::diff_paths(&file, &src_root).unwrap_or_else(|| file.clone());

    let out_base = normalize(
        &workspace_root
            .join(layout.out_dir)
            .join(relative_from_src),
    );

    ResolvedOutput::from_code_path(replace_extension(&out_base, layout.out_ext))
}

/// Swap the last extension of `path` for `ext` (which carries its own dot).
fn replace_extension(path: &Path, ext: &str) -> PathBuf {
    match (path.parent(), path.file_stem()) {
        (Some(parent), Some(stem)) => {
            let mut name = OsString::from(stem);
            name.push(ext);
            parent.join(name)
        }
        _ => {
            let mut raw = path.as_os_str().to_owned();
            raw.push(ext);
            PathBuf::from(raw)
        }
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` directly under the root is dropped; leading `..` of a relative path
/// is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}
