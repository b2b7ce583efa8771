//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::OutputLayout;
use crate::error::OnSaveResult;

use super::loader::{self, ConfigWarning};

/// Project config file name, looked up in the workspace root
pub const PROJECT_CONFIG_FILE: &str = ".onsave.toml";

/// External transpiler invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    #[serde(default = "default_transpiler_command")]
    pub command: String,

    #[serde(default = "default_transpiler_args")]
    pub args: Vec<String>,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            command: default_transpiler_command(),
            args: default_transpiler_args(),
        }
    }
}

fn default_transpiler_command() -> String {
    "npx".to_string()
}

fn default_transpiler_args() -> Vec<String> {
    [
        "--no-install",
        "babel",
        "{file}",
        "--out-file",
        "{outFile}",
        "--source-maps",
        "--source-file-name",
        "{sourceFileName}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Type declaration emitter invocation
///
/// The emitter is given `-p <tsconfig>` after `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationConfig {
    #[serde(default = "default_declaration_command")]
    pub command: String,

    #[serde(default = "default_declaration_args")]
    pub args: Vec<String>,
}

impl Default for DeclarationConfig {
    fn default() -> Self {
        Self {
            command: default_declaration_command(),
            args: default_declaration_args(),
        }
    }
}

fn default_declaration_command() -> String {
    "npx".to_string()
}

fn default_declaration_args() -> Vec<String> {
    vec!["--no-install".to_string(), "tsc".to_string()]
}

/// Watch mode configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms", alias = "debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    100
}

/// Compile-on-save configuration
///
/// Read fresh for every save event; never cached between events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileConfig {
    /// Workspace-relative globs selecting eligible files
    #[serde(default)]
    pub include: Vec<String>,

    /// Relative root stripped before re-rooting
    #[serde(default, alias = "src_dir")]
    pub src_dir: String,

    /// Relative root under which output is placed
    #[serde(default, alias = "out_dir")]
    pub out_dir: String,

    /// Output file extension, including the leading dot
    #[serde(
        default = "default_out_ext",
        alias = "out_ext",
        deserialize_with = "deserialize_out_ext"
    )]
    pub out_ext: String,

    #[serde(default, rename = "emitTSDeclaration", alias = "emit_ts_declaration")]
    pub emit_ts_declaration: bool,

    #[serde(
        default = "default_true",
        rename = "emitTSDeclarationMap",
        alias = "emit_ts_declaration_map"
    )]
    pub emit_ts_declaration_map: bool,

    #[serde(default)]
    pub transpiler: TranspilerConfig,

    #[serde(default)]
    pub declaration: DeclarationConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            src_dir: String::new(),
            out_dir: String::new(),
            out_ext: default_out_ext(),
            emit_ts_declaration: false,
            emit_ts_declaration_map: true,
            transpiler: TranspilerConfig::default(),
            declaration: DeclarationConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

fn default_out_ext() -> String {
    ".js".to_string()
}

fn default_true() -> bool {
    true
}

fn deserialize_out_ext<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_out_ext(&raw))
}

/// Coerce an extension to carry exactly one leading dot (`js` -> `.js`).
pub fn normalize_out_ext(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

impl CompileConfig {
    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> OnSaveResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_for_workspace(workspace_root: &Path) -> OnSaveResult<super::LoadedConfig> {
        loader::load_for_workspace(workspace_root)
    }

    /// The subset of options the path resolver needs
    pub fn layout(&self) -> OutputLayout<'_> {
        OutputLayout {
            src_dir: &self.src_dir,
            out_dir: &self.out_dir,
            out_ext: &self.out_ext,
        }
    }
}
