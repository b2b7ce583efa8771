//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OnSaveError, OnSaveResult};

use super::types::{normalize_out_ext, CompileConfig, PROJECT_CONFIG_FILE};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

/// Configuration plus its origin and any warnings found while parsing
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: CompileConfig,
    pub source: ConfigSource,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> OnSaveResult<(CompileConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

pub(crate) fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> OnSaveResult<(CompileConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: CompileConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| OnSaveError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env overrides.
///
/// Unlike a missing file, a malformed one is an error: the caller reports it
/// and skips the save event.
pub fn load_for_workspace(workspace_root: &Path) -> OnSaveResult<LoadedConfig> {
    load_from(workspace_root, user_config_dir().as_deref())
}

pub(crate) fn load_from(
    workspace_root: &Path,
    user_dir: Option<&Path>,
) -> OnSaveResult<LoadedConfig> {
    let project_config = workspace_root.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        let (config, warnings) = load_with_warnings(&project_config)?;
        return Ok(LoadedConfig {
            config: with_env_overrides(config),
            source: ConfigSource::Project(project_config),
            warnings,
        });
    }

    if let Some(dir) = user_dir {
        let user_config = dir.join("onsave/config.toml");
        if user_config.is_file() {
            let (config, warnings) = load_with_warnings(&user_config)?;
            return Ok(LoadedConfig {
                config: with_env_overrides(config),
                source: ConfigSource::User(user_config),
                warnings,
            });
        }
    }

    Ok(LoadedConfig {
        config: with_env_overrides(CompileConfig::default()),
        source: ConfigSource::Defaults,
        warnings: Vec::new(),
    })
}

/// Apply environment variable overrides (ONSAVE_* prefix)
fn with_env_overrides(config: CompileConfig) -> CompileConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(
    mut config: CompileConfig,
    var: impl Fn(&str) -> Option<String>,
) -> CompileConfig {
    // ONSAVE_INCLUDE (comma-separated)
    if let Some(include) = var("ONSAVE_INCLUDE") {
        config.include = include
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(src_dir) = var("ONSAVE_SRC_DIR") {
        config.src_dir = src_dir;
    }

    if let Some(out_dir) = var("ONSAVE_OUT_DIR") {
        config.out_dir = out_dir;
    }

    if let Some(out_ext) = var("ONSAVE_OUT_EXT") {
        config.out_ext = normalize_out_ext(&out_ext);
    }

    if let Some(val) = var("ONSAVE_EMIT_DECLARATION") {
        config.emit_ts_declaration = val.to_lowercase() != "false" && val != "0";
    }

    config
}

/// Template written by `onsave init`
pub fn default_config_template() -> &'static str {
    r#"# onsave configuration
# Globs are relative to the workspace root.
include = ["src/**/*.{js,jsx,ts,tsx}"]
srcDir = "src"
outDir = "lib"
outExt = ".js"
emitTSDeclaration = false
emitTSDeclarationMap = true

[transpiler]
command = "npx"
args = ["--no-install", "babel", "{file}", "--out-file", "{outFile}", "--source-maps", "--source-file-name", "{sourceFileName}"]

[declaration]
command = "npx"
args = ["--no-install", "tsc"]
"#
}

/// User config directory (XDG first, then the platform default)
fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "include",
        "srcDir",
        "outDir",
        "outExt",
        "emitTSDeclaration",
        "emitTSDeclarationMap",
        "transpiler",
        "declaration",
        "command",
        "args",
        "watch",
        "debounceMs",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(&unknown.to_lowercase(), &candidate.to_lowercase());
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
