//! Error types for onsave
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for onsave operations
pub type OnSaveResult<T> = Result<T, OnSaveError>;

/// Main error type for onsave operations
#[derive(Error, Debug)]
pub enum OnSaveError {
    /// An `include` glob could not be compiled
    #[error("invalid include pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher could not be set up
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Saved file does not live under the workspace root
    #[error("'{path}' is outside workspace '{root}'")]
    OutsideWorkspace { path: PathBuf, root: PathBuf },

    /// External compiler binary could not be started
    #[error("unable to start {tool} ('{command}'): {message}")]
    ToolNotFound {
        tool: &'static str,
        command: String,
        message: String,
    },

    /// External compiler exited with a failure status
    #[error("{tool} failed for {file}: {message}")]
    ToolFailed {
        tool: &'static str,
        file: PathBuf,
        message: String,
    },

    /// The background compile worker is gone
    #[error("compile worker is not running")]
    WorkerStopped,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_invalid_pattern() {
        let err = OnSaveError::InvalidPattern {
            pattern: "src/[".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid include pattern 'src/[': unclosed character class"
        );
    }

    #[test]
    fn test_error_display_tool_failed() {
        let err = OnSaveError::ToolFailed {
            tool: "transpiler",
            file: PathBuf::from("src/a.ts"),
            message: "exit status 1".to_string(),
        };
        assert_eq!(err.to_string(), "transpiler failed for src/a.ts: exit status 1");
    }
}
