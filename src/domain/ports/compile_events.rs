//! Compile Event Port
//!
//! Provides an observable interface for save handling and compilation.
//! Enables console progress, NDJSON event streams, and debugging.

use std::path::PathBuf;

use serde::Serialize;

/// Why a saved file was not compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Not under the workspace root
    OutsideWorkspace,
    /// No `include` pattern matches
    NotIncluded,
    /// `.d.ts` files are never compiled
    Declaration,
    /// Configuration could not be loaded or a glob is malformed
    ConfigError,
}

/// Event emitted while handling saves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CompileEvent {
    WatchStarted {
        workspace: PathBuf,
    },

    /// Save was not dispatched
    FileSkipped {
        file: PathBuf,
        reason: SkipReason,
        detail: String,
    },

    /// Save dispatched to the worker
    CompileStarted {
        file: PathBuf,
        output: PathBuf,
    },

    TranspileFinished {
        file: PathBuf,
        output: PathBuf,
        elapsed_ms: u64,
    },

    TranspileFailed {
        file: PathBuf,
        error: String,
    },

    DeclarationFinished {
        file: PathBuf,
        elapsed_ms: u64,
    },

    DeclarationSkipped {
        file: PathBuf,
        reason: String,
    },

    DeclarationFailed {
        file: PathBuf,
        error: String,
    },

    /// Unknown key in a config file
    ConfigWarning {
        file: PathBuf,
        key: String,
        line: Option<usize>,
        suggestion: Option<String>,
    },

    Shutdown,
}

impl CompileEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Events only shown at higher verbosity in the console
    pub fn is_detail(&self) -> bool {
        matches!(
            self,
            CompileEvent::FileSkipped {
                reason: SkipReason::NotIncluded | SkipReason::OutsideWorkspace,
                ..
            } | CompileEvent::DeclarationSkipped { .. }
        )
    }
}

/// Trait for receiving compile events
///
/// Implementations:
/// - `ConsoleSink`: human-readable lines
/// - `JsonSink`: NDJSON event stream
/// - `RecordingSink` (tests): captured events
pub trait CompileEventSink: Send + Sync {
    fn on_event(&self, event: CompileEvent);
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::default();

        sink.on_event(CompileEvent::WatchStarted {
            workspace: PathBuf::from("/ws"),
        });
        sink.on_event(CompileEvent::Shutdown);

        assert_eq!(sink.snapshot().len(), 2);
    }

    #[test]
    fn event_json_is_tagged() {
        let event = CompileEvent::FileSkipped {
            file: PathBuf::from("/ws/a.d.ts"),
            reason: SkipReason::Declaration,
            detail: "declaration files are never compiled".to_string(),
        };
        let json = event.to_json();
        assert!(json.contains("\"event\":\"file_skipped\""));
        assert!(json.contains("\"reason\":\"declaration\""));
    }

    #[test]
    fn timing_event_serializes_elapsed() {
        let event = CompileEvent::TranspileFinished {
            file: PathBuf::from("/ws/src/a.ts"),
            output: PathBuf::from("/ws/lib/a.js"),
            elapsed_ms: 42,
        };
        insta::assert_snapshot!(
            event.to_json(),
            @r#"{"event":"transpile_finished","file":"/ws/src/a.ts","output":"/ws/lib/a.js","elapsed_ms":42}"#
        );
    }

    #[test]
    fn skip_for_missing_match_is_detail() {
        let event = CompileEvent::FileSkipped {
            file: PathBuf::from("/ws/b.ts"),
            reason: SkipReason::NotIncluded,
            detail: String::new(),
        };
        assert!(event.is_detail());
        assert!(!CompileEvent::Shutdown.is_detail());
    }
}
