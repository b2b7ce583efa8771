//! onsave - compile-on-save for JavaScript and TypeScript
//!
//! When a file is saved inside a workspace, onsave decides from the
//! workspace's include globs whether it should be compiled, maps it from
//! `srcDir` to `outDir`, and hands it to a background worker that runs the
//! transpiler (and optionally the declaration emitter).

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod watcher;

// Re-exports for convenience
pub use application::{CompileReport, CompileWorker, SaveOutcome, SaveSession};
pub use config::{CompileConfig, ConfigWarning, LoadedConfig};
pub use domain::entities::CompileRequest;
pub use domain::ports::{CompileEvent, CompileEventSink, SkipReason};
pub use domain::value_objects::{
    resolve_output_path, should_compile, FilterDecision, IncludeFilter, OutputLayout,
    ResolvedOutput,
};
pub use error::{OnSaveError, OnSaveResult};
pub use watcher::{watch, WatchOptions};
