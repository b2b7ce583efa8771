//! Save session
//!
//! The explicit context for one activation: the workspace it serves, the
//! compile worker and the event sink. Created when watching (or a one-shot
//! compile) starts and shut down when it ends; nothing lives in globals.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{CompileConfig, LoadedConfig};
use crate::domain::entities::CompileRequest;
use crate::domain::ports::{CompileEvent, CompileEventSink, SkipReason};
use crate::domain::value_objects::{normalize, FilterDecision};
use crate::error::{OnSaveError, OnSaveResult};
use crate::infrastructure::fs::find_project_root;

use super::worker::{CompileMessage, CompileTicket, CompileWorker, Toolchain};

/// What happened to a save event
pub enum SaveOutcome {
    /// Handed to the worker
    Dispatched(CompileTicket),
    Skipped(SkipReason),
}

impl SaveOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, SaveOutcome::Dispatched(_))
    }
}

impl std::fmt::Debug for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveOutcome::Dispatched(_) => write!(f, "Dispatched"),
            SaveOutcome::Skipped(reason) => write!(f, "Skipped({:?})", reason),
        }
    }
}

pub struct SaveSession {
    workspace_root: PathBuf,
    worker: CompileWorker,
    sink: Arc<dyn CompileEventSink>,
    /// Outputs of dispatched compiles whose write the watcher has not seen yet
    outputs: Mutex<HashSet<PathBuf>>,
}

impl SaveSession {
    /// Activate with process-backed compilers.
    pub fn start(workspace_root: &Path, sink: Arc<dyn CompileEventSink>) -> OnSaveResult<Self> {
        let worker = CompileWorker::spawn(sink.clone())?;
        Ok(Self::with_worker(workspace_root, worker, sink))
    }

    pub fn with_toolchain<T>(
        workspace_root: &Path,
        toolchain: T,
        sink: Arc<dyn CompileEventSink>,
    ) -> OnSaveResult<Self>
    where
        T: Toolchain + 'static,
    {
        let worker = CompileWorker::with_toolchain(toolchain, sink.clone())?;
        Ok(Self::with_worker(workspace_root, worker, sink))
    }

    fn with_worker(workspace_root: &Path, worker: CompileWorker, sink: Arc<dyn CompileEventSink>) -> Self {
        Self {
            workspace_root: normalize(workspace_root),
            worker,
            sink,
            outputs: Mutex::new(HashSet::new()),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn sink(&self) -> &Arc<dyn CompileEventSink> {
        &self.sink
    }

    /// Handle one save: filter, resolve, dispatch.
    ///
    /// Configuration is loaded fresh on every call.
    pub fn on_save(&self, file: &Path) -> OnSaveResult<SaveOutcome> {
        let file = normalize(file);

        if !file.starts_with(&self.workspace_root) {
            return Ok(self.skip(&file, SkipReason::OutsideWorkspace, "not under the workspace root"));
        }

        let loaded = match CompileConfig::load_for_workspace(&self.workspace_root) {
            Ok(loaded) => loaded,
            Err(e) => return Ok(self.skip(&file, SkipReason::ConfigError, &e.to_string())),
        };
        self.report_warnings(&loaded);

        self.on_save_with_config(&file, loaded.config)
    }

    /// Same as [`on_save`](Self::on_save) with an already loaded config.
    pub fn on_save_with_config(&self, file: &Path, config: CompileConfig) -> OnSaveResult<SaveOutcome> {
        let request = match CompileRequest::new(file, self.workspace_root.clone(), config) {
            Ok(request) => request,
            Err(OnSaveError::OutsideWorkspace { .. }) => {
                return Ok(self.skip(file, SkipReason::OutsideWorkspace, "not under the workspace root"));
            }
            Err(e) => return Err(e),
        };

        let filter = match request.include_filter() {
            Ok(filter) => filter,
            Err(e) => return Ok(self.skip(file, SkipReason::ConfigError, &e.to_string())),
        };

        match filter.decide(request.source()) {
            FilterDecision::Compile => {}
            FilterDecision::NotIncluded => {
                let detail = format!("include = [{}]", filter.expanded_patterns().join(";"));
                return Ok(self.skip(file, SkipReason::NotIncluded, &detail));
            }
            FilterDecision::Declaration => {
                return Ok(self.skip(
                    file,
                    SkipReason::Declaration,
                    "declaration files are never compiled",
                ));
            }
        }

        let output = request.resolve();
        let start_dir = file.parent().unwrap_or(self.workspace_root.as_path());
        let project_root = find_project_root(start_dir, &self.workspace_root);

        self.remember_output(&output.code_path);
        self.sink.on_event(CompileEvent::CompileStarted {
            file: file.to_path_buf(),
            output: output.code_path.clone(),
        });

        let config = request.config;
        let ticket = self.worker.dispatch(CompileMessage {
            file: file.to_path_buf(),
            output,
            project_root,
            compile_declaration: config.emit_ts_declaration,
            emit_declaration_map: config.emit_ts_declaration_map,
            transpiler: config.transpiler,
            declaration: config.declaration,
        })?;

        Ok(SaveOutcome::Dispatched(ticket))
    }

    /// Consume the mark left by a dispatched compile for `path`.
    ///
    /// True once per output write; later writes to the same path are saves
    /// like any other.
    pub fn take_own_output(&self, path: &Path) -> bool {
        self.outputs
            .lock()
            .map(|mut outputs| outputs.remove(path))
            .unwrap_or(false)
    }

    /// Deactivate: finish queued compiles and stop the worker.
    pub fn shutdown(&mut self) {
        self.worker.shutdown();
    }

    /// Only the code file is marked; maps are never watched documents.
    fn remember_output(&self, code: &Path) {
        if let Ok(mut outputs) = self.outputs.lock() {
            outputs.insert(code.to_path_buf());
        }
    }

    fn report_warnings(&self, loaded: &LoadedConfig) {
        for warning in &loaded.warnings {
            self.sink.on_event(CompileEvent::ConfigWarning {
                file: warning.file.clone(),
                key: warning.key.clone(),
                line: warning.line,
                suggestion: warning.suggestion.clone(),
            });
        }
    }

    fn skip(&self, file: &Path, reason: SkipReason, detail: &str) -> SaveOutcome {
        self.sink.on_event(CompileEvent::FileSkipped {
            file: file.to_path_buf(),
            reason,
            detail: detail.to_string(),
        });
        SaveOutcome::Skipped(reason)
    }
}
