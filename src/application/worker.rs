//! Background compile worker
//!
//! Compilation runs on a dedicated thread so a slow transpiler never blocks
//! the save handler. Requests travel over a channel; each carries its own
//! reply channel, giving request/response semantics per file.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crate::config::{DeclarationConfig, TranspilerConfig};
use crate::domain::ports::{
    CompileEvent, CompileEventSink, DeclarationEmitter, DeclarationJob, DeclarationOutcome,
    TranspileJob, Transpiler,
};
use crate::domain::value_objects::ResolvedOutput;
use crate::error::{OnSaveError, OnSaveResult};
use crate::infrastructure::compilers::{CommandTranspiler, TscDeclarationEmitter};
use crate::infrastructure::fs::LocalFs;

/// Everything the worker needs to compile one saved file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileMessage {
    pub file: PathBuf,
    pub output: ResolvedOutput,
    pub project_root: PathBuf,
    pub compile_declaration: bool,
    pub emit_declaration_map: bool,
    pub transpiler: TranspilerConfig,
    pub declaration: DeclarationConfig,
}

/// Outcome of one compiler step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done { elapsed_ms: u64 },
    Skipped { reason: String },
    Failed { error: String },
}

/// Result of a dispatched compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub file: PathBuf,
    pub output: ResolvedOutput,
    pub transpile: StepStatus,
    /// `None` when declarations were not requested or the transpile failed
    pub declaration: Option<StepStatus>,
}

impl CompileReport {
    /// True when the code file was written
    pub fn is_success(&self) -> bool {
        matches!(self.transpile, StepStatus::Done { .. })
    }
}

/// Builds compilers from per-event configuration.
///
/// The default builds process-backed compilers; tests plug in fakes.
pub trait Toolchain: Send {
    fn transpiler(&self, config: &TranspilerConfig) -> Box<dyn Transpiler>;
    fn declaration_emitter(&self, config: &DeclarationConfig) -> Box<dyn DeclarationEmitter>;
}

/// External Babel/tsc style processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolchain;

impl Toolchain for ProcessToolchain {
    fn transpiler(&self, config: &TranspilerConfig) -> Box<dyn Transpiler> {
        Box::new(CommandTranspiler::new(config))
    }

    fn declaration_emitter(&self, config: &DeclarationConfig) -> Box<dyn DeclarationEmitter> {
        Box::new(TscDeclarationEmitter::new(config))
    }
}

struct CompileRequestEnvelope {
    message: CompileMessage,
    reply: Sender<CompileReport>,
}

/// Handle to a dispatched compile
pub struct CompileTicket {
    reply: Receiver<CompileReport>,
}

impl CompileTicket {
    /// Block until the worker has finished this file.
    pub fn wait(self) -> OnSaveResult<CompileReport> {
        self.reply.recv().map_err(|_| OnSaveError::WorkerStopped)
    }
}

/// Single background thread that compiles files in dispatch order
pub struct CompileWorker {
    sender: Option<Sender<CompileRequestEnvelope>>,
    handle: Option<JoinHandle<()>>,
}

impl CompileWorker {
    /// Start the worker with process-backed compilers.
    pub fn spawn(sink: Arc<dyn CompileEventSink>) -> OnSaveResult<Self> {
        Self::with_toolchain(ProcessToolchain, sink)
    }

    pub fn with_toolchain<T>(toolchain: T, sink: Arc<dyn CompileEventSink>) -> OnSaveResult<Self>
    where
        T: Toolchain + 'static,
    {
        let (sender, receiver) = mpsc::channel::<CompileRequestEnvelope>();

        let handle = std::thread::Builder::new()
            .name("onsave-compile".to_string())
            .spawn(move || {
                let fs = LocalFs::new();
                for envelope in receiver {
                    let report = compile_file(&toolchain, &fs, sink.as_ref(), &envelope.message);
                    // Caller may have dropped its ticket
                    let _ = envelope.reply.send(report);
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queue a file for compilation.
    pub fn dispatch(&self, message: CompileMessage) -> OnSaveResult<CompileTicket> {
        let sender = self.sender.as_ref().ok_or(OnSaveError::WorkerStopped)?;
        let (reply, receiver) = mpsc::channel();
        sender
            .send(CompileRequestEnvelope { message, reply })
            .map_err(|_| OnSaveError::WorkerStopped)?;
        Ok(CompileTicket { reply: receiver })
    }

    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    /// Finish queued work and stop the thread.
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for CompileWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Transpile and write, then optionally emit declarations.
fn compile_file(
    toolchain: &dyn Toolchain,
    fs: &LocalFs,
    sink: &dyn CompileEventSink,
    message: &CompileMessage,
) -> CompileReport {
    let file = message.file.clone();

    let job = TranspileJob::new(
        message.file.clone(),
        message.output.clone(),
        message.project_root.clone(),
    );
    let started = Instant::now();
    let transpiler = toolchain.transpiler(&message.transpiler);
    let transpiled = transpiler
        .transpile(&job)
        .and_then(|result| fs.write_output(&message.output, &result));

    let transpile = match transpiled {
        Ok(()) => {
            let elapsed_ms = elapsed_ms(started);
            sink.on_event(CompileEvent::TranspileFinished {
                file: file.clone(),
                output: message.output.code_path.clone(),
                elapsed_ms,
            });
            StepStatus::Done { elapsed_ms }
        }
        Err(e) => {
            sink.on_event(CompileEvent::TranspileFailed {
                file: file.clone(),
                error: e.to_string(),
            });
            return CompileReport {
                file,
                output: message.output.clone(),
                transpile: StepStatus::Failed {
                    error: e.to_string(),
                },
                declaration: None,
            };
        }
    };

    let declaration = message
        .compile_declaration
        .then(|| emit_declaration(toolchain, sink, message));

    CompileReport {
        file,
        output: message.output.clone(),
        transpile,
        declaration,
    }
}

fn emit_declaration(
    toolchain: &dyn Toolchain,
    sink: &dyn CompileEventSink,
    message: &CompileMessage,
) -> StepStatus {
    let file = message.file.clone();
    let job = DeclarationJob {
        source: message.file.clone(),
        emit_map: message.emit_declaration_map,
        project_root: message.project_root.clone(),
    };

    let started = Instant::now();
    let emitter = toolchain.declaration_emitter(&message.declaration);

    match emitter.emit(&job) {
        Ok(DeclarationOutcome::Emitted) => {
            let elapsed_ms = elapsed_ms(started);
            sink.on_event(CompileEvent::DeclarationFinished { file, elapsed_ms });
            StepStatus::Done { elapsed_ms }
        }
        Ok(DeclarationOutcome::Skipped { reason }) => {
            sink.on_event(CompileEvent::DeclarationSkipped {
                file,
                reason: reason.clone(),
            });
            StepStatus::Skipped { reason }
        }
        Err(e) => {
            sink.on_event(CompileEvent::DeclarationFailed {
                file,
                error: e.to_string(),
            });
            StepStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
