//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod compile_events;
pub mod compiler;

pub use compile_events::{CompileEvent, CompileEventSink, SkipReason};
pub use compiler::{
    DeclarationEmitter, DeclarationJob, DeclarationOutcome, Transpiled, TranspileJob, Transpiler,
};
