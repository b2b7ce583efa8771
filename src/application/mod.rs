//! Application Layer
//!
//! Use cases that orchestrate the save flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `SaveSession` - Per-activation context: filter, resolve, dispatch
//! - `CompileWorker` - Background thread running the compilers

pub mod session;
pub mod worker;

pub use session::{SaveOutcome, SaveSession};
pub use worker::{
    CompileMessage, CompileReport, CompileTicket, CompileWorker, ProcessToolchain, StepStatus,
    Toolchain,
};
