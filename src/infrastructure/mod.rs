//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Output writing and project discovery
//! - `compilers/` - Process-backed transpiler and declaration emitter

pub mod compilers;
pub mod fs;

// Re-export for convenience
pub use compilers::{CommandTranspiler, TscDeclarationEmitter};
pub use fs::LocalFs;
