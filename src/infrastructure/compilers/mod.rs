//! Process-backed compiler implementations
//!
//! Each implementation shells out to a configured tool, run from the
//! project root of the saved file.

mod command;
mod declaration;
mod transpiler;

pub use declaration::TscDeclarationEmitter;
pub use transpiler::CommandTranspiler;
