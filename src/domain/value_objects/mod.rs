//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod include_filter;
mod output_path;

pub use include_filter::{should_compile, FilterDecision, IncludeFilter};
pub use output_path::{normalize, resolve_output_path, OutputLayout, ResolvedOutput};
