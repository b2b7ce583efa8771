//! Terminal output for the CLI
//!
//! - `console`: human-readable event lines
//! - `json`: NDJSON event stream for CI and editor integrations

pub mod console;
pub mod json;

use std::sync::Arc;

use onsave::domain::ports::CompileEventSink;

/// Pick the sink matching the global output flags.
pub fn event_sink(json: bool, verbose: u8) -> Arc<dyn CompileEventSink> {
    if json {
        Arc::new(json::JsonSink)
    } else {
        Arc::new(console::ConsoleSink::new(verbose))
    }
}
