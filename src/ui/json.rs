use std::io::{self, Write};

use onsave::domain::ports::{CompileEvent, CompileEventSink};
use serde::Serialize;

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &CompileEvent) -> io::Result<()> {
    out.write_all(event.to_json().as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit any serializable value as one NDJSON line on stdout.
pub fn emit<T: Serialize>(value: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut out = io::stdout().lock();
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// NDJSON event stream on stdout
pub struct JsonSink;

impl CompileEventSink for JsonSink {
    fn on_event(&self, event: CompileEvent) {
        let mut out = io::stdout().lock();
        let _ = write_event(&mut out, &event);
        let _ = out.flush();
    }
}
