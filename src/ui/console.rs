use std::path::Path;

use onsave::domain::ports::{CompileEvent, CompileEventSink, SkipReason};

/// Render one event as a console line, or `None` when it is hidden at
/// this verbosity.
pub fn render_event(event: &CompileEvent, verbose: u8) -> Option<String> {
    if event.is_detail() && verbose == 0 {
        return None;
    }

    let line = match event {
        CompileEvent::WatchStarted { workspace } => format!(
            "👀 Watching {}\n   Press Ctrl+C to stop",
            workspace.display()
        ),
        CompileEvent::FileSkipped { file, reason, detail } => format!(
            "○ Skipped {} ({}: {})",
            file.display(),
            skip_label(*reason),
            detail
        ),
        CompileEvent::CompileStarted { file, output } => {
            if verbose == 0 {
                return None;
            }
            format!("→ {} → {}", file.display(), output.display())
        }
        CompileEvent::TranspileFinished {
            file,
            output,
            elapsed_ms,
        } => format!(
            "✓ {} → {} ({}ms)",
            display_name(file),
            output.display(),
            elapsed_ms
        ),
        CompileEvent::TranspileFailed { file, error } => {
            format!("✗ {} failed to compile\n{}", file.display(), indent(error))
        }
        CompileEvent::DeclarationFinished { file, elapsed_ms } => format!(
            "✓ {} declarations ({}ms)",
            display_name(file),
            elapsed_ms
        ),
        CompileEvent::DeclarationSkipped { file, reason } => {
            format!("○ {} declarations skipped: {}", display_name(file), reason)
        }
        CompileEvent::DeclarationFailed { file, error } => format!(
            "✗ {} declarations failed\n{}",
            file.display(),
            indent(error)
        ),
        CompileEvent::ConfigWarning {
            file,
            key,
            line,
            suggestion,
        } => {
            let location = match line {
                Some(line) => format!("{}:{}", file.display(), line),
                None => file.display().to_string(),
            };
            let mut text = format!("⚠ Unknown config key '{}' in {}", key, location);
            if let Some(suggestion) = suggestion {
                text.push_str(&format!("\n   Did you mean '{}'?", suggestion));
            }
            text
        }
        CompileEvent::Shutdown => "Stopped.".to_string(),
    };

    Some(line)
}

fn is_error(event: &CompileEvent) -> bool {
    matches!(
        event,
        CompileEvent::TranspileFailed { .. }
            | CompileEvent::DeclarationFailed { .. }
            | CompileEvent::ConfigWarning { .. }
            | CompileEvent::FileSkipped {
                reason: SkipReason::ConfigError,
                ..
            }
    )
}

fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::OutsideWorkspace => "outside workspace",
        SkipReason::NotIncluded => "not included",
        SkipReason::Declaration => "declaration file",
        SkipReason::ConfigError => "config error",
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("   {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable progress on stdout, failures on stderr
pub struct ConsoleSink {
    verbose: u8,
}

impl ConsoleSink {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }
}

impl CompileEventSink for ConsoleSink {
    fn on_event(&self, event: CompileEvent) {
        let Some(line) = render_event(&event, self.verbose) else {
            return;
        };
        if is_error(&event) {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}
