//! Resolve command - explain what a save of one file would do

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use onsave::config::{CompileConfig, ConfigSource};
use onsave::domain::entities::CompileRequest;
use onsave::domain::ports::CompileEvent;
use onsave::domain::value_objects::{FilterDecision, ResolvedOutput};

use super::absolute;

#[derive(Debug, Serialize)]
struct ResolveReport {
    event: &'static str,
    file: PathBuf,
    decision: &'static str,
    config: Option<PathBuf>,
    output: ResolvedOutput,
}

pub fn cmd_resolve(workspace: &Path, file: &Path, json: bool, verbose: u8) -> Result<()> {
    let file = absolute(&std::env::current_dir()?, file);
    let loaded = CompileConfig::load_for_workspace(workspace)?;

    let sink = crate::ui::event_sink(json, verbose);
    for warning in &loaded.warnings {
        sink.on_event(CompileEvent::ConfigWarning {
            file: warning.file.clone(),
            key: warning.key.clone(),
            line: warning.line,
            suggestion: warning.suggestion.clone(),
        });
    }

    let config_path = match &loaded.source {
        ConfigSource::Project(path) | ConfigSource::User(path) => Some(path.clone()),
        ConfigSource::Defaults => None,
    };

    let request = CompileRequest::new(&file, workspace.to_path_buf(), loaded.config)?;
    let report = ResolveReport {
        event: "resolved",
        file: file.clone(),
        decision: decision_label(request.decide()?),
        config: config_path,
        output: request.resolve(),
    };

    if json {
        crate::ui::json::emit(&report)?;
    } else {
        println!("File:     {}", report.file.display());
        match &report.config {
            Some(path) => println!("Config:   {}", path.display()),
            None => println!("Config:   (defaults)"),
        }
        println!("Decision: {}", report.decision);
        println!("Output:   {}", report.output.code_path.display());
        println!("Map:      {}", report.output.map_path.display());
    }

    Ok(())
}

fn decision_label(decision: FilterDecision) -> &'static str {
    match decision {
        FilterDecision::Compile => "compile",
        FilterDecision::NotIncluded => "not_included",
        FilterDecision::Declaration => "declaration",
    }
}
