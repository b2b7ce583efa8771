//! Type declaration emitter backed by `tsc`
//!
//! Emits `.d.ts` (and optionally `.d.ts.map`) for a single file. A scratch
//! tsconfig extends the project's nearest `tsconfig.json`, so its outDir,
//! paths and libs apply, while `files` narrows the program to the saved file.
//! The scratch file sits next to the real one: tsc resolves default
//! `typeRoots` (`node_modules/@types`) from the config's own directory.

use std::io::Write;
use std::path::Path;

use serde_json::json;

use crate::config::DeclarationConfig;
use crate::domain::ports::{DeclarationEmitter, DeclarationJob, DeclarationOutcome};
use crate::error::OnSaveResult;
use crate::infrastructure::fs::find_up;

use super::command::ToolCommand;

/// tsc exit code for "diagnostics present, outputs generated"
const TSC_EMITTED_WITH_DIAGNOSTICS: i32 = 2;

#[derive(Debug, Clone)]
pub struct TscDeclarationEmitter {
    command: ToolCommand,
}

impl TscDeclarationEmitter {
    pub fn new(config: &DeclarationConfig) -> Self {
        Self {
            command: ToolCommand::new("declaration emitter", &config.command, config.args.clone()),
        }
    }
}

impl DeclarationEmitter for TscDeclarationEmitter {
    fn emit(&self, job: &DeclarationJob) -> OnSaveResult<DeclarationOutcome> {
        if !is_typescript_source(&job.source) {
            return Ok(DeclarationOutcome::Skipped {
                reason: "not a TypeScript file".to_string(),
            });
        }

        let start = job.source.parent().unwrap_or(Path::new("/"));
        let Some(tsconfig) = find_up(start, "tsconfig.json") else {
            return Ok(DeclarationOutcome::Skipped {
                reason: "no tsconfig.json found".to_string(),
            });
        };

        let content = single_file_config(&tsconfig, &job.source, job.emit_map);
        let mut scratch = scratch_config_file(&tsconfig)?;
        scratch.write_all(serde_json::to_string_pretty(&content)?.as_bytes())?;
        scratch.flush()?;

        let mut args = self.command.args.clone();
        args.push("-p".to_string());
        args.push(scratch.path().to_string_lossy().into_owned());

        // Type errors do not block emission
        self.command.run_accepting(
            &job.project_root,
            &job.source,
            &args,
            &[0, TSC_EMITTED_WITH_DIAGNOSTICS],
        )?;

        Ok(DeclarationOutcome::Emitted)
    }
}

/// Hidden temp file beside `tsconfig`, removed when dropped.
fn scratch_config_file(tsconfig: &Path) -> OnSaveResult<tempfile::NamedTempFile> {
    let dir = tsconfig.parent().unwrap_or(Path::new("."));
    let file = tempfile::Builder::new()
        .prefix(".onsave-tsconfig-")
        .suffix(".json")
        .tempfile_in(dir)?;
    Ok(file)
}

/// `.ts` / `.tsx`, excluding declaration files themselves
fn is_typescript_source(path: &Path) -> bool {
    let name = path.to_string_lossy();
    (name.ends_with(".ts") || name.ends_with(".tsx")) && !name.ends_with(".d.ts")
}

/// tsconfig that inherits `base` but compiles only `source`, declarations only.
fn single_file_config(base: &Path, source: &Path, emit_map: bool) -> serde_json::Value {
    json!({
        "extends": base.to_string_lossy(),
        "files": [source.to_string_lossy()],
        "include": [],
        "compilerOptions": {
            "declaration": true,
            "declarationMap": emit_map,
            "emitDeclarationOnly": true,
            "isolatedModules": false,
            "composite": false,
            "incremental": false,
            "skipLibCheck": true,
            "noEmitHelpers": true,
            "target": "ESNext",
            "module": "ESNext",
            "noEmit": false,
            "noEmitOnError": false
        }
    })
}
