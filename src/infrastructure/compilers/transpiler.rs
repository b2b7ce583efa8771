//! Process-backed transpiler (Babel CLI by default)
//!
//! The tool writes into a scratch directory; the file there carries the same
//! name as the final output so any `sourceMappingURL` it emits stays valid
//! once the result is written to its real location.

use std::ffi::OsStr;

use crate::config::TranspilerConfig;
use crate::domain::ports::{Transpiled, TranspileJob, Transpiler};
use crate::error::OnSaveResult;

use super::command::ToolCommand;

/// Runs the configured transpiler command for each job.
///
/// Placeholders: `{file}`, `{outFile}`, `{sourceFileName}`, `{projectRoot}`.
/// When the command writes nothing to `{outFile}`, its stdout is the code.
#[derive(Debug, Clone)]
pub struct CommandTranspiler {
    command: ToolCommand,
}

impl CommandTranspiler {
    pub fn new(config: &TranspilerConfig) -> Self {
        Self {
            command: ToolCommand::new("transpiler", &config.command, config.args.clone()),
        }
    }
}

impl Transpiler for CommandTranspiler {
    fn transpile(&self, job: &TranspileJob) -> OnSaveResult<Transpiled> {
        let scratch = tempfile::tempdir()?;
        let out_name = job
            .output
            .code_path
            .file_name()
            .unwrap_or(OsStr::new("out.js"));
        let out_file = scratch.path().join(out_name);
        let map_file = scratch.path().join(format!("{}.map", out_name.to_string_lossy()));

        let file = job.source.to_string_lossy();
        let out = out_file.to_string_lossy();
        let project_root = job.project_root.to_string_lossy();
        let args = self.command.expand_args(&[
            ("file", &*file),
            ("outFile", &*out),
            ("sourceFileName", job.source_file_name.as_str()),
            ("projectRoot", &*project_root),
        ]);

        let output = self.command.run(&job.project_root, &job.source, &args)?;

        if out_file.is_file() {
            let code = std::fs::read_to_string(&out_file)?;
            let map = if map_file.is_file() {
                Some(std::fs::read_to_string(&map_file)?)
            } else {
                None
            };
            return Ok(Transpiled { code, map });
        }

        Ok(Transpiled {
            code: String::from_utf8_lossy(&output.stdout).into_owned(),
            map: None,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::value_objects::ResolvedOutput;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn job(ws: &Path) -> TranspileJob {
        TranspileJob::new(
            ws.join("src/a.ts"),
            ResolvedOutput {
                code_path: ws.join("lib/a.js"),
                map_path: ws.join("lib/a.js.map"),
            },
            ws.to_path_buf(),
        )
    }

    #[test]
    fn stdout_is_used_without_out_file() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.ts"), "const a = 1;").unwrap();

        let transpiler = CommandTranspiler::new(&TranspilerConfig {
            command: "cat".to_string(),
            args: vec!["{file}".to_string()],
        });

        let result = transpiler.transpile(&job(dir.path())).unwrap();
        assert_eq!(result.code, "const a = 1;");
        assert_eq!(result.map, None);
    }

    #[test]
    fn out_file_and_map_are_collected() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/a.ts"), "let x;").unwrap();

        let transpiler = CommandTranspiler::new(&TranspilerConfig {
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "cp \"$0\" \"$1\" && printf '{\"sources\":[\"%s\"]}' \"$2\" > \"$1.map\"".to_string(),
                "{file}".to_string(),
                "{outFile}".to_string(),
                "{sourceFileName}".to_string(),
            ],
        });

        let result = transpiler.transpile(&job(dir.path())).unwrap();
        assert_eq!(result.code, "let x;");
        assert_eq!(result.map.as_deref(), Some("{\"sources\":[\"../src/a.ts\"]}"));
    }

    #[test]
    fn failing_transpiler_is_an_error() {
        let dir = tempdir().unwrap();
        let transpiler = CommandTranspiler::new(&TranspilerConfig {
            command: "false".to_string(),
            args: vec![],
        });
        assert!(transpiler.transpile(&job(dir.path())).is_err());
    }
}
