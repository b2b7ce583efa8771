//! External tool invocation shared by the compilers

use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{OnSaveError, OnSaveResult};

/// A configured command line with `{placeholder}` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ToolCommand {
    pub tool: &'static str,
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(tool: &'static str, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            tool,
            program: program.into(),
            args,
        }
    }

    /// Substitute every `{name}` in the arguments.
    pub fn expand_args(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (name, value)| {
                    acc.replace(&format!("{{{}}}", name), value)
                })
            })
            .collect()
    }

    /// Run to completion from `cwd`, failing on a non-zero exit.
    pub fn run(&self, cwd: &Path, file: &Path, args: &[String]) -> OnSaveResult<Output> {
        self.run_accepting(cwd, file, args, &[0])
    }

    /// Like [`run`](Self::run), but any exit code in `ok_codes` counts as success.
    pub fn run_accepting(
        &self,
        cwd: &Path,
        file: &Path,
        args: &[String],
        ok_codes: &[i32],
    ) -> OnSaveResult<Output> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| OnSaveError::ToolNotFound {
                tool: self.tool,
                command: self.program.clone(),
                message: e.to_string(),
            })?;

        let accepted = output
            .status
            .code()
            .map(|code| ok_codes.contains(&code))
            .unwrap_or(false);
        if !accepted {
            return Err(OnSaveError::ToolFailed {
                tool: self.tool,
                file: file.to_path_buf(),
                message: failure_message(&output),
            });
        }

        Ok(output)
    }
}

/// stderr, else stdout, else the exit status
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        return stdout.trim().to_string();
    }
    match output.status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_expanded() {
        let cmd = ToolCommand::new(
            "transpiler",
            "babel",
            vec!["{file}".into(), "--out-file={outFile}".into(), "-x".into()],
        );
        let args = cmd.expand_args(&[("file", "/ws/a.ts"), ("outFile", "/tmp/a.js")]);
        assert_eq!(args, vec!["/ws/a.ts", "--out-file=/tmp/a.js", "-x"]);
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let cmd = ToolCommand::new("transpiler", "babel", vec!["{nope}".into()]);
        assert_eq!(cmd.expand_args(&[("file", "x")]), vec!["{nope}"]);
    }

    #[test]
    fn missing_program_is_reported() {
        let cmd = ToolCommand::new("transpiler", "onsave-definitely-missing-binary", vec![]);
        let err = cmd
            .run(Path::new("."), Path::new("a.ts"), &[])
            .unwrap_err();
        assert!(matches!(err, OnSaveError::ToolNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_reports_stderr() {
        let cmd = ToolCommand::new("transpiler", "sh", vec![]);
        let args = vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()];
        let err = cmd.run(Path::new("."), Path::new("a.ts"), &args).unwrap_err();
        match err {
            OnSaveError::ToolFailed { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
