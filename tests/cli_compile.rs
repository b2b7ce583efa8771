//! Integration tests for `onsave compile`, using shell tools as compilers.

#![cfg(unix)]

mod common;

use common::*;

const CAT_CONFIG: &str = r#"
include = ["src/**/*.ts"]
srcDir = "src"
outDir = "lib"

[transpiler]
command = "cat"
args = ["{file}"]
"#;

#[test]
fn compile_writes_output_under_out_dir() {
    let env = TestEnv::with_config(CAT_CONFIG);
    let file = env.write("src/a/b.ts", "export const b = 2;\n");

    let result = env.run(&["compile", &path_str(&file)]);
    assert!(result.success, "compile failed: {}", result.stderr);

    assert_eq!(env.read("lib/a/b.js"), "export const b = 2;\n");
    assert!(!env.path("lib/a/b.js.map").exists());
}

#[test]
fn compile_emits_ndjson_events() {
    let env = TestEnv::with_config(CAT_CONFIG);
    let file = env.write("src/a.ts", "let a;\n");

    let result = env.run(&["compile", &path_str(&file), "--json"]);
    assert!(result.success, "compile failed: {}", result.stderr);

    let events = json_lines(&result.stdout);
    let names: Vec<_> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["compile_started", "transpile_finished"]);
    assert_eq!(events[1]["output"], env.path_arg("lib/a.js"));
}

#[test]
fn unmatched_file_is_skipped_without_error() {
    let env = TestEnv::with_config(CAT_CONFIG);
    let file = env.write("scripts/build.ts", "x");

    let result = env.run(&["compile", &path_str(&file), "--json"]);
    assert!(result.success, "compile failed: {}", result.stderr);

    let events = json_lines(&result.stdout);
    assert_eq!(events[0]["event"], "file_skipped");
    assert_eq!(events[0]["reason"], "not_included");
    assert!(!env.path("lib").exists());
}

#[test]
fn failing_transpiler_exits_non_zero() {
    let env = TestEnv::with_config(
        r#"
include = ["src/**/*.ts"]

[transpiler]
command = "sh"
args = ["-c", "echo 'SyntaxError: boom' >&2; exit 1"]
"#,
    );
    let file = env.write("src/a.ts", "let;");

    let result = env.run(&["compile", &path_str(&file)]);

    assert!(!result.success);
    assert!(result.stderr.contains("SyntaxError: boom"), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("1 file(s) failed"), "stderr: {}", result.stderr);
}

#[test]
fn malformed_glob_is_reported() {
    let env = TestEnv::with_config("include = [\"src/[a-\"]\n");
    let file = env.write("src/a.ts", "x");

    let result = env.run(&["compile", &path_str(&file)]);

    assert!(!result.success);
    assert!(result.stderr.contains("src/[a-"), "stderr: {}", result.stderr);
}

#[test]
fn transpiler_map_gets_linked() {
    let env = TestEnv::with_config(
        r#"
include = ["src/**/*.ts"]
srcDir = "src"
outDir = "lib"

[transpiler]
command = "sh"
args = ["-c", "cp \"$0\" \"$1\" && printf '{\"sources\":[\"%s\"]}' \"$2\" > \"$1.map\"", "{file}", "{outFile}", "{sourceFileName}"]
"#,
    );
    let file = env.write("src/a/b.ts", "let b;");

    let result = env.run(&["compile", &path_str(&file)]);
    assert!(result.success, "compile failed: {}", result.stderr);

    assert_eq!(
        env.read("lib/a/b.js"),
        "let b;\n//# sourceMappingURL=b.js.map"
    );
    assert_eq!(env.read("lib/a/b.js.map"), "{\"sources\":[\"../../src/a/b.ts\"]}");
}
