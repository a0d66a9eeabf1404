//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `tacit` binary and verify exit codes,
//! stdout content and stderr content. Every command runs in a fresh
//! temporary directory so no stray `tacit.json` is picked up.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper: create a Command for the `tacit` binary inside `dir`.
fn tacit(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tacit");
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn ast_is_the_default_output() {
    let dir = TempDir::new().unwrap();
    let output = tacit(&dir).write_stdin("1+2*3").assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["kind"], "program");
    assert_eq!(json["body"][0]["kind"], "binaryOp");
    assert_eq!(json["body"][0]["op"], "+");
    assert_eq!(json["body"][0]["right"]["op"], "*");
}

#[test]
fn print_outputs_canonical_source() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .arg("--print")
        .write_stdin("A=B=3;Z+=sz # done\n")
        .assert()
        .success()
        .stdout("A = B = 3; Z += sz\n");
}

#[test]
fn tokens_and_cst_outputs() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .arg("--tokens")
        .write_stdin("X sz")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"variableName\"").and(predicate::str::contains("\"postfixOperatorName\"")));

    tacit(&dir)
        .arg("--cst")
        .write_stdin("(1)")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"parenthesized\"").and(predicate::str::contains("\"openParen\"")));
}

#[test]
fn reads_source_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("prog.tc"), "[1;2]").unwrap();
    tacit(&dir)
        .args(["prog.tc", "--print"])
        .assert()
        .success()
        .stdout("[1; 2]\n");
}

#[test]
fn missing_file_exits_2() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .arg("nope.tc")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read 'nope.tc'"));
}

#[test]
fn syntax_error_exits_1() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .write_stdin("(1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("')' expected at end of input."));
}

#[test]
fn lex_error_exits_1() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .write_stdin("\"open")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unterminated string literal."));
}

#[test]
fn trailing_tokens_need_opt_in() {
    let dir = TempDir::new().unwrap();
    tacit(&dir)
        .write_stdin("1 )")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("after end of program"));

    tacit(&dir).arg("--allow-trailing").write_stdin("1 )").assert().success();
}

#[test]
fn config_file_sets_parse_options() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tacit.json"),
        r#"{ "parseOptions": { "allowTrailingTokens": true } }"#,
    )
    .unwrap();
    // Picked up from the working directory.
    tacit(&dir).write_stdin("1 )").assert().success();

    fs::write(dir.path().join("strict.json"), r#"{ "parseOptions": { "maxNestingDepth": 8 } }"#).unwrap();
    tacit(&dir)
        .args(["--config", "strict.json"])
        .write_stdin("((((((1))))))")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nesting exceeds the limit of 8"));
}

#[test]
fn invalid_config_exits_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    tacit(&dir)
        .args(["--config", "bad.json"])
        .write_stdin("1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}
