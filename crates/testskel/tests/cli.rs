//! End-to-end tests for the testskel binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CALCULATOR: &str = r#"
pub struct Calculator;

impl Calculator {
    pub fn new() -> Self { Calculator }
    pub fn add(&self, a: i32, b: i32) -> i32 { a + b }
    pub fn subtract(&self, a: i32, b: i32) -> i32 { a - b }
    fn helper(&self) {}
}
"#;

/// A scratch directory holding `calculator.rs`.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("calculator.rs"), CALCULATOR).unwrap();
    dir
}

fn testskel(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("testskel").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_writes_default_output_file() {
    let dir = workspace();
    testskel(&dir)
        .arg("Calculator")
        .assert()
        .success()
        .stderr(predicate::str::contains("wrote calculator_test.rs"));

    let output = fs::read_to_string(dir.path().join("calculator_test.rs")).unwrap();
    assert!(output.contains("fn testAdd()"));
    assert!(output.contains("fn testSubtract()"));
    assert!(!output.contains("testHelper"));
    assert!(!output.contains("testNew"));
}

#[test]
fn test_stdout_with_literal_templates() {
    let dir = workspace();
    testskel(&dir)
        .args([
            "Calculator",
            "calculator.rs",
            "--stdout",
            "--color",
            "never",
            "--header",
            "[{className}]",
            "--method",
            "<{methodName}>",
            "--footer",
            "[/{className}]",
        ])
        .assert()
        .success()
        .stdout("[Calculator]<Add><Subtract>[/Calculator]");
}

#[test]
fn test_template_file_override() {
    let dir = workspace();
    fs::write(dir.path().join("method.tpl"), "// stub {methodName}\n").unwrap();
    testskel(&dir)
        .args(["Calculator", "--stdout", "--method", "method.tpl"])
        .env("TESTSKEL_COLOR", "never")
        .assert()
        .success()
        .stdout(predicate::str::contains("// stub Add\n// stub Subtract\n"))
        .stdout(predicate::str::contains("mod CalculatorTest {"));
}

#[test]
fn test_list_methods() {
    let dir = workspace();
    testskel(&dir)
        .args(["Calculator", "--list"])
        .assert()
        .success()
        .stdout("add\nsubtract\n");
}

#[test]
fn test_raw_descriptor() {
    let dir = workspace();
    testskel(&dir)
        .args(["Calculator", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Calculator\""))
        .stdout(predicate::str::contains("\"is_constructor\": true"));
}

#[test]
fn test_explicit_output_quiet() {
    let dir = workspace();
    testskel(&dir)
        .args(["Calculator", "-o", "tests/calc.rs", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write tests/calc.rs"));

    fs::create_dir(dir.path().join("tests")).unwrap();
    testskel(&dir)
        .args(["Calculator", "-o", "tests/calc.rs", "-q"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    assert!(dir.path().join("tests/calc.rs").is_file());
}

#[test]
fn test_missing_source_file() {
    let dir = TempDir::new().unwrap();
    testskel(&dir)
        .arg("Calculator")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not open calculator.rs."));
}

#[test]
fn test_missing_class() {
    let dir = workspace();
    testskel(&dir)
        .args(["Abacus", "calculator.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not find class \"Abacus\" in calculator.rs.",
        ));
}
