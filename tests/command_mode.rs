//! Integration tests for the command-line front end

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        // Tests must be deterministic and not depend on a user's config.toml.
        .arg("--no-config")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("ledgergrid_{}_{}", std::process::id(), name))
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-c", "5 + 3 * 2"]);
    assert_eq!(stdout.trim(), "11");
    assert_eq!(code, 0);
}

#[test]
fn test_auto_prepend_equals() {
    let (stdout1, _, _) = run_command(&["-c", "10 + 5"]);
    let (stdout2, _, _) = run_command(&["-c", "=10 + 5"]);
    assert_eq!(stdout1, stdout2);
}

#[test]
fn test_edits_then_range_function() {
    let (stdout, _, code) = run_command(&["-e", "A1=5", "-e", "A2=3", "-c", "SUM(A1:A2)"]);
    assert_eq!(stdout.trim(), "8");
    assert_eq!(code, 0);
}

#[test]
fn test_fractional_result_uses_two_decimals() {
    let (stdout, _, code) = run_command(&["-c", "10/4"]);
    assert_eq!(stdout.trim(), "2.50");
    assert_eq!(code, 0);
}

#[test]
fn test_division_by_zero() {
    let (stdout, _, code) = run_command(&["-c", "1/0"]);
    assert!(stdout.starts_with("#ERR"));
    assert_eq!(code, 1);
}

#[test]
fn test_malformed_formula_cell_shows_zero() {
    let (stdout, stderr, code) = run_command(&["-e", "E1==A1+"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("| 1 | 0 |"));
    assert!(stderr.contains("E1:"));
}

#[test]
fn test_invalid_address_fails() {
    let (_, stderr, code) = run_command(&["-e", "Q1=4"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid cell address"));
}

#[test]
fn test_markdown_output() {
    use std::fs;

    let output_file = temp_path("table.md");
    let output = output_file.to_string_lossy().to_string();

    let (_, stderr, code) = run_command(&[
        "-e", "A1=120", "-e", "A2=80", "-e", "A3==SUM(A1:A2)", "-o", &output,
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Exported to"));

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("| 3 | 200 |"));

    fs::remove_file(&output_file).ok();
}

#[test]
fn test_save_then_reopen() {
    use std::fs;

    let grid_file = temp_path("grid.json");
    let grid = grid_file.to_string_lossy().to_string();

    let (_, _, code) = run_command(&[
        "-e", "B1=2", "-e", "B2==B1*3", "-s", "B2:bold=true", "--save-as", &grid,
    ]);
    assert_eq!(code, 0);

    let json = fs::read_to_string(&grid_file).unwrap();
    assert!(json.contains("\"rawInput\": \"=B1*3\""));
    assert!(json.contains("\"bold\": true"));

    let (stdout, _, code) = run_command(&[&grid, "-e", "B1=4", "-c", "B2"]);
    assert_eq!(stdout.trim(), "12");
    assert_eq!(code, 0);

    fs::remove_file(&grid_file).ok();
}
