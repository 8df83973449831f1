// CLI integration tests for sort, check, demo, and shell flows.
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const PEOPLE: &str = r#"{
    "schema": ["string", "integer", "boolean"],
    "rows": [
        ["aa", 3, true],
        ["bbb", 1, true],
        ["xx", 2, false],
        ["aa", 4, true],
        ["bbb", 0, false]
    ],
    "sort": [{"column": 2}, {"column": 1}]
}"#;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_rowsort");
    Command::new(exe)
}

fn write_table(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write table");
    path
}

fn parse_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next().expect("json line");
    serde_json::from_str(line).expect("valid json")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

#[test]
fn sort_applies_the_file_sort_list() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(temp.path(), "people.json", PEOPLE);

    let out = cmd()
        .args(["--color", "never", "sort", path.to_str().unwrap()])
        .output()
        .expect("sort");
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).expect("utf8");
    assert_eq!(
        text,
        "\
0:string  1:integer  2:boolean
bbb       0          false
xx        2          false
bbb       1          true
aa        3          true
aa        4          true
"
    );
}

#[test]
fn by_flags_override_the_file_sort_list() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(temp.path(), "people.json", PEOPLE);

    let out = cmd()
        .args([
            "sort",
            path.to_str().unwrap(),
            "--by",
            "0",
            "--by",
            "1:desc",
            "--format",
            "json",
        ])
        .output()
        .expect("sort");
    assert!(out.status.success());
    let value = parse_json_line(&out.stdout);
    assert_eq!(value["schema"], serde_json::json!(["string", "integer", "boolean"]));
    let counts: Vec<i64> = value["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row[1].as_i64().expect("count"))
        .collect();
    assert_eq!(counts, [4, 3, 1, 0, 2]);
}

#[test]
fn sort_reads_stdin_when_path_is_dash() {
    let out = run_with_stdin(
        &["sort", "-", "--by", "0:d", "--format", "json"],
        r#"{"schema": ["integer"], "rows": [[1], [3], [2]]}"#,
    );
    assert!(out.status.success());
    let value = parse_json_line(&out.stdout);
    assert_eq!(value["rows"], serde_json::json!([[3], [2], [1]]));
}

#[test]
fn check_reports_shape() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(temp.path(), "people.json", PEOPLE);

    let out = cmd()
        .args(["check", path.to_str().unwrap()])
        .output()
        .expect("check");
    assert!(out.status.success());
    let value = parse_json_line(&out.stdout);
    assert_eq!(value["ok"], true);
    assert_eq!(value["rows"], 5);
    assert_eq!(value["columns"], 3);
}

#[test]
fn out_of_range_sort_key_exits_with_policy_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(temp.path(), "people.json", PEOPLE);

    let out = cmd()
        .args(["sort", path.to_str().unwrap(), "--by", "0", "--by", "7:asc"])
        .output()
        .expect("sort");
    assert_eq!(out.status.code(), Some(6));
    assert!(out.stdout.is_empty());
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "SortPolicy");
    assert_eq!(err["error"]["policy"], 1);
    assert_eq!(err["error"]["column"], 7);
}

#[test]
fn bad_cell_reports_row_and_column() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(
        temp.path(),
        "bad.json",
        r#"{"schema": ["string", "integer"], "rows": [["a", 1], ["b", "two"]]}"#,
    );

    let out = cmd()
        .args(["check", path.to_str().unwrap()])
        .output()
        .expect("check");
    assert_eq!(out.status.code(), Some(2));
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
    assert_eq!(err["error"]["row"], 1);
    assert_eq!(err["error"]["column"], 1);
}

#[test]
fn short_row_exits_with_shape_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(
        temp.path(),
        "short.json",
        r#"{"schema": ["string", "integer"], "rows": [["a"]]}"#,
    );

    let out = cmd()
        .args(["sort", path.to_str().unwrap()])
        .output()
        .expect("sort");
    assert_eq!(out.status.code(), Some(4));
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "RowShape");
}

#[test]
fn empty_schema_exits_with_schema_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_table(temp.path(), "empty.json", r#"{"schema": []}"#);

    let out = cmd()
        .args(["check", path.to_str().unwrap()])
        .output()
        .expect("check");
    assert_eq!(out.status.code(), Some(3));
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "Schema");
}

#[test]
fn missing_file_is_an_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("nope.json");

    let out = cmd()
        .args(["sort", path.to_str().unwrap()])
        .output()
        .expect("sort");
    assert_eq!(out.status.code(), Some(7));
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "Io");
    assert!(err["error"]["causes"].as_array().is_some());
}

#[test]
fn malformed_sort_flag_is_a_usage_error() {
    let out = cmd()
        .args(["sort", "-", "--by", "0:sideways"])
        .output()
        .expect("sort");
    assert_eq!(out.status.code(), Some(2));
    let err = parse_json_line(&out.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}

#[test]
fn demo_walks_through_every_stage() {
    let out = cmd()
        .args(["--color", "never", "demo"])
        .output()
        .expect("demo");
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).expect("utf8");
    assert!(text.starts_with("Starting table\n"));
    assert_eq!(text.matches("Table after sort").count(), 4);
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn shell_session_from_piped_input() {
    let script = "\
2
nums
integer color
5
nums
2 red
5
nums
1 blue
6
nums
1:desc
4
1
";
    let out = run_with_stdin(&["shell"], script);
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).expect("utf8");
    assert!(text.contains("Sorted by [1:desc]\n0:integer  1:color\n1          BLUE\n2          RED\n"));
    assert!(text.contains("nums (2 rows, 2 columns)"));
    assert!(text.ends_with("Goodbye.\n"));
}
