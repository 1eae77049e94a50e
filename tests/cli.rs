use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn prettify_reads_stdin_by_default() {
    Command::cargo_bin("jsonwalk")
        .unwrap()
        .arg("prettify")
        .write_stdin(r#"{a:1,b:2}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"a\": 1"));
}

#[test]
fn get_prints_the_value_at_a_path() {
    Command::cargo_bin("jsonwalk")
        .unwrap()
        .args(["get", ".name"])
        .write_stdin(r#"{name:"Ada"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada"));
}

#[test]
fn get_on_a_missing_path_fails() {
    Command::cargo_bin("jsonwalk")
        .unwrap()
        .args(["get", ".missing"])
        .write_stdin(r#"{name:"Ada"}"#)
        .assert()
        .failure();
}

#[test]
fn set_replaces_a_scalar_value() {
    Command::cargo_bin("jsonwalk")
        .unwrap()
        .args(["set", ".a", "99"])
        .write_stdin(r#"{a:1}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("99"));
}

#[test]
fn invalid_json_reports_an_error() {
    Command::cargo_bin("jsonwalk")
        .unwrap()
        .arg("prettify")
        .write_stdin(r#"{a:.1}"#)
        .assert()
        .failure();
}

#[test]
fn prettify_file_writes_to_the_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.json");
    let output_path = dir.path().join("out.json");
    std::fs::write(&input_path, r#"{a:1}"#).unwrap();

    Command::cargo_bin("jsonwalk")
        .unwrap()
        .arg("prettify-file")
        .arg(&input_path)
        .arg(&output_path)
        .assert()
        .success();

    let out = std::fs::read_to_string(&output_path).unwrap();
    assert!(out.contains("\"a\": 1"));
}
