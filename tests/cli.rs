use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn valid_config_json() -> &'static str {
    r#"
{
  "version": 1,
  "value": "04:30 PM",
  "dial_radius": 80.0,
  "persist": false
}
"#
}

#[test]
fn check_reports_persisted_value() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("timepicker.json");
    fs::write(&config, valid_config_json()).expect("write json");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canonical value: 04:30 PM"))
        .stdout(predicate::str::contains("24-hour: 16:30"))
        .stdout(predicate::str::contains("Hand rotation: 120 deg"))
        .stdout(predicate::str::contains("Dial radius: 80.0"));
}

#[test]
fn check_without_config_file_uses_default() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Canonical value: 07:00 AM"))
        .stdout(predicate::str::contains("Hand rotation: 210 deg"));
}

#[test]
fn unparsable_value_falls_back_to_default() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("--value")
        .arg("25:99 AM")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parse: fell back to default"))
        .stdout(predicate::str::contains("Canonical value: 07:00 AM"));
}

#[test]
fn check_marks_selected_marker_geometry() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("--value")
        .arg("3:15 AM")
        .assert()
        .success()
        .stdout(predicate::str::contains("Canonical value: 03:15 AM"))
        .stdout(predicate::str::contains(
            "* 3  angle    0.0  x    70.00  y     0.00",
        ));
}

#[test]
fn malformed_json_fails_with_clear_error() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("timepicker.json");
    fs::write(&config, "{ not-valid-json ").expect("write invalid json");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn non_positive_dial_radius_is_rejected() {
    let dir = tempdir().expect("tempdir");

    let mut cmd = cargo_bin_cmd!("clockpick");
    cmd.arg("--check")
        .arg("--config")
        .arg(dir.path().join("missing.json"))
        .arg("--dial-radius")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --dial-radius"));
}
