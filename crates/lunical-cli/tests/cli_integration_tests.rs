/// CLI integration tests for lunical.
///
/// These exercise the binary as a black box: date conversions, calendar
/// generation from a config file, and error paths.
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn lunical() -> Command {
    Command::cargo_bin("lunical").expect("binary builds")
}

#[test]
fn test_cli_help_and_version() {
    lunical()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("iCalendar"));

    lunical()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lunical"));

    lunical()
        .arg("not-a-command")
        .assert()
        .failure();
}

#[test]
fn test_to_lunar_conversion() {
    lunical()
        .args(["to-lunar", "2020", "1", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-01-01"));
}

#[test]
fn test_to_solar_conversion_with_leap_month() {
    lunical()
        .args(["to-solar", "2020", "4", "1", "--leap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-05-23"));
}

#[test]
fn test_to_solar_rejects_missing_leap_month() {
    lunical()
        .args(["to-solar", "2024", "4", "1", "--leap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_generate_writes_ics_next_to_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("family.yaml");
    fs::write(
        &config_path,
        r#"
global:
  timezone: Asia/Shanghai
  year_start: 2027
  year_end: 2027
  days_max: 10000
  days_interval: 10000
  calendar_name: family-calendar
events:
  - id: sam
    name: Sam
    start_date: "2000-01-01"
    event_keys: [integer_days]
"#,
    )
    .expect("write config");

    lunical()
        .arg("generate")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 events"));

    let output = dir.path().join("family.ics");
    let text = fs::read_to_string(output).expect("output exists");
    assert!(text.contains("BEGIN:VCALENDAR"));
    assert!(text.contains("X-WR-CALNAME:family-calendar"));
    assert!(text.contains("DTSTART:20270519T020000Z"));
    assert!(text.contains("10000 days"));
}

#[test]
fn test_generate_respects_output_flag() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("family.yaml");
    let output_path = dir.path().join("custom.ics");
    fs::write(
        &config_path,
        r#"
global:
  timezone: UTC
  year_start: 2026
  year_end: 2026
events:
  - id: sam
    name: Sam
    start_date: "2000-01-01"
    event_keys: [solar_birthday]
"#,
    )
    .expect("write config");

    lunical()
        .arg("generate")
        .arg(&config_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists());
}

#[test]
fn test_generate_fails_fast_on_invalid_year_window() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("broken.yaml");
    fs::write(
        &config_path,
        r#"
global:
  timezone: UTC
  year_start: 2030
  year_end: 2026
events: []
"#,
    )
    .expect("write config");

    lunical()
        .arg("generate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!dir.path().join("broken.ics").exists());
}
