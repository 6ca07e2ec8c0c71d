use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Geocoder switched off so no test touches the network.
fn write_offline_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[geocoder]
enabled = false

[analysis]
lookup_timeout_ms = 1000
concurrent_lookups = true
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

const TWO_SAMPLES: &str = r#"{
  "vin": "ABC00000000000001",
  "gasTankSize": 100,
  "breakThreshold": 1800,
  "data": [
    {"fuelLevel": 100, "odometer": 0,   "positionLat": 49.013297, "positionLong": 8.404205, "timestamp": 1600000000},
    {"fuelLevel": 90,  "odometer": 100, "positionLat": 48.885614, "positionLong": 8.692087, "timestamp": 1600001800}
  ]
}"#;

fn write_request(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("trip.json");
    fs::write(&path, body).unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["health"], 0, "ok", "stdout")]
#[case(&["self-check"], 0, "ok", "stdout")]
#[case(&["analyze"], 2, "required", "stderr")]
#[case(&["analyze", "--input", "/no/such/trip.json"], 2, "cannot read trip request", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);

    let mut cmd = Command::cargo_bin("journey_cli").unwrap();

    // Always include a valid config to avoid relying on default path
    cmd.arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn analyze_prints_trip_analysis() {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);
    let req = write_request(&dir, TWO_SAMPLES);

    let out = Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--config"])
        .arg(&cfg)
        .arg("analyze")
        .arg("--input")
        .arg(&req)
        .env("JOURNEY_TEST_STATIC_CITY", "Karlsruhe")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["vin"], "ABC00000000000001");
    assert_eq!(v["consumption"], 10.0);
    assert_eq!(v["departure"], "Karlsruhe");
    assert_eq!(v["destination"], "Karlsruhe");
    assert_eq!(v["breaks"], serde_json::json!([]));
    assert_eq!(v["refuelStops"], serde_json::json!([]));
}

#[rstest]
fn analyze_reads_stdin() {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);

    // `write_stdin` lives on assert_cmd's own Command, not std's.
    assert_cmd::Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--offline", "--config"])
        .arg(&cfg)
        .args(["analyze", "--input", "-"])
        .write_stdin(TWO_SAMPLES)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"consumption\": 10.0"));
}

#[rstest]
fn offline_lookups_leave_cities_empty() {
    let dir = tempdir().unwrap();
    let req = write_request(&dir, TWO_SAMPLES);

    // No config file at all: defaults apply, --offline keeps us off the network.
    let out = Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--offline", "--config"])
        .arg(dir.path().join("absent.toml"))
        .arg("analyze")
        .arg("--input")
        .arg(&req)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["departure"], "");
    assert_eq!(v["destination"], "");
}

#[rstest]
#[case::bad_vin(r#""vin": "SHORT""#, 3, "Vin")]
#[case::bad_tank(r#""gasTankSize": 500"#, 3, "GasTankSize")]
fn analyze_rejects_request(#[case] replace: &str, #[case] code: i32, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);
    let body = if replace.starts_with("\"vin\"") {
        TWO_SAMPLES.replace(r#""vin": "ABC00000000000001""#, replace)
    } else {
        TWO_SAMPLES.replace(r#""gasTankSize": 100"#, replace)
    };
    let req = write_request(&dir, &body);

    Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--config"])
        .arg(&cfg)
        .arg("analyze")
        .arg("--input")
        .arg(&req)
        .assert()
        .code(code)
        .stderr(predicate::str::contains(needle));
}

#[rstest]
fn analyze_reports_inconsistent_fuel() {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);
    let req = write_request(&dir, &TWO_SAMPLES.replace("\"fuelLevel\": 90", "\"fuelLevel\": 100"));

    Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--config"])
        .arg(&cfg)
        .arg("analyze")
        .arg("--input")
        .arg(&req)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("movement without any fuel drop"));
}

#[rstest]
fn analyze_csv_builds_request() {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);

    let csv = dir.path().join("samples.csv");
    let mut f = fs::File::create(&csv).unwrap();
    writeln!(f, "timestamp,fuel_level,odometer,position_lat,position_long").unwrap();
    writeln!(f, "1600000000,100,0,49.013297,8.404205").unwrap();
    writeln!(f, "1600001800,90,100,48.885614,8.692087").unwrap();
    writeln!(f, "1600003600,90,100,48.885614,8.692087").unwrap();

    let out = Command::cargo_bin("journey_cli")
        .unwrap()
        .args(["--log-level", "error", "--json", "--config"])
        .arg(&cfg)
        .arg("analyze-csv")
        .arg("--csv")
        .arg(&csv)
        .args(["--vin", "ABC00000000000001", "--gas-tank-size", "100"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["breaks"].as_array().map(Vec::len), Some(1));
    assert_eq!(v["breaks"][0]["startTimestamp"], 1_600_001_800);
}

#[rstest]
fn cli_reports_bad_csv_header() {
    let dir = tempdir().unwrap();
    let cfg = write_offline_config(&dir);

    let bad_csv = dir.path().join("samples.csv");
    let mut f = fs::File::create(&bad_csv).unwrap();
    writeln!(f, "ts,fuel").unwrap();
    writeln!(f, "1,2").unwrap();

    Command::cargo_bin("journey_cli")
        .unwrap()
        .arg("--config")
        .arg(&cfg)
        .arg("analyze-csv")
        .arg("--csv")
        .arg(&bad_csv)
        .args(["--vin", "ABC00000000000001", "--gas-tank-size", "60"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Wrong headers"));
}

#[rstest]
fn invalid_config_fails_self_check() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    fs::write(&path, "[analysis]\nlookup_timeout_ms = 0\n").unwrap();

    Command::cargo_bin("journey_cli")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .arg("self-check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lookup_timeout_ms must be >= 1"));
}
