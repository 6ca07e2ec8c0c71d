use std::fs::File;
use std::io::Write;

use journey_config::{SampleRow, load_samples_csv, read_samples_csv};
use rstest::rstest;
use tempfile::tempdir;

#[rstest]
fn loads_samples_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trip.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "timestamp,fuel_level,odometer,position_lat,position_long").unwrap();
    writeln!(f, "1700000000,100,0,49.013297,8.404205").unwrap();
    writeln!(f, "1700001800,90,100,48.885614,8.692087").unwrap();

    let rows = load_samples_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[1],
        SampleRow {
            timestamp: 1_700_001_800,
            fuel_level: 90,
            odometer: 100,
            position_lat: 48.885614,
            position_long: 8.692087,
        }
    );
}

#[rstest]
fn header_only_yields_no_rows() {
    let rows =
        read_samples_csv("timestamp,fuel_level,odometer,position_lat,position_long\n".as_bytes())
            .unwrap();
    assert!(rows.is_empty());
}

#[rstest]
#[case("ts,fuel_level,odometer,position_lat,position_long\n1,1,1,1,1\n")]
#[case("fuel_level,timestamp,odometer,position_lat,position_long\n1,1,1,1,1\n")]
#[case("timestamp,fuel_level,odometer,position_lat\n1,1,1,1\n")]
fn rejects_wrong_headers(#[case] csv: &str) {
    let err = read_samples_csv(csv.as_bytes()).expect_err("should reject headers");
    assert!(format!("{err}").contains("sample CSV must have headers"));
}

#[rstest]
fn reports_line_of_bad_row() {
    let csv = "timestamp,fuel_level,odometer,position_lat,position_long\n\
               1,100,0,49.0,8.4\n\
               2,ninety,5,49.0,8.4\n";
    let err = read_samples_csv(csv.as_bytes()).expect_err("should reject row");
    assert!(format!("{err}").contains("invalid CSV row 3"), "{err}");
}

#[rstest]
fn missing_file_mentions_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = load_samples_csv(&path).expect_err("missing file");
    assert!(format!("{err}").contains("nope.csv"));
}
