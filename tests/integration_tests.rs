use chrono::Datelike;
use clap::Parser;
use climate_dashboard::cli::{commands::run_with_output, Cli};
use climate_dashboard::error::ErrorKind;
use climate_dashboard::processors::{apply_filter, CountryFilter, YearRange};
use climate_dashboard::readers::ObservationReader;
use climate_dashboard::writers::CsvExporter;
use climate_dashboard::{Dashboard, DashboardQuery};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const RAW_HEADER: &str =
    "dt,AverageTemperature,AverageTemperatureUncertainty,City,Country,Latitude,Longitude";

const RAW_ROWS: [&str; 8] = [
    "1999-01-01,-4.5,0.3,Oslo,Norway,59.91N,10.75E",
    "1999-07-01,16.2,0.4,Oslo,Norway,59.91N,10.75E",
    "2000-01-01,-2.0,0.3,Oslo,Norway,59.91N,10.75E",
    "2000-07-01,17.0,0.2,Oslo,Norway,59.91N,10.75E",
    "2000-02-01,,,Lima,Peru,12.05S,77.26W",
    "2000-02-01,22.4,0.5,Lima,Peru,12.05S,77.26W",
    "2000-08-01,17.1,0.5,Lima,Peru,12.05S,77.26W",
    "1999-08-01,16.9,0.6,\"Lima\",Peru,12.05S,77.26W",
];

fn write_raw_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{}", RAW_HEADER).unwrap();
    for row in RAW_ROWS {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

fn run_cli(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("Failed to parse arguments");
    let mut output = Vec::new();
    run_with_output(cli, &mut output).expect("Command failed");
    String::from_utf8(output).unwrap()
}

#[test]
fn test_missing_temperature_row_is_dropped() {
    let fixture = write_raw_fixture();
    let table = ObservationReader::new()
        .read_observations(fixture.path())
        .unwrap();

    assert_eq!(table.len(), RAW_ROWS.len() - 1);
}

#[test]
fn test_calendar_fields_match_timestamp() {
    let fixture = write_raw_fixture();
    let table = ObservationReader::new()
        .read_observations(fixture.path())
        .unwrap();

    for row in &table {
        assert_eq!(row.year, row.timestamp.year());
        assert!((1..=12).contains(&row.month));
    }
}

#[test]
fn test_western_longitude_keeps_sign_by_default() {
    let fixture = write_raw_fixture();
    let table = ObservationReader::new()
        .read_observations(fixture.path())
        .unwrap();

    let lima = table.iter().find(|r| r.city.as_ref() == "Lima").unwrap();
    assert!((lima.latitude - 12.05).abs() < 1e-9);
    assert!((lima.longitude - 77.26).abs() < 1e-9);
}

#[test]
fn test_single_year_filter() {
    let fixture = write_raw_fixture();
    let table = ObservationReader::new()
        .read_observations(fixture.path())
        .unwrap();

    let country: CountryFilter = "All".parse().unwrap();
    let filtered = apply_filter(&table, YearRange::new(2000, 2000).unwrap(), &country);

    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|r| r.year == 2000));
}

#[test]
fn test_export_round_trip() {
    let fixture = write_raw_fixture();
    let table = ObservationReader::new()
        .read_observations(fixture.path())
        .unwrap();

    let query = DashboardQuery::new(None, None, CountryFilter::Only("Peru".to_string()));
    let filtered = Dashboard::default().filter(&table, &query).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("filtered_climate_data.csv");
    CsvExporter::new().write_to_path(&filtered, &path).unwrap();

    let reloaded = ObservationReader::new().read_exported(&path).unwrap();
    assert_eq!(reloaded.len(), filtered.len());

    let key = |t: &climate_dashboard::ObservationTable| -> Vec<(f64, i32, u32)> {
        t.iter()
            .map(|r| (r.average_temperature, r.year, r.month))
            .collect()
    };
    assert_eq!(key(&reloaded), key(&filtered));
    assert_eq!(reloaded, filtered);
}

#[test]
fn test_missing_input_is_data_source_error() {
    let err = ObservationReader::new()
        .read_observations(Path::new("no/such/climate.csv"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataSource);
}

#[test]
fn test_cli_report_json() {
    let fixture = write_raw_fixture();
    let input = fixture.path().to_str().unwrap();

    let output = run_cli(&[
        "climate-dashboard",
        "report",
        "--input",
        input,
        "--from",
        "2000",
        "--to",
        "2000",
        "--view",
        "yearly",
        "--format",
        "json",
    ]);

    let yearly: serde_json::Value = serde_json::from_str(&output).unwrap();
    let points = yearly.as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["year"], 2000);
    // (-2.0 + 17.0 + 22.4 + 17.1) / 4
    let mean = points[0]["mean_temperature"].as_f64().unwrap();
    assert!((mean - 13.625).abs() < 1e-9);
}

#[test]
fn test_cli_report_text() {
    let fixture = write_raw_fixture();
    let input = fixture.path().to_str().unwrap();

    let output = run_cli(&["climate-dashboard", "report", "--quiet", "--input", input]);

    assert!(output.contains("Climate data 1999-2000 (All)"));
    assert!(output.contains("Total Cities: 2"));
    assert!(output.contains("Yearly Temperature Trend"));
    assert!(output.contains("Temperature Distribution"));
    assert!(output.contains("Top 2 Hottest Cities"));
    assert!(output.contains("Average Monthly Temperature"));
    assert!(output.contains("Raw Data Sample (7 rows)"));
}

#[test]
fn test_cli_report_for_unknown_country_is_empty() {
    let fixture = write_raw_fixture();
    let input = fixture.path().to_str().unwrap();

    let output = run_cli(&[
        "climate-dashboard",
        "report",
        "--quiet",
        "--input",
        input,
        "--country",
        "Atlantis",
        "--view",
        "monthly",
    ]);

    assert!(output.contains("no observations match"));
}

#[test]
fn test_cli_countries() {
    let fixture = write_raw_fixture();
    let input = fixture.path().to_str().unwrap();

    let output = run_cli(&["climate-dashboard", "countries", "--quiet", "--input", input]);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["All", "Norway", "Peru"]);
}

#[test]
fn test_cli_export() {
    let fixture = write_raw_fixture();
    let input = fixture.path().to_str().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("norway.csv");

    let output = run_cli(&[
        "climate-dashboard",
        "export",
        "--quiet",
        "--input",
        input,
        "--country",
        "Norway",
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.contains("Exported 4 of 7 records"));

    let contents = std::fs::read_to_string(&output_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("dt,AverageTemperature,Latitude,Longitude,City,Country,Year,Month")
    );
    assert_eq!(lines.count(), 4);
}
