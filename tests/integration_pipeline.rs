//! End-to-end tests from a GHCN-M data directory to rendered output
//!
//! These tests write small synthetic GHCN-M v4 files to a temporary data
//! directory and drive the public session API the same way the CLI does.

mod common;

use common::format_record;
use ghcn_trends::{
    AggregationConfig, DataSource, DisplayMode, SeriesScope, Session, TableRenderer,
    TrendsError, YearRange,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DATA_FILE: &str = "ghcnm.tavg.v4.0.1.20200118.qcu.dat";

/// Write station-years with a constant raw value for every month
fn write_station(lines: &mut Vec<String>, id: &str, years: std::ops::RangeInclusive<i32>, raw: i32) {
    for year in years {
        lines.push(format_record(id, year, "TAVG", &[Some(raw); 12]));
    }
}

fn create_data_dir(temp_dir: &TempDir) -> std::path::PathBuf {
    let mut lines = Vec::new();
    write_station(&mut lines, "AAW00000001", 2000..=2005, 1000);
    write_station(&mut lines, "AAW00000002", 2000..=2005, 1200);
    write_station(&mut lines, "BBW00000001", 2002..=2008, 2000);

    // A station-year with a missing month is excluded from every average
    let mut gappy = [Some(9000); 12];
    gappy[3] = None;
    lines.push(format_record("AAW00000003", 2001, "TAVG", &gappy));

    let data_dir = temp_dir.path().join("ghcn");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join(DATA_FILE), lines.join("\n") + "\n").unwrap();
    data_dir
}

fn render(session: &Session, mode: DisplayMode) -> String {
    let mut renderer = TableRenderer::new(Vec::new());
    session.show(mode, &mut renderer).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn test_aggregate_code_group_from_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = create_data_dir(&temp_dir);

    let mut session = Session::new();
    let path = session.load_data(DataSource::Qcu, &data_dir).unwrap();
    assert!(path.ends_with(DATA_FILE));
    assert_eq!(session.store().unwrap().len(), 6 + 6 + 7 + 1);

    let series = session
        .compute(&AggregationConfig::default().with_code_group(["AA", "BB"]))
        .unwrap();

    assert_eq!(series.years(), vec![2002, 2003, 2004, 2005]);
    assert!((series.rows[0].month_values[0] - 15.5).abs() < 1e-9);

    let output = render(&session, DisplayMode::Annual);
    assert!(output.starts_with("GHCN-M, QCU: Quality control, unadjusted\nCode: AA BB"));
    assert!(output.contains("  2005    15.50"));
}

#[test]
fn test_full_range_aggregate_round_trips_through_csv() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = create_data_dir(&temp_dir);
    let output = temp_dir.path().join("aa_averages.csv");

    let mut session = Session::new();
    session.load_data(DataSource::Qcu, &data_dir).unwrap();
    let config = AggregationConfig::default()
        .with_code("AA")
        .with_year_range(YearRange::new(2001, 2004).unwrap())
        .with_full_range()
        .with_min_coverage(0)
        .with_verbose();
    let computed = session.compute(&config).unwrap().clone();
    session.save_averages(&output).unwrap();

    assert_eq!(computed.years(), vec![2001, 2002, 2003, 2004]);
    assert_eq!(
        computed.station_counts().unwrap(),
        vec![(2001, 2), (2002, 2), (2003, 2), (2004, 2)]
    );

    let mut reloaded = Session::new();
    let series = reloaded
        .load_averages(&output, DataSource::Qcu, computed.scope.clone())
        .unwrap();

    assert_eq!(series.years(), computed.years());
    for (read, written) in series.rows.iter().zip(&computed.rows) {
        for month in 0..12 {
            assert!((read.month_values[month] - written.month_values[month]).abs() < 1e-6);
        }
    }
    assert!(render(&reloaded, DisplayMode::Overlay).contains("   |   Code: AA"));
}

#[test]
fn test_unknown_source_and_missing_data() {
    assert!(matches!(
        "GHCN_XYZ".parse::<DataSource>(),
        Err(TrendsError::UnknownDataSource { .. })
    ));

    let temp_dir = TempDir::new().unwrap();
    let data_dir = create_data_dir(&temp_dir);
    let mut session = Session::new();
    let result = session.load_data(DataSource::Qfe, &data_dir);
    assert!(matches!(result, Err(TrendsError::Config { .. })));
    assert!(session.store().is_none());
}

#[test]
fn test_malformed_data_file_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(DATA_FILE);
    fs::write(&path, "AAW000000012000TAVG   12\n").unwrap();

    let mut session = Session::new();
    let result = session.load_file(DataSource::Qcu, Path::new(&path));

    assert!(matches!(result, Err(TrendsError::Load { line: 1, .. })));
}

#[test]
fn test_empty_aggregate_cannot_be_rendered() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = create_data_dir(&temp_dir);

    let mut session = Session::new();
    session.load_data(DataSource::Qcu, &data_dir).unwrap();
    let series = session
        .compute(&AggregationConfig::default().with_code("CC"))
        .unwrap();
    assert!(series.is_empty());
    assert_eq!(series.scope, SeriesScope::Codes(ghcn_trends::CodeSelector::Single("CC".into())));

    let mut renderer = TableRenderer::new(Vec::new());
    assert!(matches!(
        session.show(DisplayMode::Annual, &mut renderer),
        Err(TrendsError::EmptyData { .. })
    ));
}
