//! Single-code and all-station aggregation tests

use super::create_two_code_store;
use crate::aggregator::Aggregator;
use crate::config::{AggregationConfig, CodeSelector, YearRange};
use crate::constants::MONTHS_PER_YEAR;
use crate::error::TrendsError;
use crate::models::SeriesScope;
use crate::store::StationStore;
use crate::test_support::{complete_record, incomplete_record, record_with_values};

#[test]
fn test_single_code_averages_each_month() {
    let store = create_two_code_store();
    let config = AggregationConfig::default().with_code("AA");

    let series = Aggregator::new(&store).compute_monthly_average(&config).unwrap();

    assert_eq!(series.years(), (2000..=2005).collect::<Vec<_>>());
    for row in &series.rows {
        assert_eq!(row.month_values, [11.0; MONTHS_PER_YEAR]);
        assert_eq!(row.contributing_count, Some(2));
    }
    assert_eq!(
        series.scope,
        SeriesScope::Codes(CodeSelector::Single("AA".to_string()))
    );
}

#[test]
fn test_months_are_averaged_independently() {
    let mut first = [Some(0.0); MONTHS_PER_YEAR];
    let mut second = [Some(0.0); MONTHS_PER_YEAR];
    for month in 0..MONTHS_PER_YEAR {
        first[month] = Some(month as f64);
        second[month] = Some(month as f64 + 2.0);
    }
    let store = StationStore::from_records(vec![
        record_with_values("XX1", 1990, first),
        record_with_values("XX2", 1990, second),
    ]);

    let series = Aggregator::new(&store)
        .compute_monthly_average(&AggregationConfig::default())
        .unwrap();

    let row = series.get(1990).unwrap();
    for month in 0..MONTHS_PER_YEAR {
        assert_eq!(row.month_values[month], month as f64 + 1.0);
    }
}

#[test]
fn test_absent_code_uses_all_stations() {
    let store = create_two_code_store();

    let series = Aggregator::new(&store)
        .compute_monthly_average(&AggregationConfig::default())
        .unwrap();

    assert_eq!(series.scope, SeriesScope::AllStations);
    assert_eq!(series.years(), (2000..=2008).collect::<Vec<_>>());
    let overlap = series.get(2003).unwrap();
    assert_eq!(overlap.contributing_count, Some(3));
    assert_eq!(overlap.month_values[0], 14.0);
    assert_eq!(series.get(2007).unwrap().contributing_count, Some(1));
}

#[test]
fn test_incomplete_records_are_dropped() {
    let store = StationStore::from_records(vec![
        complete_record("US1", 2000, 10.0),
        incomplete_record("US2", 2000, 50.0),
        incomplete_record("US2", 2001, 50.0),
    ]);

    let series = Aggregator::new(&store)
        .compute_monthly_average(&AggregationConfig::default().with_code("US"))
        .unwrap();

    assert_eq!(series.years(), vec![2000]);
    let row = series.get(2000).unwrap();
    assert_eq!(row.month_values, [10.0; MONTHS_PER_YEAR]);
    assert_eq!(row.contributing_count, Some(1));
}

#[test]
fn test_min_coverage_filters_years() {
    let store = create_two_code_store();
    let config = AggregationConfig::default().with_min_coverage(2);

    let series = Aggregator::new(&store).compute_monthly_average(&config).unwrap();

    // 2006-2008 only have BB001
    assert_eq!(series.years(), (2000..=2005).collect::<Vec<_>>());
}

#[test]
fn test_min_coverage_zero_keeps_every_reported_year() {
    let store = create_two_code_store();
    let config = AggregationConfig::default().with_min_coverage(0);

    let series = Aggregator::new(&store).compute_monthly_average(&config).unwrap();

    assert_eq!(series.len(), 9);
    assert!(
        series
            .rows
            .iter()
            .all(|row| row.contributing_count.unwrap() >= 1)
    );
}

#[test]
fn test_year_range_does_not_clip_without_full_range() {
    let store = create_two_code_store();
    let config = AggregationConfig::default()
        .with_code("BB")
        .with_year_range(YearRange::new(2003, 2004).unwrap());

    let series = Aggregator::new(&store).compute_monthly_average(&config).unwrap();

    assert_eq!(series.years(), (2002..=2008).collect::<Vec<_>>());
}

#[test]
fn test_unknown_code_gives_empty_series() {
    let store = create_two_code_store();

    let series = Aggregator::new(&store)
        .compute_monthly_average(&AggregationConfig::default().with_code("ZZ"))
        .unwrap();

    assert!(series.is_empty());
}

#[test]
fn test_inverted_year_range_is_config_error() {
    let store = create_two_code_store();
    let config = AggregationConfig {
        year_range: YearRange {
            start: 2010,
            end: 2000,
        },
        ..AggregationConfig::default()
    };

    let result = Aggregator::new(&store).compute_monthly_average(&config);

    assert!(matches!(result, Err(TrendsError::Config { .. })));
}

#[test]
fn test_prefix_match_is_case_sensitive() {
    let store = create_two_code_store();

    let series = Aggregator::new(&store)
        .compute_monthly_average(&AggregationConfig::default().with_code("aa"))
        .unwrap();

    assert!(series.is_empty());
}
