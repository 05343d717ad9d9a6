//! Shared fixtures for unit tests

use crate::constants::MONTHS_PER_YEAR;
use crate::models::StationRecord;

#[path = "../tests/common/mod.rs"]
mod lines;

pub use lines::format_record;

/// A station-year with every month set to `value`
pub fn complete_record(station_id: &str, year: i32, value: f64) -> StationRecord {
    record_with_values(station_id, year, [Some(value); MONTHS_PER_YEAR])
}

/// A station-year with explicit (possibly missing) monthly values
pub fn record_with_values(
    station_id: &str,
    year: i32,
    monthly_values: [Option<f64>; MONTHS_PER_YEAR],
) -> StationRecord {
    StationRecord {
        station_id: station_id.to_string(),
        year,
        monthly_values,
        monthly_flags: Default::default(),
    }
}

/// A station-year with one missing month
pub fn incomplete_record(station_id: &str, year: i32, value: f64) -> StationRecord {
    let mut values = [Some(value); MONTHS_PER_YEAR];
    values[5] = None;
    record_with_values(station_id, year, values)
}

/// Complete records for every year of `start..=end`
pub fn station_years(station_id: &str, start: i32, end: i32, value: f64) -> Vec<StationRecord> {
    (start..=end)
        .map(|year| complete_record(station_id, year, value))
        .collect()
}
