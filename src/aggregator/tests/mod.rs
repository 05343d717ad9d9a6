//! Tests for the monthly average aggregator
//!
//! Covers single-code selection, coverage filtering, full-range station
//! selection, and code-group combination.

pub mod single_code;

use crate::store::StationStore;
use crate::test_support::station_years;

/// Two codes with overlapping but unequal year coverage
///
/// AA reports 2000-2005 from two stations, BB reports 2002-2008 from one.
pub fn create_two_code_store() -> StationStore {
    let mut records = station_years("AA001", 2000, 2005, 10.0);
    records.extend(station_years("AA002", 2000, 2005, 12.0));
    records.extend(station_years("BB001", 2002, 2008, 20.0));
    StationStore::from_records(records)
}
