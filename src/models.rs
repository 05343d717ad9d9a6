//! Core data structures for GHCN trend processing.
//!
//! Defines station records as parsed from the monthly data files,
//! per-year aggregates, and the aggregate series handed to presenters.

use crate::config::CodeSelector;
use crate::constants::{ALL_STATIONS_LABEL, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One station-year of monthly observations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_id: String,
    pub year: i32,
    /// Degrees Celsius, `None` where the station reported no measurement
    pub monthly_values: [Option<f64>; MONTHS_PER_YEAR],
    /// Raw DM/QC/DS flag triplet for each month
    pub monthly_flags: [String; MONTHS_PER_YEAR],
}

impl StationRecord {
    /// True when every month carries a measurement
    pub fn is_complete(&self) -> bool {
        self.monthly_values.iter().all(Option::is_some)
    }

    /// Monthly values of a complete record
    pub fn complete_values(&self) -> Option<[f64; MONTHS_PER_YEAR]> {
        let mut values = [0.0; MONTHS_PER_YEAR];
        for (slot, value) in values.iter_mut().zip(&self.monthly_values) {
            *slot = (*value)?;
        }
        Some(values)
    }
}

/// Mean monthly values for a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    pub year: i32,
    pub month_values: [f64; MONTHS_PER_YEAR],
    /// Stations contributing to this year, unknown for combined or reloaded series
    pub contributing_count: Option<usize>,
}

/// Which stations an aggregate series was computed over
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeriesScope {
    #[default]
    AllStations,
    Codes(CodeSelector),
}

impl From<Option<CodeSelector>> for SeriesScope {
    fn from(code: Option<CodeSelector>) -> Self {
        code.map_or(SeriesScope::AllStations, SeriesScope::Codes)
    }
}

impl fmt::Display for SeriesScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesScope::AllStations => f.write_str(ALL_STATIONS_LABEL),
            SeriesScope::Codes(selector) => write!(f, "{}", selector),
        }
    }
}

/// Year-ordered aggregate rows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateSeries {
    pub scope: SeriesScope,
    pub rows: Vec<YearlyAggregate>,
}

impl AggregateSeries {
    pub fn new(scope: SeriesScope, mut rows: Vec<YearlyAggregate>) -> Self {
        rows.sort_by_key(|row| row.year);
        Self { scope, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|row| row.year).collect()
    }

    pub fn get(&self, year: i32) -> Option<&YearlyAggregate> {
        self.rows
            .binary_search_by_key(&year, |row| row.year)
            .ok()
            .map(|index| &self.rows[index])
    }

    /// Per-year station counts, `None` unless every row carries one
    pub fn station_counts(&self) -> Option<Vec<(i32, usize)>> {
        self.rows
            .iter()
            .map(|row| row.contributing_count.map(|count| (row.year, count)))
            .collect()
    }
}
