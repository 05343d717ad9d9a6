//! In-memory station record table.
//!
//! The store is filled once from a GHCN-M data file and is read-only
//! afterwards. Records are keyed by (station id, year) and iterate in that
//! order, which keeps every downstream average deterministic.

use crate::config::YearRange;
use crate::error::{Result, TrendsError};
use crate::models::StationRecord;
use crate::parser::{RecordLayout, parse_record};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// All parsed station records
#[derive(Debug, Clone, Default)]
pub struct StationStore {
    records: BTreeMap<(String, i32), StationRecord>,
}

impl StationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and insert every non-blank row
    ///
    /// A later row with the same station id and year replaces the earlier one.
    /// The first unparseable row aborts the load with its 1-based line number.
    pub fn load<I, S>(rows: I, layout: &RecordLayout) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for (index, row) in rows.into_iter().enumerate() {
            store.insert_line(index, row.as_ref(), layout)?;
        }
        Ok(store)
    }

    /// Load a GHCN-M data file
    pub fn from_path(path: &Path, layout: &RecordLayout, show_progress: bool) -> Result<Self> {
        let start_time = Instant::now();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let spinner = show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} lines")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Loading {}", path.display()));
            pb
        });

        let mut store = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(pb) = &spinner {
                pb.inc(1);
            }
            store.insert_line(index, &line, layout)?;
        }

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        info!(
            "Loaded {} records from {} stations in {:.2}s",
            store.len(),
            store.station_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(store)
    }

    /// Build a store from already parsed records, last-wins on duplicate keys
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = StationRecord>,
    {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Parse one raw row at 0-based `index`; blank rows are skipped
    fn insert_line(&mut self, index: usize, line: &str, layout: &RecordLayout) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let record = parse_record(line, layout).map_err(|source| TrendsError::Load {
            line: index + 1,
            source,
        })?;
        self.insert(record);
        Ok(())
    }

    fn insert(&mut self, record: StationRecord) {
        let key = (record.station_id.clone(), record.year);
        if self.records.insert(key, record).is_some() {
            debug!("Duplicate station-year replaced by later record");
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &StationRecord> {
        self.records.values()
    }

    pub fn get(&self, station_id: &str, year: i32) -> Option<&StationRecord> {
        self.records.get(&(station_id.to_string(), year))
    }

    /// Number of distinct stations
    pub fn station_count(&self) -> usize {
        self.records
            .keys()
            .map(|(id, _)| id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Earliest and latest year present
    pub fn year_span(&self) -> Option<YearRange> {
        let mut years = self.records.keys().map(|(_, year)| *year);
        let first = years.next()?;
        let (start, end) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(YearRange { start, end })
    }

    /// Records whose station id starts with `prefix` (case-sensitive)
    pub fn filter_by_code_prefix(&self, prefix: &str) -> Vec<&StationRecord> {
        self.records
            .values()
            .filter(|record| record.station_id.starts_with(prefix))
            .collect()
    }

    /// Records with a year inside the inclusive range
    pub fn filter_by_year_range(&self, range: YearRange) -> Vec<&StationRecord> {
        self.records
            .values()
            .filter(|record| range.contains(record.year))
            .collect()
    }

    /// Stations with a record for every year in the range
    pub fn stations_with_full_coverage(&self, range: YearRange) -> BTreeSet<&str> {
        stations_with_full_coverage(self.records.values(), range)
    }
}

/// Stations among `records` having exactly one record per year of `range`
///
/// Counts in-range records per station; a station qualifies when its count
/// equals the number of years in the range. Callers must pass records that are
/// unique per (station, year), as the store guarantees.
pub fn stations_with_full_coverage<'a, I>(records: I, range: YearRange) -> BTreeSet<&'a str>
where
    I: IntoIterator<Item = &'a StationRecord>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for record in records {
        if range.contains(record.year) {
            *counts.entry(record.station_id.as_str()).or_insert(0) += 1;
        }
    }

    let span = range.span();
    counts
        .into_iter()
        .filter(|&(_, count)| count == span)
        .map(|(station, _)| station)
        .collect()
}
