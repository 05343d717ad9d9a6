//! Monthly average aggregation across station subsets.
//!
//! Computes, for each year, the mean of every month over all stations that
//! reported a complete year. Station-years with any missing month are
//! dropped before averaging rather than averaged month by month.
//!
//! A code group is aggregated code by code and the per-code series are then
//! averaged, keeping only years that every code covers. This stops a code
//! with dense coverage in some decades from dominating the combined mean.

use crate::config::{AggregationConfig, CodeSelector};
use crate::constants::{ALL_STATIONS_LABEL, MONTHS_PER_YEAR};
use crate::error::{Result, TrendsError};
use crate::models::{AggregateSeries, SeriesScope, StationRecord, YearlyAggregate};
use crate::store::{StationStore, stations_with_full_coverage};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

/// Read-only aggregation over a loaded station store
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    store: &'a StationStore,
}

/// Running per-month sums for one year
#[derive(Debug, Clone, Copy, Default)]
struct MonthSums {
    sums: [f64; MONTHS_PER_YEAR],
    count: usize,
}

impl MonthSums {
    fn add(&mut self, values: &[f64; MONTHS_PER_YEAR]) {
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.count += 1;
    }

    fn means(&self) -> [f64; MONTHS_PER_YEAR] {
        self.sums.map(|sum| sum / self.count as f64)
    }
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a StationStore) -> Self {
        Self { store }
    }

    /// Compute per-year monthly averages for the configured station selection
    pub fn compute_monthly_average(&self, config: &AggregationConfig) -> Result<AggregateSeries> {
        config.validate()?;
        let start_time = Instant::now();

        let series = match &config.code {
            None => self.single_code(None, config)?,
            Some(CodeSelector::Single(code)) => self.single_code(Some(code.as_str()), config)?,
            Some(CodeSelector::Group(codes)) => self.code_group(codes, config)?,
        };

        debug!(
            "Aggregated {} years for {} in {:.2}s",
            series.len(),
            series.scope,
            start_time.elapsed().as_secs_f64()
        );
        Ok(series)
    }

    fn single_code(&self, code: Option<&str>, config: &AggregationConfig) -> Result<AggregateSeries> {
        let label = code.unwrap_or(ALL_STATIONS_LABEL);
        let mut records: Vec<(&StationRecord, [f64; MONTHS_PER_YEAR])> = self
            .store
            .filter_by_code_prefix(code.unwrap_or(""))
            .into_iter()
            .filter_map(|record| record.complete_values().map(|values| (record, values)))
            .collect();
        debug!("{}: {} complete station-years", label, records.len());

        if config.full_range {
            let start_time = Instant::now();
            let stations =
                stations_with_full_coverage(records.iter().map(|(r, _)| *r), config.year_range);
            records.retain(|(record, _)| stations.contains(record.station_id.as_str()));
            info!(
                "{}: found {} stations covering {} in {:.2}s",
                label,
                stations.len(),
                config.year_range,
                start_time.elapsed().as_secs_f64()
            );
        }

        let mut by_year: BTreeMap<i32, MonthSums> = BTreeMap::new();
        for (record, values) in &records {
            by_year.entry(record.year).or_default().add(values);
        }

        let rows: Vec<YearlyAggregate> = by_year
            .into_iter()
            .filter(|(_, sums)| sums.count >= config.min_coverage)
            .filter(|(year, _)| !config.full_range || config.year_range.contains(*year))
            .map(|(year, sums)| YearlyAggregate {
                year,
                month_values: sums.means(),
                contributing_count: Some(sums.count),
            })
            .collect();

        if config.verbose && config.full_range {
            for row in &rows {
                info!(
                    "{}, {}, {} stations",
                    row.year,
                    label,
                    row.contributing_count.unwrap_or_default()
                );
            }
        }

        let scope = code.map_or(SeriesScope::AllStations, |c| {
            SeriesScope::Codes(CodeSelector::Single(c.to_string()))
        });
        Ok(AggregateSeries::new(scope, rows))
    }

    fn code_group(&self, codes: &[String], config: &AggregationConfig) -> Result<AggregateSeries> {
        if codes.is_empty() {
            return Err(TrendsError::config("code group must name at least one code"));
        }

        // Per-code runs keep the year window and verbosity only
        let member_config = AggregationConfig {
            code: None,
            year_range: config.year_range,
            verbose: config.verbose,
            ..AggregationConfig::default()
        };

        let mut by_year: BTreeMap<i32, MonthSums> = BTreeMap::new();
        for code in codes {
            let series = self.single_code(Some(code.as_str()), &member_config)?;
            for row in &series.rows {
                by_year.entry(row.year).or_default().add(&row.month_values);
            }
        }

        let rows: Vec<YearlyAggregate> = by_year
            .into_iter()
            .filter(|(_, sums)| sums.count == codes.len())
            .map(|(year, sums)| YearlyAggregate {
                year,
                month_values: sums.means(),
                contributing_count: None,
            })
            .collect();

        Ok(AggregateSeries::new(
            SeriesScope::Codes(CodeSelector::Group(codes.to_vec())),
            rows,
        ))
    }
}

/// Convenience wrapper for one-off computations
pub fn compute_monthly_average(
    store: &StationStore,
    config: &AggregationConfig,
) -> Result<AggregateSeries> {
    Aggregator::new(store).compute_monthly_average(config)
}

#[cfg(test)]
mod tests;
