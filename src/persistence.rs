//! Tabular storage for computed aggregates.
//!
//! Aggregates are written as CSV with a `Year` column followed by one column
//! per month (`JAN` .. `DEC`). Station counts are not stored, so a series read
//! back from disk carries no per-year counts.

use crate::constants::{MONTH_NAMES, MONTHS_PER_YEAR, YEAR_COLUMN};
use crate::error::{Result, TrendsError};
use crate::models::{AggregateSeries, SeriesScope, YearlyAggregate};
use polars::prelude::*;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Convert a series into a `Year, JAN, ..., DEC` frame
pub fn to_dataframe(series: &AggregateSeries) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(MONTHS_PER_YEAR + 1);
    columns.push(Column::new(YEAR_COLUMN.into(), series.years()));

    for (month, name) in MONTH_NAMES.iter().enumerate() {
        let values: Vec<f64> = series
            .rows
            .iter()
            .map(|row| row.month_values[month])
            .collect();
        columns.push(Column::new((*name).into(), values));
    }

    Ok(DataFrame::new(columns)?)
}

/// Rebuild aggregate rows from a `Year, JAN, ..., DEC` frame
pub fn from_dataframe(df: &DataFrame, path: &Path) -> Result<Vec<YearlyAggregate>> {
    let years = required_column(df, YEAR_COLUMN, &DataType::Int32, path)?;
    let years = years.as_materialized_series().i32()?;

    let mut months = Vec::with_capacity(MONTHS_PER_YEAR);
    for name in MONTH_NAMES {
        months.push(required_column(df, name, &DataType::Float64, path)?);
    }
    let months = months
        .iter()
        .map(|column| column.as_materialized_series().f64().cloned())
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for (index, year) in years.into_iter().enumerate() {
        let year = year.ok_or_else(|| {
            TrendsError::format(path, format!("missing year in row {}", index + 1))
        })?;
        let mut month_values = [0.0; MONTHS_PER_YEAR];
        for (month, values) in months.iter().enumerate() {
            month_values[month] = values.get(index).ok_or_else(|| {
                TrendsError::format(
                    path,
                    format!("missing {} value for {}", MONTH_NAMES[month], year),
                )
            })?;
        }
        rows.push(YearlyAggregate {
            year,
            month_values,
            contributing_count: None,
        });
    }

    Ok(rows)
}

fn required_column(df: &DataFrame, name: &str, dtype: &DataType, path: &Path) -> Result<Column> {
    let column = df
        .column(name)
        .map_err(|_| TrendsError::format(path, format!("missing column '{}'", name)))?;
    Ok(column.cast(dtype)?)
}

/// Write a series to `path`, replacing any existing file
pub fn write_averages(series: &AggregateSeries, path: &Path) -> Result<()> {
    let mut df = to_dataframe(series)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    CsvWriter::new(temp.as_file_mut())
        .include_header(true)
        .finish(&mut df)?;
    temp.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} years to {}", series.len(), path.display());
    Ok(())
}

/// Read a series previously written by [`write_averages`]
pub fn read_averages(path: &Path, scope: SeriesScope) -> Result<AggregateSeries> {
    if !path.exists() {
        return Err(TrendsError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("aggregate file not found: {}", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let rows = from_dataframe(&df, path)?;
    debug!("Read {} years from {}", rows.len(), path.display());
    Ok(AggregateSeries::new(scope, rows))
}
