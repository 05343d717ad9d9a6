//! Presentation of aggregate series.
//!
//! The presenter turns an aggregate series into plot-ready data for one of
//! three display modes and hands it to a [`Renderer`]. Only a plain text
//! table renderer ships with the crate.

use crate::config::CodeSelector;
use crate::constants::{MONTH_NAMES, MONTHS_PER_YEAR};
use crate::discovery::DataSource;
use crate::error::{Result, TrendsError};
use crate::models::{AggregateSeries, SeriesScope};
use crate::weighting::annual_average;
use chrono::Month;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// What to plot from an aggregate series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// One month across all years
    Month(Month),
    /// All twelve months, one line each
    Overlay,
    /// Calendar-weighted annual mean
    Annual,
}

impl FromStr for DisplayMode {
    type Err = TrendsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OVERLAY" => Ok(DisplayMode::Overlay),
            "ANNUAL" => Ok(DisplayMode::Annual),
            other => other.parse::<Month>().map(DisplayMode::Month).map_err(|_| {
                TrendsError::config(format!(
                    "unknown display mode '{}' (expected a month name, OVERLAY or ANNUAL)",
                    s
                ))
            }),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Month(month) => f.write_str(MONTH_NAMES[month_index(*month)]),
            DisplayMode::Overlay => f.write_str("OVERLAY"),
            DisplayMode::Annual => f.write_str("ANNUAL"),
        }
    }
}

fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

/// One labelled line of (year, value) points
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<(i32, f64)>,
}

/// Output backend for prepared series
pub trait Renderer {
    fn render(&mut self, title: &str, series: &[PlotSeries]) -> Result<()>;
}

/// Builds plot data and titles for a data source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presenter {
    source: Option<DataSource>,
}

impl Presenter {
    pub fn new(source: Option<DataSource>) -> Self {
        Self { source }
    }

    /// Chart title: source description plus the selected code(s)
    pub fn title(&self, scope: &SeriesScope) -> String {
        let mut title = self
            .source
            .map(|source| source.description().to_string())
            .unwrap_or_default();
        match scope {
            SeriesScope::AllStations => {}
            SeriesScope::Codes(CodeSelector::Single(code)) => {
                title.push_str("   |   Code: ");
                title.push_str(code);
            }
            SeriesScope::Codes(CodeSelector::Group(codes)) => {
                title.push_str("\nCode: ");
                title.push_str(&codes.join(" "));
            }
        }
        title
    }

    /// Plot-ready series for `mode`
    pub fn prepare(&self, series: &AggregateSeries, mode: DisplayMode) -> Result<Vec<PlotSeries>> {
        if series.is_empty() {
            return Err(TrendsError::empty_data(format!(
                "cannot show {} for an aggregate with no years",
                mode
            )));
        }

        let month_series = |month: usize| PlotSeries {
            label: MONTH_NAMES[month].to_string(),
            points: series
                .rows
                .iter()
                .map(|row| (row.year, row.month_values[month]))
                .collect(),
        };

        match mode {
            DisplayMode::Month(month) => Ok(vec![month_series(month_index(month))]),
            DisplayMode::Overlay => Ok((0..MONTHS_PER_YEAR).map(month_series).collect()),
            DisplayMode::Annual => {
                let points = series
                    .rows
                    .iter()
                    .map(|row| Ok((row.year, annual_average(&row.month_values, row.year)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(vec![PlotSeries {
                    label: "ANNUAL".to_string(),
                    points,
                }])
            }
        }
    }

    /// Prepare and render in one step
    pub fn present<R: Renderer>(
        &self,
        series: &AggregateSeries,
        mode: DisplayMode,
        renderer: &mut R,
    ) -> Result<()> {
        let plot = self.prepare(series, mode)?;
        renderer.render(&self.title(&series.scope), &plot)
    }
}

/// Writes series as an aligned text table, one row per year
pub struct TableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn render(&mut self, title: &str, series: &[PlotSeries]) -> Result<()> {
        let years = series.first().map(|s| s.points.as_slice()).unwrap_or(&[]);
        if let Some(line) = series.iter().find(|line| line.points.len() != years.len()) {
            return Err(TrendsError::config(format!(
                "plot series '{}' has {} points, expected {}",
                line.label,
                line.points.len(),
                years.len()
            )));
        }

        if !title.is_empty() {
            writeln!(self.out, "{}", title)?;
            writeln!(self.out)?;
        }

        write!(self.out, "{:>6}", "Year")?;
        for line in series {
            write!(self.out, " {:>8}", line.label)?;
        }
        writeln!(self.out)?;

        for (index, (year, _)) in years.iter().enumerate() {
            write!(self.out, "{:>6}", year)?;
            for line in series {
                write!(self.out, " {:>8.2}", line.points[index].1)?;
            }
            writeln!(self.out)?;
        }

        self.out.flush()?;
        Ok(())
    }
}
