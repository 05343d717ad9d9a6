//! GHCN Trends Library
//!
//! A Rust library for turning GHCN-M monthly station temperature records
//! into regional and global annual temperature series.
//!
//! This library provides tools for:
//! - Parsing fixed-width GHCN-M v4 station records
//! - Holding station-years in a read-only, ordered store
//! - Averaging monthly values across station subsets with coverage rules
//! - Combining station-code groups without coverage bias
//! - Calendar-weighted annual means
//! - Reading and writing aggregate tables
//! - Presenting aggregates by month, as an overlay, or annually

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod error;
pub mod models;
pub mod parser;
pub mod persistence;
pub mod presenter;
pub mod session;
pub mod store;
pub mod weighting;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use aggregator::Aggregator;
pub use config::{AggregationConfig, CodeSelector, YearRange};
pub use discovery::DataSource;
pub use error::{ParseError, Result, TrendsError};
pub use models::{AggregateSeries, SeriesScope, StationRecord, YearlyAggregate};
pub use parser::RecordLayout;
pub use presenter::{DisplayMode, Presenter, Renderer, TableRenderer};
pub use session::Session;
pub use store::StationStore;
pub use weighting::annual_average;
