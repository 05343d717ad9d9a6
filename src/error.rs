//! Error handling for GHCN trend processing.
//!
//! Provides the error taxonomy for record parsing, bulk loading,
//! configuration, aggregation and presentation failures.

use std::path::PathBuf;
use thiserror::Error;

/// A single station line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line length {found} does not match the expected record width {expected}")]
    LineLength { expected: usize, found: usize },

    #[error("invalid {field} field: '{value}'")]
    InvalidField { field: String, value: String },

    #[error("station id field is blank")]
    MissingStationId,
}

#[derive(Error, Debug)]
pub enum TrendsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to load station records at line {line}")]
    Load {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown data source: {name}")]
    UnknownDataSource { name: String },

    #[error("No data to present: {context}")]
    EmptyData { context: String },

    #[error("Invalid state: {message}")]
    State { message: String },

    #[error("Expected {expected} monthly values, found {found}")]
    Value { expected: usize, found: usize },

    #[error("Invalid aggregate file {path}: {reason}")]
    Format { path: PathBuf, reason: String },
}

impl TrendsError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    pub fn empty_data(context: impl Into<String>) -> Self {
        Self::EmptyData {
            context: context.into(),
        }
    }

    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendsError>;
