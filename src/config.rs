//! Configuration management and validation.
//!
//! Provides the aggregation settings consumed by the aggregator: which
//! station codes to include, the year window, and coverage requirements.

use crate::constants::{DEFAULT_END_YEAR, DEFAULT_MIN_COVERAGE, DEFAULT_START_YEAR};
use crate::error::{Result, TrendsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range of calendar years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: i32, end: i32) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(TrendsError::config(format!(
                "year range start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Number of years in the range
    pub fn span(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end.abs_diff(self.start) as usize).saturating_add(1)
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_YEAR,
            end: DEFAULT_END_YEAR,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Station-id prefix selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeSelector {
    /// Stations whose id starts with this prefix
    Single(String),
    /// Each prefix is averaged on its own, then the per-code series are averaged
    Group(Vec<String>),
}

impl CodeSelector {
    /// Build a selector from CLI-style code lists: one code is `Single`, more is a `Group`
    pub fn from_codes(codes: Vec<String>) -> Option<Self> {
        match codes.len() {
            0 => None,
            1 => codes.into_iter().next().map(CodeSelector::Single),
            _ => Some(CodeSelector::Group(codes)),
        }
    }
}

impl fmt::Display for CodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeSelector::Single(code) => f.write_str(code),
            CodeSelector::Group(codes) => f.write_str(&codes.join(" ")),
        }
    }
}

/// Settings for a monthly-average computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Station code selection, `None` for every station
    pub code: Option<CodeSelector>,

    /// Years considered for full-range selection and clipping
    pub year_range: YearRange,

    /// Minimum contributing stations for a year to be kept
    pub min_coverage: usize,

    /// Only use stations with a complete record for every year in range
    pub full_range: bool,

    /// Emit a per-year station count line
    pub verbose: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            code: None,
            year_range: YearRange::default(),
            min_coverage: DEFAULT_MIN_COVERAGE,
            full_range: false,
            verbose: false,
        }
    }
}

impl AggregationConfig {
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(CodeSelector::Single(code.into()));
        self
    }

    pub fn with_code_group<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code = Some(CodeSelector::Group(
            codes.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn with_selector(mut self, code: Option<CodeSelector>) -> Self {
        self.code = code;
        self
    }

    pub fn with_year_range(mut self, year_range: YearRange) -> Self {
        self.year_range = year_range;
        self
    }

    pub fn with_min_coverage(mut self, min_coverage: usize) -> Self {
        self.min_coverage = min_coverage;
        self
    }

    pub fn with_full_range(mut self) -> Self {
        self.full_range = true;
        self
    }

    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Check settings that may have bypassed the constructors (e.g. deserialized)
    pub fn validate(&self) -> Result<()> {
        self.year_range.validate()?;
        if let Some(CodeSelector::Group(codes)) = &self.code {
            if codes.is_empty() {
                return Err(TrendsError::config("code group must name at least one code"));
            }
        }
        Ok(())
    }
}
