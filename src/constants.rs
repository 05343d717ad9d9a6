//! Application constants for the GHCN trends processor
//!
//! This module contains record layout widths, default aggregation settings,
//! and the data-source catalogue used throughout the application.

// =============================================================================
// Record Layout
// =============================================================================

/// Width of the GHCN-M v4 station identifier
pub const STATION_ID_WIDTH: usize = 11;

/// Width of the year field
pub const YEAR_WIDTH: usize = 4;

/// Width of the element tag (e.g. TAVG)
pub const ELEMENT_WIDTH: usize = 4;

/// Width of a single monthly value field
pub const VALUE_WIDTH: usize = 5;

/// Width of the DM/QC/DS flag triplet following each value
pub const FLAG_WIDTH: usize = 3;

/// Raw value used by GHCN-M for "no measurement"
pub const MISSING_VALUE: i32 = -9999;

/// Raw values are stored in hundredths of a degree
pub const VALUE_SCALE: f64 = 100.0;

// =============================================================================
// Calendar
// =============================================================================

pub const MONTHS_PER_YEAR: usize = 12;

/// Column names used in the persisted aggregate table
pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

pub const YEAR_COLUMN: &str = "Year";

/// Day counts for a common year
pub const COMMON_YEAR_DAYS: [u32; MONTHS_PER_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Years divisible by four that are nevertheless treated as common years
pub const NON_LEAP_OVERRIDES: &[i32] = &[1800, 1900, 2100];

// =============================================================================
// Aggregation Defaults
// =============================================================================

pub const DEFAULT_START_YEAR: i32 = 1600;
pub const DEFAULT_END_YEAR: i32 = 2018;
pub const DEFAULT_MIN_COVERAGE: usize = 1;

/// Label used in diagnostics when no station code is selected
pub const ALL_STATIONS_LABEL: &str = "ALL";

// =============================================================================
// Data Sources
// =============================================================================

/// Directory name used under the platform data dir
pub const DATA_DIR_NAME: &str = "ghcn-trends";

/// Fallback data directory relative to the working directory
pub const FALLBACK_DATA_DIR: &str = "data/GHCN_V4";

pub mod data_sources {
    pub const QCU_ID: &str = "GHCN_QCU";
    pub const QCF_ID: &str = "GHCN_QCF";
    pub const QFE_ID: &str = "GHCN_QFE";

    pub const QCU_DESC: &str = "GHCN-M, QCU: Quality control, unadjusted";
    pub const QCF_DESC: &str = "GHCN-M, QCF: Quality control, adjusted";
    pub const QFE_DESC: &str = "GHCN-M, QFE: Quality control, adjusted";

    /// Data file name pattern, `{}` is replaced by the source suffix
    pub const FILE_PATTERN: &str = "ghcnm.tavg.v4.*.{}.dat";
}
