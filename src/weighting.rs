//! Calendar-weighted annual averages.
//!
//! Each month contributes in proportion to its number of days. Leap years
//! follow the divisible-by-four rule with a fixed list of century years that
//! are treated as common years; 2000 and 2400 therefore remain leap years.

use crate::constants::{COMMON_YEAR_DAYS, MONTHS_PER_YEAR, NON_LEAP_OVERRIDES};
use crate::error::{Result, TrendsError};

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && !NON_LEAP_OVERRIDES.contains(&year)
}

/// Days in each month of `year`
pub fn month_weights(year: i32) -> [u32; MONTHS_PER_YEAR] {
    let mut weights = COMMON_YEAR_DAYS;
    if is_leap_year(year) {
        weights[1] = 29;
    }
    weights
}

pub fn days_in_year(year: i32) -> u32 {
    month_weights(year).iter().sum()
}

/// Day-weighted mean of twelve monthly values
///
/// The mean is taken around the first month's value, so a constant input is
/// returned unchanged.
pub fn annual_average(month_values: &[f64], year: i32) -> Result<f64> {
    if month_values.len() != MONTHS_PER_YEAR {
        return Err(TrendsError::Value {
            expected: MONTHS_PER_YEAR,
            found: month_values.len(),
        });
    }

    let weights = month_weights(year);
    let base = month_values[0];
    let weighted_offset: f64 = month_values
        .iter()
        .zip(weights)
        .map(|(value, days)| (value - base) * f64::from(days))
        .sum();

    Ok(base + weighted_offset / f64::from(days_in_year(year)))
}
