//! Fixed-width GHCN-M station record parsing.
//!
//! Each data line holds one station-year:
//!
//! ```text
//! ID          YEAR ELEM VALUE DMQCDS x 12
//! ACW00011604 1961 TAVG  -142  k   ...
//! ```
//!
//! Values are integers in hundredths of a degree with `-9999` marking a
//! missing month. The sentinel is turned into `None` here and never leaves
//! this module.

use crate::constants::{
    ELEMENT_WIDTH, FLAG_WIDTH, MISSING_VALUE, MONTHS_PER_YEAR, STATION_ID_WIDTH, VALUE_SCALE,
    VALUE_WIDTH, YEAR_WIDTH,
};
use crate::error::ParseError;
use crate::models::StationRecord;
use serde::{Deserialize, Serialize};

/// Field widths of a station record line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub station_id_width: usize,
    /// Element tag between year and values, zero when the file has none
    pub element_width: usize,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self::ghcn_v4()
    }
}

impl RecordLayout {
    /// GHCN-M version 4 monthly layout (115 columns)
    pub const fn ghcn_v4() -> Self {
        Self {
            station_id_width: STATION_ID_WIDTH,
            element_width: ELEMENT_WIDTH,
        }
    }

    /// Layout without an element tag: `<id><year><value><flags>...`
    pub const fn without_element(station_id_width: usize) -> Self {
        Self {
            station_id_width,
            element_width: 0,
        }
    }

    fn values_offset(&self) -> usize {
        self.station_id_width + YEAR_WIDTH + self.element_width
    }

    /// Total line width in bytes
    pub fn line_width(&self) -> usize {
        self.values_offset() + MONTHS_PER_YEAR * (VALUE_WIDTH + FLAG_WIDTH)
    }
}

/// Parse one station line
pub fn parse_record(line: &str, layout: &RecordLayout) -> Result<StationRecord, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let expected = layout.line_width();
    if line.len() != expected {
        return Err(ParseError::LineLength {
            expected,
            found: line.len(),
        });
    }

    let station_id = field(line, 0, layout.station_id_width, "station id")?.trim();
    if station_id.is_empty() {
        return Err(ParseError::MissingStationId);
    }

    let year_text = field(line, layout.station_id_width, YEAR_WIDTH, "year")?;
    let year = parse_year(year_text)?;

    let mut monthly_values = [None; MONTHS_PER_YEAR];
    let mut monthly_flags: [String; MONTHS_PER_YEAR] = Default::default();

    let group_width = VALUE_WIDTH + FLAG_WIDTH;
    for month in 0..MONTHS_PER_YEAR {
        let start = layout.values_offset() + month * group_width;
        let value_text = field(line, start, VALUE_WIDTH, "value")?;
        monthly_values[month] = parse_value(value_text)?;
        monthly_flags[month] = field(line, start + VALUE_WIDTH, FLAG_WIDTH, "flag")?.to_string();
    }

    Ok(StationRecord {
        station_id: station_id.to_string(),
        year,
        monthly_values,
        monthly_flags,
    })
}

fn field<'a>(line: &'a str, start: usize, width: usize, name: &str) -> Result<&'a str, ParseError> {
    line.get(start..start + width)
        .ok_or_else(|| ParseError::InvalidField {
            field: name.to_string(),
            value: line.to_string(),
        })
}

fn parse_year(text: &str) -> Result<i32, ParseError> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidField {
            field: "year".to_string(),
            value: text.to_string(),
        });
    }
    text.parse::<i32>().map_err(|_| ParseError::InvalidField {
        field: "year".to_string(),
        value: text.to_string(),
    })
}

/// Convert a raw hundredths field to degrees, `None` for the missing sentinel
fn parse_value(text: &str) -> Result<Option<f64>, ParseError> {
    let raw = text
        .trim()
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidField {
            field: "value".to_string(),
            value: text.to_string(),
        })?;

    if raw == MISSING_VALUE {
        Ok(None)
    } else {
        Ok(Some(f64::from(raw) / VALUE_SCALE))
    }
}
