//! Data source identification and data file discovery
//!
//! GHCN-M v4 releases are published as dated files, e.g.
//! `ghcnm.tavg.v4.0.1.20200118.qcu.dat`. A data directory may hold several
//! releases of each source; the newest release date wins.

use crate::constants::{DATA_DIR_NAME, FALLBACK_DATA_DIR, data_sources};
use crate::error::{Result, TrendsError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// GHCN-M monthly quality-control variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    /// Quality controlled, unadjusted
    Qcu,
    /// Quality controlled, adjusted
    Qcf,
    /// Quality controlled, adjusted and estimated
    Qfe,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [DataSource::Qcu, DataSource::Qcf, DataSource::Qfe];

    pub fn id(&self) -> &'static str {
        match self {
            DataSource::Qcu => data_sources::QCU_ID,
            DataSource::Qcf => data_sources::QCF_ID,
            DataSource::Qfe => data_sources::QFE_ID,
        }
    }

    /// Human readable description used in chart titles
    pub fn description(&self) -> &'static str {
        match self {
            DataSource::Qcu => data_sources::QCU_DESC,
            DataSource::Qcf => data_sources::QCF_DESC,
            DataSource::Qfe => data_sources::QFE_DESC,
        }
    }

    /// File name suffix (`qcu`, `qcf`, `qfe`)
    pub fn suffix(&self) -> &'static str {
        match self {
            DataSource::Qcu => "qcu",
            DataSource::Qcf => "qcf",
            DataSource::Qfe => "qfe",
        }
    }

    pub fn file_pattern(&self) -> String {
        data_sources::FILE_PATTERN.replace("{}", self.suffix())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DataSource {
    type Err = TrendsError;

    /// Accepts `GHCN_QCU` style identifiers or the bare suffix, in any case
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let suffix = normalized.strip_prefix("ghcn_").unwrap_or(&normalized);
        DataSource::ALL
            .into_iter()
            .find(|source| source.suffix() == suffix)
            .ok_or_else(|| TrendsError::UnknownDataSource {
                name: s.to_string(),
            })
    }
}

/// Default directory holding GHCN-M data files
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .filter(|dir| dir.exists())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Find the newest data file for `source` inside `data_dir`
pub fn resolve_data_file(data_dir: &Path, source: DataSource) -> Result<PathBuf> {
    if !data_dir.is_dir() {
        return Err(TrendsError::config(format!(
            "data directory not found: {}",
            data_dir.display()
        )));
    }

    let escaped_dir = glob::Pattern::escape(&data_dir.to_string_lossy());
    let pattern = Path::new(&escaped_dir).join(source.file_pattern());
    let pattern = pattern.to_string_lossy();
    debug!("Searching for {} data files matching {}", source, pattern);

    let release_date = Regex::new(r"\.(\d{8})\.[a-z]{3}\.dat$")
        .map_err(|e| TrendsError::config(format!("invalid release pattern: {}", e)))?;

    let mut candidates: Vec<(String, PathBuf)> = glob::glob(&pattern)
        .map_err(|e| TrendsError::config(format!("invalid file pattern '{}': {}", pattern, e)))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let date = release_date
                .captures(&name)
                .map(|caps| caps[1].to_string())
                .unwrap_or_default();
            (date, path)
        })
        .collect();

    candidates.sort();
    candidates.pop().map(|(_, path)| path).ok_or_else(|| {
        TrendsError::config(format!(
            "no {} data file matching '{}' in {}",
            source,
            source.file_pattern(),
            data_dir.display()
        ))
    })
}
