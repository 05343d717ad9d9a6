//! Caller-held analysis state.
//!
//! A session keeps the loaded station store and the most recent aggregate so
//! that compute, save and show steps can be chained. Nothing here is global;
//! library users who only need one computation can call the aggregator
//! directly.

use crate::aggregator::Aggregator;
use crate::config::AggregationConfig;
use crate::discovery::{DataSource, resolve_data_file};
use crate::error::{Result, TrendsError};
use crate::models::{AggregateSeries, SeriesScope};
use crate::parser::RecordLayout;
use crate::persistence::{read_averages, write_averages};
use crate::presenter::{DisplayMode, Presenter, Renderer};
use crate::store::StationStore;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default)]
pub struct Session {
    store: Option<StationStore>,
    source: Option<DataSource>,
    latest: Option<AggregateSeries>,
    layout: RecordLayout,
    show_progress: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Resolve and load the newest data file for `source` from `data_dir`
    pub fn load_data(&mut self, source: DataSource, data_dir: &Path) -> Result<PathBuf> {
        let path = resolve_data_file(data_dir, source)?;
        self.load_file(source, &path)?;
        Ok(path)
    }

    /// Load a specific data file as `source`
    pub fn load_file(&mut self, source: DataSource, path: &Path) -> Result<()> {
        info!("Loading {} data from {}", source, path.display());
        let store = StationStore::from_path(path, &self.layout, self.show_progress)?;
        self.load_store(store, source);
        Ok(())
    }

    /// Use an already built store
    pub fn load_store(&mut self, store: StationStore, source: DataSource) {
        self.store = Some(store);
        self.source = Some(source);
    }

    pub fn store(&self) -> Option<&StationStore> {
        self.store.as_ref()
    }

    pub fn source(&self) -> Option<DataSource> {
        self.source
    }

    pub fn latest(&self) -> Option<&AggregateSeries> {
        self.latest.as_ref()
    }

    /// Aggregate the loaded store and keep the result as the latest series
    pub fn compute(&mut self, config: &AggregationConfig) -> Result<&AggregateSeries> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| TrendsError::state("no station data loaded"))?;
        let series = Aggregator::new(store).compute_monthly_average(config)?;
        Ok(self.latest.insert(series))
    }

    /// Replace the latest series with one read from disk
    pub fn load_averages(
        &mut self,
        path: &Path,
        source: DataSource,
        scope: SeriesScope,
    ) -> Result<&AggregateSeries> {
        let series = read_averages(path, scope)?;
        self.source = Some(source);
        Ok(self.latest.insert(series))
    }

    pub fn save_averages(&self, path: &Path) -> Result<()> {
        let series = self
            .latest
            .as_ref()
            .ok_or_else(|| TrendsError::state("no aggregate computed or loaded"))?;
        write_averages(series, path)
    }

    /// Render the latest series
    pub fn show<R: Renderer>(&self, mode: DisplayMode, renderer: &mut R) -> Result<()> {
        let series = self.latest.as_ref().ok_or_else(|| {
            TrendsError::state("please compute or load averages before showing them")
        })?;
        Presenter::new(self.source).present(series, mode, renderer)
    }
}
