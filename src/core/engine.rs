use crate::config::{default_snapshot_path, Config};
use crate::core::dataset::Dataset;
use crate::core::matcher::{NameMatcher, SearchResult, MAX_SUGGESTIONS};
use crate::core::state::{update, Action, AppState};
use crate::error::Result;
use crate::loader;
use crate::permalink;
use crate::persistence::{load_snapshot, save_snapshot};
use crate::presentation::{self, ChartSeries};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Chunk directory used when neither the command line nor the config names one.
pub const DEFAULT_DATA_DIR: &str = "public/chunks";

/// A session: the immutable dataset plus the state the user drives through `dispatch`.
pub struct Explorer {
    dataset: Dataset,
    matcher: NameMatcher,
    state: AppState,
}

impl Explorer {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            matcher: NameMatcher::indexed(&dataset, MAX_SUGGESTIONS),
            dataset,
            state: AppState::default(),
        }
    }

    pub fn with_config(dataset: Dataset, config: &Config) -> Self {
        Self {
            matcher: NameMatcher::indexed(&dataset, config.max_suggestions()),
            dataset,
            state: AppState { year_range: config.year_range(), ..AppState::default() },
        }
    }

    /// Opens a session using the config's data dir and snapshot, either of
    /// which `data_dir` and `use_snapshot` can override.
    pub fn open(config: &Config, data_dir: Option<PathBuf>, use_snapshot: bool) -> Result<Self> {
        let data_dir = data_dir
            .or_else(|| config.data_dir())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let snapshot = if use_snapshot {
            config.snapshot_path().or_else(default_snapshot_path)
        } else {
            None
        };
        Self::load(&data_dir, snapshot.as_deref(), config)
    }

    /// Loads the chunk directory, preferring a snapshot built from exactly the
    /// same files (same canonical dir, manifest and chunk sizes and mtimes). A
    /// fresh load refreshes the snapshot; failing to write it is only logged.
    pub fn load(data_dir: &Path, snapshot: Option<&Path>, config: &Config) -> Result<Self> {
        let source = match snapshot {
            Some(_) => match loader::source_stamp(data_dir) {
                Ok(source) => Some(source),
                Err(e) => {
                    info!(dir = %data_dir.display(), error = %e, "cannot stat data sources, skipping snapshot");
                    None
                }
            },
            None => None,
        };

        if let (Some(path), Some(source)) = (snapshot.filter(|p| p.exists()), &source) {
            match load_snapshot(path, source) {
                Ok(Some(dataset)) => {
                    info!(path = %path.display(), "using dataset snapshot");
                    return Ok(Self::with_config(dataset, config));
                }
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "unreadable snapshot, reloading chunks"),
            }
        }

        let dataset = loader::load_dir(data_dir)?;
        if let (Some(path), Some(source)) = (snapshot, &source) {
            if let Err(e) = save_snapshot(&dataset, source, path) {
                warn!(path = %path.display(), error = %e, "could not write snapshot");
            }
        }
        Ok(Self::with_config(dataset, config))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = update(&self.state, action, &self.dataset, &self.matcher);
    }

    /// Suggestions for the current query.
    pub fn suggestions(&self) -> SearchResult {
        self.matcher.search(&self.dataset, &self.state.query)
    }

    pub fn search(&self, query: &str) -> SearchResult {
        self.matcher.search(&self.dataset, query)
    }

    pub fn chart(&self) -> Vec<ChartSeries> {
        presentation::chart(&self.dataset, &self.state.selections, self.state.year_range)
    }

    /// Tooltip for the pinned year, if any.
    pub fn pinned_tooltip(&self) -> Option<Vec<String>> {
        self.state
            .pinned_year
            .map(|year| presentation::tooltip(&self.chart(), year))
    }

    pub fn permalink(&self, base_url: &str) -> String {
        permalink::share_url(base_url, &self.state.selections)
    }
}
