use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::DatasetCache;
use crate::config::DashboardConfig;
use crate::data::aggregate::{Aggregates, apply};
use crate::data::filter::{Dimension, FilterSpec, SalaryRange};
use crate::data::model::{Table, Universe};

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct DashboardState {
    pub config: DashboardConfig,

    /// Loaded tables, reused while the file is unchanged.
    cache: DatasetCache,

    /// Path of the current (or last attempted) data file.
    pub data_path: Option<PathBuf>,

    /// Loaded table (None until a load succeeds, or after a failed one).
    pub dataset: Option<Arc<Table>>,

    /// Distinct values of the loaded table.
    pub universe: Universe,

    /// Current filter selections.
    pub filters: FilterSpec,

    /// Subset, KPIs and series for the current filters.
    pub aggregates: Aggregates,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
            data_path: None,
            dataset: None,
            universe: Universe::default(),
            filters: FilterSpec::default(),
            aggregates: Aggregates::default(),
            status_message: None,
        }
    }

    /// Load the configured data file.
    pub fn load_configured(&mut self) {
        let path = self.config.data_path.clone();
        self.load(&path);
    }

    /// Load `path` through the cache. On failure the dashboard drops to
    /// "no data" and keeps the error in `status_message`.
    pub fn load(&mut self, path: &Path) {
        self.data_path = Some(path.to_path_buf());
        match self.cache.load(path) {
            // Unchanged file: keep the user's selections.
            Ok(table) if self.dataset.as_ref().is_some_and(|d| Arc::ptr_eq(d, &table)) => {
                self.status_message = None;
            }
            Ok(table) => self.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.clear_dataset();
                self.status_message = Some(format!("Error loading data: {e}"));
            }
        }
    }

    /// Re-read the current file if it changed on disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.data_path.clone() {
            self.load(&path);
        }
    }

    /// Ingest a newly loaded table and select everything.
    pub fn set_dataset(&mut self, table: Arc<Table>) {
        self.universe = table.universe();
        self.filters = FilterSpec::full(&self.universe);
        self.dataset = Some(table);
        self.status_message = None;
        self.refilter();
    }

    fn clear_dataset(&mut self) {
        self.dataset = None;
        self.universe = Universe::default();
        self.filters = FilterSpec::default();
        self.aggregates = Aggregates::default();
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }

    /// Number of records in the loaded table (0 when nothing is loaded).
    pub fn total_records(&self) -> usize {
        self.dataset.as_ref().map_or(0, |t| t.len())
    }

    /// Recompute `aggregates` after a filter change.
    pub fn refilter(&mut self) {
        self.aggregates = match &self.dataset {
            Some(table) => apply(table, &self.filters),
            None => Aggregates::default(),
        };
    }

    /// Toggle a single value in a categorical filter.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.filters.selection_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.filters.admission_years.remove(&year) {
            self.filters.admission_years.insert(year);
        }
        self.refilter();
    }

    /// Select all values in a categorical filter.
    pub fn select_all(&mut self, dim: Dimension) {
        *self.filters.selection_mut(dim) = self.universe.values(dim).clone();
        self.refilter();
    }

    /// Deselect all values in a categorical filter.
    pub fn select_none(&mut self, dim: Dimension) {
        self.filters.selection_mut(dim).clear();
        self.refilter();
    }

    pub fn select_all_years(&mut self) {
        self.filters.admission_years = self.universe.admission_years.clone();
        self.refilter();
    }

    pub fn select_no_years(&mut self) {
        self.filters.admission_years.clear();
        self.refilter();
    }

    pub fn set_salary_range(&mut self, min: f64, max: f64) {
        self.filters.salary_range = SalaryRange::new(min, max);
        self.refilter();
    }

    /// Back to "everything selected".
    pub fn reset_filters(&mut self) {
        self.filters = FilterSpec::full(&self.universe);
        self.refilter();
    }
}
