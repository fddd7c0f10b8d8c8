use std::path::PathBuf;

/// File the dashboard opens on start-up when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "cleaned_data.csv";

/// Environment variable overriding [`DashboardConfig::data_path`].
pub const DATA_PATH_ENV: &str = "GRADVIEW_DATA";

/// Environment variable overriding [`DashboardConfig::preview_rows`].
pub const PREVIEW_ROWS_ENV: &str = "GRADVIEW_PREVIEW_ROWS";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Data file loaded at start-up.
    pub data_path: PathBuf,
    /// Rows shown in the filtered-data preview table.
    pub preview_rows: usize,
    /// Initial window size in points.
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            preview_rows: 10,
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `GRADVIEW_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    /// Invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(PREVIEW_ROWS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(n) => config.preview_rows = n,
                Err(e) => log::warn!("Ignoring {PREVIEW_ROWS_ENV}={raw:?}: {e}"),
            }
        }

        config
    }
}
