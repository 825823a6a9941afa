use crate::analyzers::distribution::DistributionOptions;
use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DATA_FILE, DEFAULT_EXPORT_FILE, DEFAULT_HISTOGRAM_BINS,
    DEFAULT_KDE_GRID_POINTS, DEFAULT_KDE_MAX_SAMPLES, DEFAULT_SAMPLE_ROWS, DEFAULT_TOP_CITIES,
    ENV_PREFIX,
};
use crate::utils::coordinates::HemisphereMode;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Settings shared by every dashboard run.
///
/// Sources, lowest precedence first: built-in defaults, the config file,
/// then `CLIMATE_DASHBOARD_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,

    pub export_path: PathBuf,

    #[validate(range(min = 1, max = 10000))]
    pub histogram_bins: usize,

    #[validate(range(min = 1))]
    pub top_cities: usize,

    pub sample_rows: usize,

    #[validate(range(min = 2))]
    pub kde_grid_points: usize,

    #[validate(range(min = 2))]
    pub kde_max_samples: usize,

    pub hemisphere_mode: HemisphereMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            top_cities: DEFAULT_TOP_CITIES,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            kde_grid_points: DEFAULT_KDE_GRID_POINTS,
            kde_max_samples: DEFAULT_KDE_MAX_SAMPLES,
            hemisphere_mode: HemisphereMode::Strip,
        }
    }
}

impl DashboardConfig {
    /// Load settings; an explicit `config_file` must exist, the default one is optional
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let builder = Config::builder();
        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(?config, "Loaded dashboard configuration");
        Ok(config)
    }

    pub fn distribution_options(&self) -> DistributionOptions {
        DistributionOptions {
            bins: self.histogram_bins,
            kde_grid_points: self.kde_grid_points,
            kde_max_samples: self.kde_max_samples,
        }
    }
}
