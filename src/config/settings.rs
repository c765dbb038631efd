//! Pipeline settings for retail-forecast
//!
//! Holds the explicit configuration record handed to every stage: input
//! location, category filter, model orders, output directory and split ratio.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::forecast::{ArimaOrder, SarimaSpec, SeasonalOrder};

/// Configuration for a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the transaction CSV
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Country to keep (empty string keeps every country)
    #[serde(default = "default_country")]
    pub country: String,

    /// Non-seasonal order (p, d, q)
    #[serde(default)]
    pub order: ArimaOrder,

    /// Seasonal order (P, D, Q, s)
    #[serde(default)]
    pub seasonal_order: SeasonalOrder,

    /// Directory receiving plots and the forecast table
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fraction of months held out for testing
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data").join("online_retail.csv")
}

fn default_country() -> String {
    "United Kingdom".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_test_ratio() -> f64 {
    0.2
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            country: default_country(),
            order: ArimaOrder::default(),
            seasonal_order: SeasonalOrder::default(),
            output_dir: default_output_dir(),
            test_ratio: default_test_ratio(),
        }
    }
}

impl PipelineConfig {
    /// Load settings from a JSON file; absent fields take their defaults
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: PipelineConfig = serde_json::from_str(&contents).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }

    /// Load settings from `path` when given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PipelineError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<(), PipelineError> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PipelineError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(path, contents)
            .map_err(|e| PipelineError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Category filter, or `None` when every row should be kept
    pub fn country_filter(&self) -> Option<&str> {
        let country = self.country.trim();
        if country.is_empty() {
            None
        } else {
            Some(country)
        }
    }

    /// Model specification assembled from the two order settings
    pub fn sarima_spec(&self) -> SarimaSpec {
        SarimaSpec::new(self.order, self.seasonal_order)
    }

    /// Reject settings no stage could work with
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(PipelineError::Validation("input path is empty".into()));
        }
        if !self.test_ratio.is_finite() || self.test_ratio <= 0.0 || self.test_ratio >= 1.0 {
            return Err(PipelineError::Validation(format!(
                "test ratio must lie strictly between 0 and 1, got {}",
                self.test_ratio
            )));
        }
        self.sarima_spec().validate()
    }
}
