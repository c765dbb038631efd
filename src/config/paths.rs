//! Path management for retail-forecast artifacts
//!
//! Every run writes a fixed set of files into one output directory:
//!
//! - `train_test_plot.png`
//! - `monthly_sales.png`
//! - `sarimax_diagnostics.png`
//! - `forecast_vs_actual.csv`

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Manages all output paths used by a pipeline run
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Directory receiving every artifact
    output_dir: PathBuf,
}

impl OutputPaths {
    /// Create OutputPaths rooted at the given directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Train/test overlay plot
    pub fn train_test_plot(&self) -> PathBuf {
        self.output_dir.join("train_test_plot.png")
    }

    /// Forecast vs actual plot (title carries MAE/RMSE)
    pub fn forecast_plot(&self) -> PathBuf {
        self.output_dir.join("monthly_sales.png")
    }

    /// Residual diagnostics panel
    pub fn diagnostics_plot(&self) -> PathBuf {
        self.output_dir.join("sarimax_diagnostics.png")
    }

    /// Forecast vs actual table
    pub fn forecast_table(&self) -> PathBuf {
        self.output_dir.join("forecast_vs_actual.csv")
    }

    /// All artifact paths in the order they are written
    pub fn artifacts(&self) -> [PathBuf; 4] {
        [
            self.train_test_plot(),
            self.forecast_plot(),
            self.diagnostics_plot(),
            self.forecast_table(),
        ]
    }

    /// Ensure the output directory exists
    pub fn ensure_directories(&self) -> Result<(), PipelineError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            PipelineError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}
