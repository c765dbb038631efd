//! Configuration module for retail-forecast
//!
//! This module provides configuration management including:
//! - The explicit pipeline configuration record
//! - Output artifact path resolution

pub mod paths;
pub mod settings;

pub use paths::OutputPaths;
pub use settings::PipelineConfig;
