//! CLI command handlers
//!
//! Bridges the clap argument structs with the pipeline.

pub mod config;
pub mod run;

pub use config::{handle_config_command, ConfigArgs};
pub use run::{handle_run_command, RunArgs};
