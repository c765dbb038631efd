//! `config` command: show or save the resolved settings

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;

/// Flags of the `config` command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Write the resolved settings as JSON to this path
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

/// Handle the `config` command
pub fn handle_config_command(args: &ConfigArgs, settings_file: Option<&Path>) -> PipelineResult<()> {
    let config = PipelineConfig::load_or_default(settings_file)?;
    config.validate()?;

    print!("{}", format_config(&config, settings_file));
    if let Some(path) = &args.save {
        config.save(path)?;
        println!("Settings written to {}", path.display());
    }
    Ok(())
}

/// Human-readable listing of the settings
pub fn format_config(config: &PipelineConfig, settings_file: Option<&Path>) -> String {
    let source = settings_file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    let country = config.country_filter().unwrap_or("(all countries)");

    let mut output = String::new();
    output.push_str("retail-forecast configuration\n");
    output.push_str("=============================\n");
    output.push_str(&format!("Source:          {}\n", source));
    output.push_str(&format!("Input:           {}\n", config.input_path.display()));
    output.push_str(&format!("Country:         {}\n", country));
    output.push_str(&format!("Model:           {}\n", config.sarima_spec()));
    output.push_str(&format!("Test ratio:      {}\n", config.test_ratio));
    output.push_str(&format!("Output dir:      {}\n", config.output_dir.display()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_defaults() {
        let text = format_config(&PipelineConfig::default(), None);
        assert!(text.contains("built-in defaults"));
        assert!(text.contains("United Kingdom"));
        assert!(text.contains("SARIMAX(1, 1, 1)x(1, 1, 1, 12)"));
        assert!(text.contains("0.2"));
    }

    #[test]
    fn test_empty_country_means_all() {
        let config = PipelineConfig {
            country: String::new(),
            ..Default::default()
        };
        assert!(format_config(&config, None).contains("(all countries)"));
    }

    #[test]
    fn test_save_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let args = ConfigArgs {
            save: Some(path.clone()),
        };

        handle_config_command(&args, None).unwrap();
        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded, PipelineConfig::default());
    }
}
