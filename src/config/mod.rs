pub mod settings;

pub use settings::Settings;

use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use clap::Parser;
use std::path::{Path, PathBuf};

#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "price-reconcile"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Match a supplier price change file against a POS inventory export")
)]
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to price change file
    #[cfg_attr(feature = "cli", arg(short = 'p', long = "pricechange", value_parser = existing_file))]
    pub pricechange: PathBuf,

    /// Path to inventory file
    #[cfg_attr(feature = "cli", arg(short = 'i', long = "inventory", value_parser = existing_file))]
    pub inventory: PathBuf,

    /// Path to output folder for the reports
    #[cfg_attr(feature = "cli", arg(short = 'o', long = "outdir", value_parser = existing_dir))]
    pub outdir: PathBuf,

    /// Optional TOML settings file
    #[cfg_attr(feature = "cli", arg(short = 'c', long = "config", value_parser = existing_file))]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(short = 'v', long))]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[cfg_attr(feature = "cli", arg(long))]
    pub log_json: bool,
}

impl CliConfig {
    /// Settings from `--config`, or the defaults when none was given.
    pub fn settings(&self) -> crate::utils::error::Result<Settings> {
        match &self.config {
            Some(path) => Settings::from_file(path),
            None => Ok(Settings::default()),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn pricechange_file(&self) -> &Path {
        &self.pricechange
    }

    fn inventory_file(&self) -> &Path {
        &self.inventory
    }

    fn output_dir(&self) -> &Path {
        &self.outdir
    }
}

#[cfg(feature = "cli")]
fn existing_file(value: &str) -> Result<PathBuf, String> {
    crate::utils::validation::validate_existing_file("path", Path::new(value))
        .map_err(|_| describe_path_error(value, true))
}

#[cfg(feature = "cli")]
fn existing_dir(value: &str) -> Result<PathBuf, String> {
    crate::utils::validation::validate_existing_dir("path", Path::new(value))
        .map_err(|_| describe_path_error(value, false))
}

#[cfg(feature = "cli")]
fn describe_path_error(value: &str, is_file: bool) -> String {
    let path = Path::new(value);
    if !path.exists() {
        format!("{} does not exist.", value)
    } else if is_file {
        format!("{} is not a file.", value)
    } else {
        format!("{} is not a dir.", value)
    }
}
