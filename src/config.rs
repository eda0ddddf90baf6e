//! Command-line configuration.

use crate::data::DateFilter;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CSV: &str = "encuestas.csv";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--{0} only applies together with --report")]
    RequiresReport(&'static str),
}

/// Survey call-log dashboard.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Call-log CSV export to load.
    #[arg(long, env = "SURVEY_CSV", default_value = DEFAULT_CSV)]
    pub csv: PathBuf,

    /// Print the aggregates as JSON instead of opening the dashboard window.
    #[arg(long)]
    pub report: bool,

    /// Date selection: "todos" for the whole period or a YYYY-MM-DD date.
    /// In the window this is the initial dropdown value.
    #[arg(long, default_value = "todos")]
    pub date: DateFilter,

    /// (report only) Write the summary table CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub summary_out: Option<PathBuf>,

    /// (report only) Render the charts as PNG files into this directory.
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Turn on debug logging.
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.report {
            if self.summary_out.is_some() {
                return Err(ConfigError::RequiresReport("summary-out"));
            }
            if self.charts_dir.is_some() {
                return Err(ConfigError::RequiresReport("charts-dir"));
            }
        }
        Ok(())
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
