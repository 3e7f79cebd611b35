pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::predicate::SelectionPolicy;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Clap value parser for strict `YYYY-MM-DD` dates.
#[cfg(feature = "cli")]
pub fn parse_cutoff_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    validation::validate_cutoff("cutoff", s).map_err(|e| e.to_string())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "housing-filter")]
#[command(about = "Select NYC affordable housing records by project start/completion date")]
pub struct CliConfig {
    /// JSON array of housing records
    #[arg(long)]
    pub input_path: String,

    /// Directory the filtered JSON files are written to
    #[arg(long, default_value = "./data")]
    pub output_path: String,

    /// Cutoff date (YYYY-MM-DD); dates on the cutoff pass
    #[arg(long, value_parser = parse_cutoff_arg)]
    pub cutoff: NaiveDate,

    #[arg(long, value_enum)]
    pub policy: SelectionPolicy,

    /// Skip the `either` pass when `both` matches nothing
    #[arg(long)]
    pub no_fallback: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    fn fallback_enabled(&self) -> bool {
        !self.no_fallback
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_file_extension("input_path", &self.input_path, &["json"])?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
