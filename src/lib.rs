pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::JsonFilterPipeline;
pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::{etl::FilterEngine, orchestrator::FilterOrchestrator, predicate::SelectionPolicy};
pub use domain::model::{FilterOutcome, FilterStats, Record, RunReport, Selection, TieredSelection};
pub use utils::error::{DateFieldError, FilterError, Result};
