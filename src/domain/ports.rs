use crate::core::predicate::SelectionPolicy;
use crate::domain::model::{Record, TransformResult};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;

    /// Writes a set of files that belong together. Backends that can stage
    /// writes should leave none of them behind when any one fails.
    fn write_files(&self, files: &[(String, Vec<u8>)]) -> Result<()> {
        for (path, data) in files {
            self.write_file(path, data)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFilenames {
    pub primary: String,
    pub alternative: String,
    pub tier_a: String,
    pub tier_b: String,
}

impl Default for OutputFilenames {
    fn default() -> Self {
        Self {
            primary: "filtered_nyc_affordable_housing_data.json".to_string(),
            alternative: "filtered_nyc_housing_alternative.json".to_string(),
            tier_a: "filtered_housing_after_cutoff.json".to_string(),
            tier_b: "filtered_housing_early_year.json".to_string(),
        }
    }
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn cutoff(&self) -> NaiveDate;
    fn policy(&self) -> SelectionPolicy;
    fn fallback_enabled(&self) -> bool;
    fn filenames(&self) -> OutputFilenames {
        OutputFilenames::default()
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Record>>;
    fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    fn load(&self, result: &TransformResult) -> Result<Vec<String>>;
}
