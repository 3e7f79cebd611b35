use crate::core::predicate::SelectionPolicy;
use crate::core::ConfigProvider;
use crate::domain::ports::OutputFilenames;
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub filter: FilterSection,
    pub source: SourceConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSection {
    #[serde(deserialize_with = "deserialize_cutoff")]
    pub cutoff: NaiveDate,
    pub policy: SelectionPolicy,
    pub fallback: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub primary: Option<String>,
    pub alternative: Option<String>,
    pub tier_a: Option<String>,
    pub tier_b: Option<String>,
}

/// Strict `YYYY-MM-DD`; a bad cutoff fails the load instead of reaching a run.
fn deserialize_cutoff<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    validation::validate_cutoff("filter.cutoff", &raw).map_err(serde::de::Error::custom)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"))
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FilterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.input_path", &self.source.input_path)?;
        validation::validate_file_extension("source.input_path", &self.source.input_path, &["json"])?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        let names = self.filenames();
        for (field, name) in [
            ("load.filenames.primary", &names.primary),
            ("load.filenames.alternative", &names.alternative),
            ("load.filenames.tier_a", &names.tier_a),
            ("load.filenames.tier_b", &names.tier_b),
        ] {
            validation::validate_non_empty_string(field, name)?;
            validation::validate_file_extension(field, name, &["json"])?;
        }
        validation::validate_distinct(
            "load.filenames",
            &[
                names.primary.as_str(),
                names.alternative.as_str(),
                names.tier_a.as_str(),
                names.tier_b.as_str(),
            ],
        )?;

        Ok(())
    }

    pub fn set_policy(&mut self, policy: SelectionPolicy) {
        self.filter.policy = policy;
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn cutoff(&self) -> NaiveDate {
        self.filter.cutoff
    }

    fn policy(&self) -> SelectionPolicy {
        self.filter.policy
    }

    fn fallback_enabled(&self) -> bool {
        self.filter.fallback.unwrap_or(true)
    }

    fn filenames(&self) -> OutputFilenames {
        let defaults = OutputFilenames::default();
        let Some(custom) = &self.load.filenames else {
            return defaults;
        };
        OutputFilenames {
            primary: custom.primary.clone().unwrap_or(defaults.primary),
            alternative: custom.alternative.clone().unwrap_or(defaults.alternative),
            tier_a: custom.tier_a.clone().unwrap_or(defaults.tier_a),
            tier_b: custom.tier_b.clone().unwrap_or(defaults.tier_b),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[filter]
cutoff = "2025-05-01"
policy = "both"

[source]
input_path = "./data/nyc_affordable_housing_data.json"

[load]
output_path = "./data"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.policy(), SelectionPolicy::Both);
        assert_eq!(config.cutoff(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert!(config.fallback_enabled());
        assert_eq!(config.filenames(), OutputFilenames::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_filenames_and_policy() {
        let toml_content = r#"
[filter]
cutoff = "2025-05-01"
policy = "completion_year_tiered"
fallback = false

[source]
input_path = "in.json"

[load]
output_path = "out"

[load.filenames]
primary = "combined.json"
tier_a = "after.json"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let names = config.filenames();

        assert_eq!(config.policy(), SelectionPolicy::CompletionYearTiered);
        assert!(!config.fallback_enabled());
        assert_eq!(names.primary, "combined.json");
        assert_eq!(names.tier_a, "after.json");
        assert_eq!(names.tier_b, OutputFilenames::default().tier_b);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOUSING_FILTER_TEST_INPUT", "/tmp/records.json");

        let toml_content = BASIC.replace(
            "./data/nyc_affordable_housing_data.json",
            "${HOUSING_FILTER_TEST_INPUT}",
        );
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.source.input_path, "/tmp/records.json");

        std::env::remove_var("HOUSING_FILTER_TEST_INPUT");
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let toml_content = BASIC.replace("\"both\"", "\"any\"");
        let err = TomlConfig::from_toml_str(&toml_content).unwrap_err();
        assert!(matches!(err, FilterError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_bad_cutoff_fails_to_load() {
        for cutoff in ["05/01/2025", "2025-13-01", "2025-05-01T00:00:00", ""] {
            let err = TomlConfig::from_toml_str(&BASIC.replace("2025-05-01", cutoff)).unwrap_err();
            assert!(matches!(err, FilterError::ConfigValidationError { .. }));
            assert!(err.to_string().contains("filter.cutoff"), "{}", err);
        }
    }

    #[test]
    fn test_config_validation() {
        let clashing = format!("{}\n[load.filenames]\nprimary = \"x.json\"\nalternative = \"x.json\"\n", BASIC);
        let clashing = TomlConfig::from_toml_str(&clashing).unwrap();
        assert!(clashing.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.load.output_path, "./data");
    }
}
