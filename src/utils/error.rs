use thiserror::Error;

/// Per-record date field failure. Never fatal: the selector recovers from it
/// and counts it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateFieldError {
    #[error("Field '{field}' is missing or empty")]
    MissingField { field: String },

    #[error("Field '{field}' has malformed date '{value}' (expected YYYY-MM-DD)")]
    MalformedDate { field: String, value: String },
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Io,
    Serialization,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn source_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        FilterError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::SourceUnavailable { .. } => ErrorCategory::Source,
            FilterError::IoError(_) => ErrorCategory::Io,
            FilterError::SerializationError(_) => ErrorCategory::Serialization,
            FilterError::InvalidConfigValueError { .. }
            | FilterError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Source => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FilterError::SourceUnavailable { .. } => {
                "Check that the input file exists and holds a JSON array of objects"
            }
            FilterError::IoError(_) => "Check file permissions and free disk space",
            FilterError::SerializationError(_) => "Check that the input records are valid JSON",
            FilterError::InvalidConfigValueError { .. } | FilterError::ConfigValidationError { .. } => {
                "Fix the configuration value and run again (dates use YYYY-MM-DD)"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FilterError::SourceUnavailable { path, .. } => {
                format!("Could not load records from {}", path)
            }
            FilterError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_field_error_display() {
        let e = DateFieldError::MalformedDate {
            field: "project_completion_date".to_string(),
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Field 'project_completion_date' has malformed date 'not-a-date' (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_source_unavailable_category() {
        let e = FilterError::source_unavailable("data.json", "No such file");
        assert_eq!(e.category(), ErrorCategory::Source);
        assert_eq!(e.severity(), ErrorSeverity::High);
        assert_eq!(e.to_string(), "Source unavailable: data.json: No such file");
        assert_eq!(e.user_friendly_message(), "Could not load records from data.json");
    }

    #[test]
    fn test_io_error_is_critical() {
        let e: FilterError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(e.category(), ErrorCategory::Io);
        assert_eq!(e.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_invalid_config_value_message() {
        let e = FilterError::InvalidConfigValueError {
            field: "filter.cutoff".to_string(),
            value: "2025-13-01".to_string(),
            reason: "Expected a date in YYYY-MM-DD format".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::Configuration);
        assert_eq!(e.user_friendly_message(), "'2025-13-01' is not a valid value for filter.cutoff");
    }
}
