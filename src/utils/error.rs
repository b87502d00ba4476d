use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Notebook format error: {message}")]
    FormatError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Resource,
    Format,
    Config,
    Processing,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuizError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuizError::IoError(_) => ErrorCategory::Resource,
            QuizError::SerializationError(_) | QuizError::FormatError { .. } => {
                ErrorCategory::Format
            }
            QuizError::ConfigError { .. }
            | QuizError::ConfigValidationError { .. }
            | QuizError::InvalidConfigValueError { .. }
            | QuizError::MissingConfigError { .. } => ErrorCategory::Config,
            QuizError::ProcessingError { .. } => ErrorCategory::Processing,
            QuizError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Resource => ErrorSeverity::Medium,
            ErrorCategory::Format => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::Critical,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Validation => ErrorSeverity::Low,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Resource => {
                "Check that the notebook path exists and is readable"
            }
            ErrorCategory::Format => {
                "Make sure the input is a notebook JSON document with a 'cells' array"
            }
            ErrorCategory::Config => {
                "Review the CLI arguments or the TOML config file for invalid values"
            }
            ErrorCategory::Processing => {
                "Re-run with --verbose to see which cell failed to process"
            }
            ErrorCategory::Validation => {
                "Inspect the verification report for the failing problems"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuizError::IoError(e) => format!("Could not access a file: {}", e),
            QuizError::SerializationError(e) => format!("Could not read the notebook JSON: {}", e),
            QuizError::FormatError { message } => {
                format!("The notebook document is malformed: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let io = QuizError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.category(), ErrorCategory::Resource);

        let format = QuizError::FormatError {
            message: "no cells".to_string(),
        };
        assert_eq!(format.category(), ErrorCategory::Format);
        assert_eq!(format.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let missing = QuizError::MissingConfigError {
            field: "input.notebook".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::Critical);
        assert!(!missing.recovery_suggestion().is_empty());
    }
}
