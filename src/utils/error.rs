use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid reading input: {message}")]
    InvalidReadingError { message: String },

    #[error("Unknown manufacturer label: {label}")]
    UnknownManufacturerLabel { label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

impl LookupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LookupError::ConfigError { .. }
            | LookupError::InvalidConfigValueError { .. }
            | LookupError::MissingConfigError { .. }
            | LookupError::TomlParseError(_) => ErrorCategory::Configuration,
            LookupError::CsvError(_)
            | LookupError::SerializationError(_)
            | LookupError::InvalidReadingError { .. }
            | LookupError::UnknownManufacturerLabel { .. } => ErrorCategory::Input,
            LookupError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Input | ErrorCategory::System => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::IoError(e) => format!("Could not read or write a file: {}", e),
            LookupError::CsvError(e) => format!("The CSV input could not be processed: {}", e),
            LookupError::SerializationError(e) => {
                format!("The JSON input could not be processed: {}", e)
            }
            LookupError::TomlParseError(e) => format!("The config file is not valid TOML: {}", e),
            LookupError::UnknownManufacturerLabel { label } => {
                format!("'{}' is not a known manufacturer", label)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::IoError(_) => "Check that the path exists and is readable/writable",
            LookupError::CsvError(_) => "Make sure the CSV has a header row with model and serial columns",
            LookupError::SerializationError(_) => {
                "Make sure the file holds a scan response object or an array of them"
            }
            LookupError::TomlParseError(_) | LookupError::ConfigError { .. } => {
                "Fix the config file syntax or run without --config"
            }
            LookupError::InvalidConfigValueError { .. } => "Correct the reported config field",
            LookupError::MissingConfigError { .. } => {
                "Check the --config path or run without --config"
            }
            LookupError::InvalidReadingError { .. } => "Supply both a model and a serial number",
            LookupError::UnknownManufacturerLabel { .. } => {
                "Use one of: GE, Whirlpool, Frigidaire, LG, Samsung, Maytag, Bosch, Miele, Wolf"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = LookupError::MissingConfigError {
            field: "output.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_errors_exit_with_two() {
        let err: LookupError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("missing.csv"));
    }
}
