use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilkitError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("Wrong number of arguments for `{function}`: expected {expected}, got {got}")]
    ArityError {
        function: String,
        expected: String,
        got: usize,
    },

    #[error("Cannot read argument `{param}` as {kind}: {value}")]
    ArgumentError {
        param: String,
        kind: String,
        value: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The command line itself was wrong (unknown name, arity, coercion).
    Usage,
    /// A function rejected its input.
    Input,
    Config,
    System,
}

impl UtilkitError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownFunction { .. } | Self::ArityError { .. } | Self::ArgumentError { .. } => {
                ErrorCategory::Usage
            }
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Usage | ErrorCategory::Config => 2,
            ErrorCategory::Input | ErrorCategory::System => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UnknownFunction { name } => format!("No function named '{}'", name),
            Self::InvalidInput { field, reason } => format!("Bad value for {}: {}", field, reason),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::UnknownFunction { .. } => "Run `utilkit list` to see every available function",
            Self::ArityError { .. } | Self::ArgumentError { .. } => {
                "Run `utilkit help <category>` to see the parameters each function takes"
            }
            Self::InvalidInput { .. } => "Check the argument values and try again",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the TOML configuration file passed with --config or UTILKIT_CONFIG"
            }
            Self::IoError(_) => "Check that the path exists and is accessible",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Check that the input is well formed"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, UtilkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        let err = UtilkitError::UnknownFunction {
            name: "nope".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn input_errors_exit_with_one() {
        let err = UtilkitError::invalid_input("size", "must be positive");
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("size"));
    }
}
