use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response shape: {message}")]
    ResponseShapeError { message: String },

    #[error("Unsupported language code: {code}")]
    UnsupportedLanguageError { code: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

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
    /// Timeouts, connection failures, non-2xx statuses.
    Transport,
    /// Provider answered, but not with the expected body.
    Parse,
    /// Writing or reading the output document.
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Transport,
            EtlError::SerializationError(_) | EtlError::ResponseShapeError { .. } => {
                ErrorCategory::Parse
            }
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::UnsupportedLanguageError { .. }
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Transport and parse errors are recovered inside a stage, so they only
    /// surface here when something unusual escaped; storage and config errors
    /// end the run.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Transport | ErrorCategory::Parse => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The provider did not answer in time; raise --timeout-secs or try again later"
            }
            EtlError::ApiError(_) => "Check network connectivity and the --base-url value",
            EtlError::SerializationError(_) | EtlError::ResponseShapeError { .. } => {
                "The provider changed its response format; verify the endpoint still serves {\"data\": [...]}"
            }
            EtlError::IoError(_) => {
                "Make sure the output directory exists or can be created and is writable"
            }
            EtlError::UnsupportedLanguageError { .. } => {
                "Use one of: eng, cze, ger, ben, esp, rus, por, fil, ukr, urd, ita, zho, kor"
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Could not reach the fact provider: {}", self),
            ErrorCategory::Parse => format!("The fact provider sent something unexpected: {}", self),
            ErrorCategory::Storage => format!("Could not write the output file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
