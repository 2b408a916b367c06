use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuError {
    #[error("SPARQL request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("SPARQL endpoint returned {status}: {body}")]
    SparqlEndpoint { status: u16, body: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid HTTP status code: {0}")]
    InvalidStatus(u16),

    #[error("Logger setup failed: {message}")]
    LoggerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MuError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MuError::ApiError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            MuError::SparqlEndpoint { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            MuError::ApiError(_) | MuError::SparqlEndpoint { .. } => ErrorSeverity::High,
            MuError::SerializationError(_) | MuError::InvalidHeader { .. } => ErrorSeverity::High,
            MuError::InvalidStatus(_) => ErrorSeverity::High,
            MuError::ConfigError { .. }
            | MuError::MissingConfigError { .. }
            | MuError::InvalidConfigValueError { .. }
            | MuError::IoError(_)
            | MuError::LoggerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MuError::ApiError(e) if e.is_timeout() => {
                "Increase MU_SPARQL_TIMEOUT or simplify the statement"
            }
            MuError::ApiError(_) => "Check that MU_SPARQL_ENDPOINT is reachable",
            MuError::SparqlEndpoint { status, .. } if *status >= 500 => {
                "The triple store reported an internal error, retry later"
            }
            MuError::SparqlEndpoint { .. } => "Check the statement syntax and the mu headers sent",
            MuError::ConfigError { .. }
            | MuError::MissingConfigError { .. }
            | MuError::InvalidConfigValueError { .. } => "Check the MU_* environment variables",
            MuError::IoError(_) | MuError::LoggerError { .. } => {
                "Check that LOG_DIR exists and is writable"
            }
            MuError::SerializationError(_) => "The endpoint did not return SPARQL JSON results",
            MuError::InvalidHeader { .. } => "Header values must be visible ASCII",
            MuError::InvalidStatus(_) => "Use a status code between 100 and 999",
        }
    }
}

pub type Result<T> = std::result::Result<T, MuError>;
