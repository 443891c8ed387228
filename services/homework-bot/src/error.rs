//! Error types for the homework bot
//!
//! Every stage of a poll cycle has its own error enum so the poll loop can
//! tell transport trouble apart from upstream contract drift.

/// Transport-level failure reported by an [`crate::io::HttpClient`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HttpError(pub String);

/// Configuration problems, all fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingCredential(&'static str),

    #[error("Failed to read config file {path:?}: {reason}")]
    Read {
        path: std::path::PathBuf,
        reason: String,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures while fetching homework statuses from the review API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("API is not responding: {0}")]
    Transport(String),

    #[error("API returned unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("API response is not valid JSON: {0}")]
    Malformed(String),
}

/// The fetched response does not have the expected shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("API response has no \"{0}\" key")]
    MissingField(&'static str),

    #[error("API response key \"{field}\" is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A homework record could not be turned into a notification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("homework record has no \"{0}\" key")]
    MissingField(&'static str),

    #[error("status \"{status}\" of homework \"{name}\" is not documented")]
    UnknownStatus { status: String, name: String },
}

/// Outbound chat delivery failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifierError {
    #[error("{0}")]
    Transport(String),

    #[error("chat API returned status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Any recoverable failure inside one poll cycle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("failed to deliver: {0}")]
    Notifier(#[from] NotifierError),
}

impl CycleError {
    /// Coarse failure class used to label log lines
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Fetch(_) => "transport",
            CycleError::Validation(_) | CycleError::Format(_) => "contract",
            CycleError::Notifier(_) => "delivery",
        }
    }
}

/// Errors that stop the service itself
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),
}

/// Result type alias for service-level operations
pub type Result<T> = std::result::Result<T, BotError>;
