use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewScopeError {
    #[error("No score data available in reviews")]
    InsufficientData,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Review source error: {0}")]
    Source(String),

    #[error("{failed} of {total} analyses failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Date parsing error: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReviewScopeError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Source(_) => "source_error",
            Self::BatchFailed { .. } => "batch_failed",
            Self::Serialization(_) => "serialization_error",
            Self::TomlParsing(_) => "toml_error",
            Self::Date(_) => "date_error",
            Self::Io(_) => "io_error",
        }
    }
}

/// Error payload handed to whatever boundary renders failures
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl From<&ReviewScopeError> for ErrorBody {
    fn from(err: &ReviewScopeError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewScopeError>;
