//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot read {context}: {source}")]
    Source {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot format output as {format}: {message}")]
    Serialize { format: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors caused by what the user typed.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(
                DomainError::UnknownColumn(_)
                    | DomainError::UnknownSortKey(_)
                    | DomainError::UnknownEntity(_)
                    | DomainError::InvalidGroupBy(_)
            ) | ApplicationError::InvalidFilter { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
