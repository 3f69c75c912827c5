//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        let CliError::Infra(e) = self;
        match e {
            InfraError::Io { .. } => exitcode::IOERR,
            InfraError::ConfigExists(_) => exitcode::CANTCREAT,
            InfraError::NoConfigDir => exitcode::CONFIG,
            InfraError::Application(app) => application_exit_code(app),
        }
    }
}

fn application_exit_code(e: &ApplicationError) -> i32 {
    if e.is_usage() {
        return exitcode::USAGE;
    }
    match e {
        ApplicationError::Source { .. } => exitcode::IOERR,
        ApplicationError::Decode { .. } => exitcode::DATAERR,
        ApplicationError::Config { .. } => exitcode::CONFIG,
        ApplicationError::Domain(DomainError::RowWidthMismatch { .. })
        | ApplicationError::Domain(DomainError::DuplicateColumn(_))
        | ApplicationError::Serialize { .. } => exitcode::SOFTWARE,
        ApplicationError::Domain(_) | ApplicationError::InvalidFilter { .. } => exitcode::USAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;

    fn io_err() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "gone")
    }

    #[rstest]
    #[case(ApplicationError::Domain(DomainError::UnknownColumn("X".into())), exitcode::USAGE)]
    #[case(ApplicationError::Domain(DomainError::UnknownSortKey("X".into())), exitcode::USAGE)]
    #[case(ApplicationError::Domain(DomainError::InvalidGroupBy("count".into())), exitcode::USAGE)]
    #[case(
        ApplicationError::Domain(DomainError::RowWidthMismatch { row: 0, expected: 2, actual: 1 }),
        exitcode::SOFTWARE
    )]
    #[case(ApplicationError::Source { context: "x".into(), source: io_err() }, exitcode::IOERR)]
    #[case(ApplicationError::config("bad"), exitcode::CONFIG)]
    fn test_application_exit_codes(#[case] err: ApplicationError, #[case] want: i32) {
        assert_eq!(CliError::from(err).exit_code(), want);
    }

    #[test]
    fn given_decode_failure_when_mapping_exit_code_then_dataerr() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = CliError::from(ApplicationError::Decode {
            what: "shards payload".into(),
            source,
        });
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_usage_error_when_displayed_then_message_is_plain() {
        let err = CliError::from(ApplicationError::Domain(DomainError::UnknownColumn(
            "nonexistent".into(),
        )));
        assert_eq!(err.to_string(), "unknown column: nonexistent");
    }
}
