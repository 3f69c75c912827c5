//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the table model.
/// These are independent of where the data came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("cannot group by '{0}': clashes with a built-in column")]
    InvalidGroupBy(String),

    #[error("duplicate column header: {0}")]
    DuplicateColumn(String),

    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A raw cell value that could not be interpreted for its column type.
///
/// Never surfaced to the user: comparators substitute a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid magnitude in '{0}'")]
    InvalidMagnitude(String),

    #[error("unknown unit: '{unit}' in '{value}'")]
    UnknownUnit { value: String, unit: String },

    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),
}
