//! Layout parsing and validation errors.

use thiserror::Error;

/// Errors from parsing or validating a layout file.
///
/// All variants are fatal at load time and surfaced to the caller; the
/// planner itself never produces them.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("missing or malformed size header: {0:?}")]
    InvalidHeader(String),

    #[error("row {row}: expected {expected} cells, got {got}")]
    RowWidthMismatch { row: u32, expected: u32, got: u32 },

    #[error("expected {expected} rows, got {got}")]
    RowCountMismatch { expected: u32, got: u32 },

    #[error("row {row}, column {col}: invalid cell code {code:?}")]
    BadCellCode { row: u32, col: u32, code: char },

    #[error("layout must be at least 1x1")]
    EmptyLayout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for layout loading.
pub type GridResult<T> = Result<T, GridError>;
