//! Error types for the data table.
//!
//! This module defines the centralized error type [`DataTableError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only two situations are fatal for a table: an invalid construction config and a
//! call made after `destroy()`. Malformed cell data (unparseable dates, non-numeric
//! values in number columns) never surfaces here; it degrades to fallback values.
//! Out-of-range row indices and page numbers are ignored rather than reported.

use thiserror::Error;

/// The main error type for data table operations.
///
/// # Examples
///
/// ```
/// use datatable::DataTableError;
///
/// fn validate_columns(count: usize) -> Result<(), DataTableError> {
///     if count == 0 {
///         return Err(DataTableError::Config("\"columns\" must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_columns(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum DataTableError {
    /// Construction config is invalid or incomplete.
    ///
    /// Raised synchronously by `DataTable::create` when the mount target is missing
    /// or not drawable, the column set is empty, the page size is zero, or backend
    /// mode lacks its declared total or notify callback. The table is not created.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was invoked after `destroy()`.
    #[error("This data table has been destroyed")]
    Destroyed,

    /// Reading an options file failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options document could not be parsed.
    ///
    /// Occurs when a TOML options document has invalid syntax or mistyped fields.
    #[error("Options error: {0}")]
    Options(String),
}

/// A specialized `Result` type for data table operations.
///
/// This is a type alias for `std::result::Result<T, DataTableError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, DataTableError>;
