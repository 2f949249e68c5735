//! Domain layer: rows, columns, and the date format engine.
//!
//! This module contains the core domain types of the table, independent of how the
//! table is drawn or where its data comes from.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Row type and coercions of dynamic cell values
//! - [`date`]: Token-based date format compilation, parsing, and formatting
//! - [`column`]: Column schema and per-type compare/filter/render semantics
//!
//! # Examples
//!
//! ```
//! use datatable::domain::{Column, Row};
//! use serde_json::json;
//!
//! let column = Column::string("name", "Name").sortable(true);
//! let row: Row = [("name".to_string(), json!("Ada"))].into_iter().collect();
//! assert!(column.matches(&row, "ad"));
//! ```

pub mod column;
pub mod date;
pub mod error;
pub mod value;

pub use column::{Align, Column, ColumnKind, CustomColumn, RowComparator};
pub use error::{DataTableError, Result};
pub use value::Row;
