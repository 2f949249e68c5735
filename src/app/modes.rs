//! Operating and search mode types.
//!
//! # Data modes
//!
//! - **Frontend**: the table owns the full dataset and filters, sorts and
//!   paginates it locally.
//! - **Backend**: the host owns the data. The table renders the page it was given
//!   and reports the desired next page as a query string.
//!
//! # Search modes
//!
//! - **Global**: one search box over all searchable columns
//! - **Column**: one filter input per searchable column, no global box
//! - **Both**: the global box and the per-column inputs
//!
//! # Example
//!
//! ```rust
//! use datatable::app::modes::{DataMode, SearchMode};
//!
//! assert!(SearchMode::Both.has_column_filters());
//! assert!(!SearchMode::Column.has_global_search());
//! assert_ne!(DataMode::Frontend, DataMode::Backend);
//! ```

use serde::{Deserialize, Serialize};

/// Where filtering, sorting and pagination are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Full dataset in memory, all queries computed locally.
    Frontend,

    /// Host-driven: state changes are emitted as queries, data arrives later.
    Backend,
}

/// Which search inputs the table offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Single global search box.
    #[default]
    Global,

    /// Per-column filter inputs below the header row.
    Column,

    /// Global search box and per-column filter inputs.
    Both,
}

impl SearchMode {
    /// Whether this mode includes the global search box.
    #[must_use]
    pub const fn has_global_search(self) -> bool {
        matches!(self, Self::Global | Self::Both)
    }

    /// Whether this mode includes the per-column filter row.
    #[must_use]
    pub const fn has_column_filters(self) -> bool {
        matches!(self, Self::Column | Self::Both)
    }
}
