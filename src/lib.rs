//! datatable: a sortable, filterable, paginated data table widget.
//!
//! Given row records and typed column definitions, the table renders a complete
//! table UI onto an abstract [`Surface`](ui::Surface) and keeps it in sync with its
//! view state:
//! - Typed columns (string, number, date with a format string, custom) with
//!   per-type comparison, filtering, alignment and escaping
//! - Global search and per-column filters, debounced
//! - Three-state sorting per column
//! - Pagination with a collapsing page list and a page-size selector
//! - Frontend mode (everything computed locally) and backend mode (the host is
//!   notified with a query string and supplies the page)
//! - Incremental updates that never rebuild the header for a page change
#![allow(clippy::multiple_crate_versions)]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Orchestrator (app::table::DataTable)               │  ← Public API
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - View state and transitions                       │
//! │  - Event handling → actions                         │
//! │  - Frontend query pipeline, debouncing              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Backend       │   │ Domain        │
//! │ (ui/)         │   │ (backend/)    │   │ (domain/)     │
//! │ - Surface     │   │ - Query string│   │ - Columns     │
//! │ - Renderer    │   │ - Host notify │   │ - Dates       │
//! │ - Components  │   │               │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: view state, event handler, pipeline, debouncer and the orchestrator
//! - [`domain`]: rows, columns, the date format engine and the error type
//! - [`backend`]: query-string serialization and host notification
//! - [`ui`]: surface abstraction, incremental renderer, components
//! - [`observability`]: tracing subscriber setup
//!
//! # Configuration
//!
//! Everything that is not a closure or data lives in [`TableOptions`], which can be
//! built in code, deserialized from TOML, or read from a flat attribute map:
//!
//! ```toml
//! page_size = 25
//! page_size_options = [25, 50, 100]
//! empty_text = "Nothing here"
//!
//! [search]
//! mode = "both"
//! debounce_ms = 200
//!
//! [classes]
//! table = "table table-striped"
//! ```
//!
//! # Example
//!
//! ```rust
//! use datatable::{Column, DataSource, DataTable, MemorySurface, TableConfig, TableOptions};
//! use serde_json::json;
//!
//! let rows: Vec<datatable::Row> = (1..=25)
//!     .map(|i| [("name".to_string(), json!(format!("user{i:02}")))].into_iter().collect())
//!     .collect();
//!
//! let mut table = DataTable::create(TableConfig {
//!     mount: Some(MemorySurface::new()),
//!     columns: vec![Column::string("name", "Name").sortable(true)],
//!     source: DataSource::Frontend { data: rows },
//!     options: TableOptions::default(),
//! })?;
//!
//! table.go_to_page(3)?;
//! assert_eq!(table.state().current_page, 3);
//! assert!(table.surface().html().contains("Showing 21-25 of 25 entries"));
//! # Ok::<(), datatable::DataTableError>(())
//! ```

pub mod app;
pub mod backend;
pub mod domain;
pub mod observability;
pub mod ui;

pub use app::modes::{DataMode, SearchMode};
pub use app::state::{SortOrder, ViewState};
pub use app::table::{DataSource, DataTable, TableConfig};
pub use app::{handle_event, Action, Event};
pub use backend::{build_query_string, StateChangeFn};
pub use domain::{Align, Column, ColumnKind, DataTableError, Result, Row};
pub use ui::{ClassOverrides, MemorySurface, Surface, SurfaceEvent};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Whether the global search box is offered. Default: `true`
    pub enabled: bool,

    /// Which search inputs are shown. Default: global
    pub mode: SearchMode,

    /// Quiet period before typed input takes effect, in milliseconds. Default: 300
    pub debounce_ms: u64,

    /// Placeholder of the global search box. Default: `"Search..."`
    pub placeholder: String,

    /// Restricts the global search to these column keys.
    ///
    /// Listed columns that are not searchable stay excluded. `None` or an empty
    /// list searches every searchable column.
    pub searchable_columns: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: SearchMode::Global,
            debounce_ms: 300,
            placeholder: "Search...".to_string(),
            searchable_columns: None,
        }
    }
}

/// Construction options that do not involve closures or data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableOptions {
    /// Initial rows per page; must be greater than zero. Default: 10
    pub page_size: usize,

    /// Choices of the page-size selector. Default: `[10, 25, 50, 100]`
    pub page_size_options: Vec<usize>,

    pub search: SearchOptions,

    /// Extra classes per structural part.
    pub classes: ClassOverrides,

    /// Whether the "Showing a-b of n entries" line is rendered. Default: `true`
    pub show_info: bool,

    /// Whether the page-size selector is rendered. Default: `true`
    pub show_page_size: bool,

    /// Text of the empty-state row. Default: `"No data available"`
    pub empty_text: String,

    /// Text next to the loading spinner. Default: `"Loading..."`
    pub loading_text: String,

    /// Tracing filter used by [`observability::init_tracing`].
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            search: SearchOptions::default(),
            classes: ClassOverrides::default(),
            show_info: true,
            show_page_size: true,
            empty_text: "No data available".to_string(),
            loading_text: "Loading...".to_string(),
            trace_level: None,
        }
    }
}

impl TableOptions {
    /// Parses options from TOML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DataTableError::Options`] if the TOML is malformed or a value has
    /// the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use datatable::{SearchMode, TableOptions};
    ///
    /// let options = TableOptions::from_toml_str("page_size = 25\n[search]\nmode = \"column\"\n")?;
    /// assert_eq!(options.page_size, 25);
    /// assert_eq!(options.search.mode, SearchMode::Column);
    /// assert_eq!(options.search.debounce_ms, 300);
    /// # Ok::<(), datatable::DataTableError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| DataTableError::Options(e.to_string()))
    }

    /// Reads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DataTableError::Io`] if the file cannot be read, and
    /// [`DataTableError::Options`] if its content does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Builds options from a flat string map, such as the data attributes of a
    /// mount element.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`, `debounce_ms`: integers (unparseable values keep the default)
    /// - `page_size_options`, `searchable_columns`: comma-separated lists
    /// - `search`, `show_info`, `show_page_size`: `true`/`false`
    /// - `search_mode`: `global`, `column` or `both`
    /// - `placeholder`, `empty_text`, `loading_text`, `trace_level`: taken verbatim
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use datatable::{SearchMode, TableOptions};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("page_size_options".to_string(), "25, 50".to_string());
    /// map.insert("search_mode".to_string(), "both".to_string());
    ///
    /// let options = TableOptions::from_attributes(&map);
    /// assert_eq!(options.page_size, 25);
    /// assert_eq!(options.page_size_options, vec![25, 50]);
    /// assert_eq!(options.search.mode, SearchMode::Both);
    /// ```
    #[must_use]
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            attrs
                .get(key)
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or(default)
        };
        let list = |key: &str| {
            attrs.get(key).map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
        };

        let page_size_options = list("page_size_options")
            .map(|items| items.iter().filter_map(|s| s.parse::<usize>().ok()).collect::<Vec<_>>())
            .filter(|sizes| !sizes.is_empty())
            .unwrap_or(defaults.page_size_options);

        let mode = match attrs.get("search_mode").map(|s| s.trim()) {
            Some("column") => SearchMode::Column,
            Some("both") => SearchMode::Both,
            _ => SearchMode::Global,
        };

        Self {
            page_size: attrs
                .get("page_size")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.page_size),
            page_size_options,
            search: SearchOptions {
                enabled: flag("search", defaults.search.enabled),
                mode,
                debounce_ms: attrs
                    .get("debounce_ms")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(defaults.search.debounce_ms),
                placeholder: attrs
                    .get("placeholder")
                    .cloned()
                    .unwrap_or(defaults.search.placeholder),
                searchable_columns: list("searchable_columns").filter(|keys| !keys.is_empty()),
            },
            classes: defaults.classes,
            show_info: flag("show_info", defaults.show_info),
            show_page_size: flag("show_page_size", defaults.show_page_size),
            empty_text: attrs.get("empty_text").cloned().unwrap_or(defaults.empty_text),
            loading_text: attrs
                .get("loading_text")
                .cloned()
                .unwrap_or(defaults.loading_text),
            trace_level: attrs.get("trace_level").cloned(),
        }
    }
}
