//! Class overrides and inline icons.
//!
//! Every structural part of the table carries a built-in `datatable__*` class. A
//! host can attach its own classes to each part through [`ClassOverrides`]; the
//! override classes are appended after the built-in ones, never replacing them.
//!
//! # TOML Format
//!
//! ```toml
//! [classes]
//! table = "table table-striped"
//! page_button_active = "active"
//! row_even = "bg-gray-50"
//! ```
//!
//! # Example
//!
//! ```rust
//! use datatable::ui::theme::ClassOverrides;
//!
//! let classes: ClassOverrides = toml::from_str(r#"header_cell = "px-2 py-1""#).unwrap();
//! assert_eq!(classes.header_cell.as_deref(), Some("px-2 py-1"));
//! assert!(classes.root.is_none());
//! ```

use serde::{Deserialize, Serialize};

/// One optional extra-class slot per structural part.
///
/// Each slot may hold several whitespace-separated classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassOverrides {
    /// Outer container.
    pub root: Option<String>,
    /// Bar holding the search box and page-size selector.
    pub toolbar: Option<String>,
    pub search_input: Option<String>,
    pub page_size_select: Option<String>,
    pub table: Option<String>,
    /// `thead` element.
    pub header: Option<String>,
    pub header_row: Option<String>,
    pub header_cell: Option<String>,
    /// Header cell of the active sort column.
    pub header_cell_active: Option<String>,
    /// `tbody` element.
    pub body: Option<String>,
    pub row: Option<String>,
    /// Every second body row.
    pub row_even: Option<String>,
    pub cell: Option<String>,
    pub pagination: Option<String>,
    pub page_button: Option<String>,
    pub page_button_active: Option<String>,
    /// Loading overlay.
    pub loading: Option<String>,
    /// Empty-state cell.
    pub empty: Option<String>,
    pub column_filter: Option<String>,
    /// "Showing a-b of n entries" text.
    pub info: Option<String>,
}

/// Inline SVG markup for the table's affordances.
pub mod icons {
    pub const SORT_NONE: &str = r#"<svg class="datatable__sort-icon" width="12" height="12" viewBox="0 0 12 12" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M3 4.5L6 1.5L9 4.5"/><path d="M3 7.5L6 10.5L9 7.5"/></svg>"#;

    pub const SORT_ASC: &str = r#"<svg class="datatable__sort-icon" width="12" height="12" viewBox="0 0 12 12" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M3 7.5L6 4.5L9 7.5"/></svg>"#;

    pub const SORT_DESC: &str = r#"<svg class="datatable__sort-icon" width="12" height="12" viewBox="0 0 12 12" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M3 4.5L6 7.5L9 4.5"/></svg>"#;

    pub const SEARCH: &str = r#"<svg class="datatable__search-icon" width="14" height="14" viewBox="0 0 14 14" fill="none" stroke="currentColor" stroke-width="1.5"><circle cx="5.5" cy="5.5" r="4"/><path d="M8.5 8.5L13 13"/></svg>"#;

    pub const CHEVRON_LEFT: &str = r#"<svg width="12" height="12" viewBox="0 0 12 12" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M8 2L4 6L8 10"/></svg>"#;

    pub const CHEVRON_RIGHT: &str = r#"<svg width="12" height="12" viewBox="0 0 12 12" fill="none" stroke="currentColor" stroke-width="1.5"><path d="M4 2L8 6L4 10"/></svg>"#;

    pub const SPINNER: &str = r#"<svg class="datatable__spinner" width="20" height="20" viewBox="0 0 20 20" fill="none" stroke="currentColor" stroke-width="2"><circle cx="10" cy="10" r="8" opacity="0.25"/><path d="M10 2A8 8 0 0 1 18 10" stroke-linecap="round"/></svg>"#;
}
