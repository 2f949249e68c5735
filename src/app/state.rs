//! View-state model and its pure transitions.
//!
//! This module defines [`ViewState`], the single mutable record of what the table
//! currently shows: page, page size, sort, search and per-column filters, plus the
//! derived totals. It is created once from the construction config and afterwards
//! only mutated in place by the orchestrator.
//!
//! # Invariant
//!
//! After every mutation `1 <= current_page <= total_pages` and
//! `total_pages == max(1, ceil(total_rows / page_size))`. [`ViewState::recalc_pages`]
//! restores it and must run after anything that changes `total_rows` or
//! `page_size`.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::state::{SortOrder, ViewState};
//!
//! let mut state = ViewState::new(10, 25);
//! assert_eq!(state.total_pages, 3);
//!
//! state.current_page = 3;
//! state.total_rows = 4;
//! state.recalc_pages();
//! assert_eq!(state.current_page, 1);
//!
//! assert_eq!(SortOrder::None.cycle().cycle().cycle(), SortOrder::None);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Sort direction of the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// No sorting; rows keep their input order.
    #[default]
    None,
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Next order in the cycle `None -> Asc -> Desc -> None`.
    ///
    /// This is the only sort-order transition rule. Clicking the same column
    /// repeatedly visits all three states; a different column starts at `Asc`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::None => Self::Asc,
            Self::Asc => Self::Desc,
            Self::Desc => Self::None,
        }
    }

    /// Query-string spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Per-column filter texts in insertion order.
///
/// Setting an existing key keeps its position. An empty text means "no filter" but
/// the entry is retained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnFilters {
    entries: Vec<(String, String)>,
}

impl ColumnFilters {
    /// Filter text for `key`, if one was set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Sets the filter text for `key`.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries with a non-empty filter text.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ColumnFilters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The mutable record of current page, sort, search and filter selections.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// One-based page number, clamped into `[1, total_pages]`.
    pub current_page: usize,

    /// Rows per page, always greater than zero.
    pub page_size: usize,

    /// Key of the sorted column; `None` when sorting is off.
    pub sort_by: Option<String>,

    pub sort_order: SortOrder,

    /// Global search text; empty means no search.
    pub global_search: String,

    pub column_filters: ColumnFilters,

    /// Frontend: rows surviving search and filters. Backend: the host-declared total.
    pub total_rows: usize,

    /// Derived from `total_rows` and `page_size`, never below one.
    pub total_pages: usize,
}

impl ViewState {
    /// Creates the initial state for a table showing `total_rows` rows.
    ///
    /// Frontend tables pass their dataset length, backend tables the total declared
    /// by the host.
    #[must_use]
    pub fn new(page_size: usize, total_rows: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            current_page: 1,
            page_size,
            sort_by: None,
            sort_order: SortOrder::None,
            global_search: String::new(),
            column_filters: ColumnFilters::default(),
            total_rows,
            total_pages: page_count(total_rows, page_size),
        }
    }

    /// Recomputes `total_pages` and clamps `current_page` into `[1, total_pages]`.
    pub fn recalc_pages(&mut self) {
        self.total_pages = page_count(self.total_rows, self.page_size);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    /// Moves back to the first page.
    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }

    /// Whether sorting is active, i.e. a column is selected with a direction.
    #[must_use]
    pub fn is_sorting(&self) -> bool {
        self.sort_by.is_some() && self.sort_order != SortOrder::None
    }

    /// Applies a header click on `key`.
    ///
    /// The same column advances along the sort cycle and releases the column when it
    /// wraps back to `None`. A different column always starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_by.as_deref() == Some(key) {
            self.sort_order = self.sort_order.cycle();
            if self.sort_order == SortOrder::None {
                self.sort_by = None;
            }
        } else {
            self.sort_by = Some(key.to_string());
            self.sort_order = SortOrder::Asc;
        }
    }

    /// Zero-based `[start, end)` row range of the current page, with `end` clamped to
    /// `total_rows`.
    #[must_use]
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_rows);
        (start.min(end), end)
    }
}

/// `max(1, ceil(total_rows / page_size))`.
#[must_use]
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}
