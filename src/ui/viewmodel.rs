//! View models derived from the view state.
//!
//! These types hold display-ready values computed from [`ViewState`] and the column
//! schema. They contain no business logic and know nothing about the surface; the
//! component builders turn them into element trees.
//!
//! # Example
//!
//! ```rust
//! use datatable::ui::viewmodel::{page_items, PageItem};
//!
//! assert_eq!(
//!     page_items(5, 10),
//!     vec![
//!         PageItem::Page(1),
//!         PageItem::Ellipsis,
//!         PageItem::Page(4),
//!         PageItem::Page(5),
//!         PageItem::Page(6),
//!         PageItem::Ellipsis,
//!         PageItem::Page(10),
//!     ]
//! );
//! ```

use crate::app::state::{SortOrder, ViewState};
use crate::domain::{Align, Column};

/// Pages shown on each side of the current page once the list collapses.
pub const PAGE_WINDOW: usize = 1;

/// Page counts up to this value are listed without ellipses.
pub const MAX_UNCOLLAPSED_PAGES: usize = 7;

/// One entry of the numbered part of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Lists the page buttons for `current` of `total` pages.
///
/// Up to [`MAX_UNCOLLAPSED_PAGES`] pages are listed in full. Beyond that the first
/// and last page are always shown, plus [`PAGE_WINDOW`] pages either side of
/// `current`, with one ellipsis standing in for each gap.
#[must_use]
pub fn page_items(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(PAGE_WINDOW).max(2);
    let end = (current + PAGE_WINDOW).min(total - 1);

    let mut items = vec![PageItem::Page(1)];
    if start > 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total));
    items
}

/// Display data of the pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModel {
    pub current: usize,
    pub total: usize,
    pub items: Vec<PageItem>,
}

impl PaginationModel {
    /// Returns `None` when there is at most one page and the control stays empty.
    #[must_use]
    pub fn from_state(state: &ViewState) -> Option<Self> {
        (state.total_pages > 1).then(|| Self {
            current: state.current_page,
            total: state.total_pages,
            items: page_items(state.current_page, state.total_pages),
        })
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total
    }
}

/// Footer info line: `"Showing a-b of n entries"`, or `"No entries"`.
#[must_use]
pub fn info_text(state: &ViewState) -> String {
    if state.total_rows == 0 {
        return "No entries".to_string();
    }
    let start = (state.current_page - 1) * state.page_size + 1;
    let end = (state.current_page * state.page_size).min(state.total_rows);
    format!("Showing {start}-{end} of {} entries", state.total_rows)
}

/// Display data of one header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCellModel {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    /// Sort direction shown on this cell; `None` unless it is the sort column.
    pub sort: SortOrder,
    pub align: Align,
    pub width: Option<String>,
}

impl HeaderCellModel {
    #[must_use]
    pub fn new(column: &Column, state: &ViewState) -> Self {
        let sort = if state.sort_by.as_deref() == Some(column.key.as_str()) {
            state.sort_order
        } else {
            SortOrder::None
        };
        Self {
            key: column.key.clone(),
            label: column.label.clone(),
            sortable: column.sortable,
            sort,
            align: column.resolved_align(),
            width: column.width.clone(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sort != SortOrder::None
    }
}
