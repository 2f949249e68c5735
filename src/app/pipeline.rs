//! Frontend query pipeline.
//!
//! Derives the visible page from the full dataset, the column schema and the view
//! state. The stage order is fixed:
//!
//! 1. **Global search**: a row survives if *any* candidate column matches (OR).
//! 2. **Column filters**: a row survives if *every* active filter matches (AND).
//! 3. **Sort**: stable, so ties keep their input order.
//! 4. **Paginate**: slice the current page out of the sorted sequence.
//!
//! All functions borrow their inputs and return row references; nothing here
//! mutates the dataset or the state. The orchestrator writes the post-filter total
//! back into the state and clamps the page before calling [`paginate`].
//!
//! # Example
//!
//! ```rust
//! use datatable::app::pipeline::process;
//! use datatable::app::state::ViewState;
//! use datatable::domain::{Column, Row};
//! use serde_json::json;
//!
//! let data: Vec<Row> = ["Carol", "alice", "Bob"]
//!     .iter()
//!     .map(|n| [("name".to_string(), json!(n))].into_iter().collect())
//!     .collect();
//! let columns = vec![Column::string("name", "Name").sortable(true)];
//!
//! let mut state = ViewState::new(2, data.len());
//! state.toggle_sort("name");
//!
//! let result = process(&data, &columns, &state, None);
//! assert_eq!(result.filtered_total, 3);
//! assert_eq!(result.page_rows[0]["name"], json!("alice"));
//! ```

use crate::app::state::{SortOrder, ViewState};
use crate::domain::{Column, Row};

/// The derived view of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    /// Rows of the current page, in display order.
    pub page_rows: Vec<&'a Row>,

    /// Number of rows surviving search and filters, before pagination.
    pub filtered_total: usize,
}

/// Runs all four stages against `state` as given.
///
/// `current_page` is used verbatim; a page past the end yields an empty slice. Use
/// [`filter_and_sort`] and [`paginate`] separately when the page must be clamped
/// against the new total first.
#[must_use]
pub fn process<'a>(
    data: &'a [Row],
    columns: &[Column],
    state: &ViewState,
    allow_list: Option<&[String]>,
) -> QueryResult<'a> {
    let rows = filter_and_sort(data, columns, state, allow_list);
    let filtered_total = rows.len();
    QueryResult {
        page_rows: paginate(&rows, state.current_page, state.page_size),
        filtered_total,
    }
}

/// Applies global search, column filters and sorting (stages 1-3).
///
/// `allow_list` restricts the global search to the named columns; columns that are
/// not searchable stay excluded even when listed. An empty list means no restriction.
#[must_use]
pub fn filter_and_sort<'a>(
    data: &'a [Row],
    columns: &[Column],
    state: &ViewState,
    allow_list: Option<&[String]>,
) -> Vec<&'a Row> {
    let _span = tracing::debug_span!("frontend_query", rows = data.len()).entered();

    let mut rows: Vec<&Row> = data.iter().collect();

    if !state.global_search.is_empty() {
        let allow_list = allow_list.filter(|keys| !keys.is_empty());
        let candidates: Vec<&Column> = columns
            .iter()
            .filter(|c| c.is_searchable())
            .filter(|c| allow_list.map_or(true, |keys| keys.iter().any(|k| *k == c.key)))
            .collect();

        rows.retain(|row| {
            candidates
                .iter()
                .any(|c| c.matches(row, &state.global_search))
        });
        tracing::trace!(
            search = %state.global_search,
            candidates = candidates.len(),
            remaining = rows.len(),
            "applied global search"
        );
    }

    for (key, text) in state.column_filters.active() {
        let Some(column) = columns.iter().find(|c| c.key == key && c.is_searchable()) else {
            continue;
        };
        rows.retain(|row| column.matches(row, text));
        tracing::trace!(column = key, filter = text, remaining = rows.len(), "applied column filter");
    }

    if let Some(compare) = state
        .sort_by
        .as_deref()
        .filter(|_| state.sort_order != SortOrder::None)
        .and_then(|key| columns.iter().find(|c| c.key == key))
        .and_then(Column::comparator)
    {
        match state.sort_order {
            SortOrder::Desc => rows.sort_by(|a, b| compare(*a, *b).reverse()),
            _ => rows.sort_by(|a, b| compare(*a, *b)),
        }
    }

    rows
}

/// Slices page `current_page` (one-based) of `page_size` rows out of `rows`.
#[must_use]
pub fn paginate<'a>(rows: &[&'a Row], current_page: usize, page_size: usize) -> Vec<&'a Row> {
    let start = current_page.saturating_sub(1).saturating_mul(page_size);
    rows.iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect()
}
