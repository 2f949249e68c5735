//! Query-string serialization of the view state.
//!
//! # Format
//!
//! ```text
//! ?page=<n>&pageSize=<n>[&sortBy=<key>&sortOrder=asc|desc][&search=<text>][&filter[<key>]=<text>...]
//! ```
//!
//! Parameters always appear in this order. Sorting is included only while a column
//! and direction are selected, search only when non-empty, and one `filter[...]`
//! entry per non-empty column filter in the order the filters were first set.
//! Keys and values are percent-encoded; the brackets of `filter[...]` are not.

use crate::app::state::ViewState;
use urlencoding::encode;

/// Serializes `state` into the canonical query string, including the leading `?`.
///
/// # Example
///
/// ```rust
/// use datatable::app::state::ViewState;
/// use datatable::backend::build_query_string;
///
/// let mut state = ViewState::new(25, 100);
/// state.current_page = 2;
/// state.toggle_sort("name");
/// state.global_search = "a&b".to_string();
/// state.column_filters.set("city", "New York");
///
/// assert_eq!(
///     build_query_string(&state),
///     "?page=2&pageSize=25&sortBy=name&sortOrder=asc&search=a%26b&filter[city]=New%20York"
/// );
/// ```
#[must_use]
pub fn build_query_string(state: &ViewState) -> String {
    let mut params = vec![
        format!("page={}", state.current_page),
        format!("pageSize={}", state.page_size),
    ];

    if let Some(sort_by) = state.sort_by.as_deref().filter(|_| state.is_sorting()) {
        params.push(format!("sortBy={}", encode(sort_by)));
        params.push(format!("sortOrder={}", state.sort_order.as_str()));
    }

    if !state.global_search.is_empty() {
        params.push(format!("search={}", encode(&state.global_search)));
    }

    for (key, value) in state.column_filters.active() {
        params.push(format!("filter[{}]={}", encode(key), encode(value)));
    }

    format!("?{}", params.join("&"))
}
