//! Event handling and view-state transitions.
//!
//! This module implements the pure core of the table controller: [`handle_event`]
//! applies one [`Event`] to the [`ViewState`] and returns the [`Action`]s the
//! orchestrator has to execute afterwards. It never touches the dataset, the
//! surface or the clock.
//!
//! # Architecture
//!
//! ```text
//! surface event / public call → Event → handle_event → ViewState mutated
//!                                                    → Vec<Action> → orchestrator
//! ```
//!
//! # Page rules
//!
//! | Event                      | Resets page | Notifies host (backend) |
//! |----------------------------|-------------|-------------------------|
//! | `SortToggled`              | no          | yes                     |
//! | `PageRequested`            | sets it     | yes                     |
//! | `PageSizeChanged`          | yes         | yes                     |
//! | search / filter committed  | yes         | yes                     |
//! | `FiltersCleared`           | yes         | yes                     |
//!
//! Typing events only arm a debounce; the state changes when the debounce fires
//! and the orchestrator feeds the matching `*Committed` event back in.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::{handle_event, Action, Event};
//! use datatable::app::modes::DataMode;
//! use datatable::app::state::ViewState;
//!
//! let mut state = ViewState::new(10, 42);
//! let actions = handle_event(&mut state, DataMode::Backend, &Event::PageRequested(3));
//!
//! assert_eq!(state.current_page, 3);
//! assert_eq!(actions, vec![Action::ShowLoading(true), Action::NotifyHost, Action::Render]);
//! ```

use crate::app::actions::Action;
use crate::app::modes::DataMode;
use crate::app::state::ViewState;

/// Inputs to the view-state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A sortable header was clicked or activated from the keyboard.
    SortToggled(String),

    /// A page button was pressed, or `go_to_page` was called.
    PageRequested(usize),

    /// The page-size selector changed, or `set_page_size` was called.
    PageSizeChanged(usize),

    /// The user typed into the global search input.
    SearchTyped(String),

    /// The user typed into a column filter input.
    ColumnFilterTyped {
        key: String,
        value: String,
    },

    /// The global search debounce elapsed with this text.
    SearchCommitted(String),

    /// A column filter debounce elapsed with this text.
    ColumnFilterCommitted {
        key: String,
        value: String,
    },

    /// Programmatic `set_search`; preempts any pending typed search.
    SearchSet(String),

    /// Programmatic `set_column_filter`; preempts any pending typed filter for `key`.
    ColumnFilterSet {
        key: String,
        value: String,
    },

    /// Programmatic `clear_filters`.
    FiltersCleared,
}

/// Applies `event` to `state` and returns the side effects to execute.
///
/// Out-of-range pages and a page size of zero are ignored and yield no actions.
pub fn handle_event(state: &mut ViewState, mode: DataMode, event: &Event) -> Vec<Action> {
    let _span = tracing::debug_span!("handle_event", ?event).entered();

    match event {
        Event::SortToggled(key) => {
            state.toggle_sort(key);
            tracing::debug!(sort_by = ?state.sort_by, order = state.sort_order.as_str(), "sort toggled");
            state_changed(mode)
        }

        Event::PageRequested(page) => {
            if *page < 1 || *page > state.total_pages {
                tracing::debug!(page, total_pages = state.total_pages, "ignoring out-of-range page");
                return Vec::new();
            }
            state.current_page = *page;
            state_changed(mode)
        }

        Event::PageSizeChanged(size) => {
            if *size == 0 {
                tracing::debug!("ignoring page size of zero");
                return Vec::new();
            }
            state.page_size = *size;
            state.reset_page();
            state.recalc_pages();
            tracing::debug!(page_size = size, total_pages = state.total_pages, "page size changed");
            state_changed(mode)
        }

        Event::SearchTyped(value) => vec![Action::ScheduleSearch(value.clone())],

        Event::ColumnFilterTyped { key, value } => vec![Action::ScheduleColumnFilter {
            key: key.clone(),
            value: value.clone(),
        }],

        Event::SearchCommitted(value) => {
            apply_search(state, value);
            state_changed(mode)
        }

        Event::ColumnFilterCommitted { key, value } => {
            apply_column_filter(state, key, value);
            state_changed(mode)
        }

        Event::SearchSet(value) => {
            apply_search(state, value);
            let mut actions = vec![Action::CancelSearch, Action::SyncSearchInput(value.clone())];
            actions.extend(state_changed(mode));
            actions
        }

        Event::ColumnFilterSet { key, value } => {
            apply_column_filter(state, key, value);
            let mut actions = vec![
                Action::CancelColumnFilter(key.clone()),
                Action::SyncColumnFilterInput {
                    key: key.clone(),
                    value: value.clone(),
                },
            ];
            actions.extend(state_changed(mode));
            actions
        }

        Event::FiltersCleared => {
            state.global_search.clear();
            state.column_filters.clear();
            state.reset_page();
            tracing::debug!("filters cleared");

            let mut actions = vec![
                Action::CancelSearch,
                Action::CancelAllColumnFilters,
                Action::SyncSearchInput(String::new()),
                Action::ClearColumnFilterInputs,
            ];
            actions.extend(state_changed(mode));
            actions
        }
    }
}

fn apply_search(state: &mut ViewState, value: &str) {
    state.global_search = value.to_string();
    state.reset_page();
    tracing::debug!(search = value, "global search set");
}

fn apply_column_filter(state: &mut ViewState, key: &str, value: &str) {
    state.column_filters.set(key, value);
    state.reset_page();
    tracing::debug!(column = key, filter = value, "column filter set");
}

/// Follow-up of every committed state change.
///
/// Frontend tables recompute locally. Backend tables show the loading overlay,
/// report the new state, and repaint the current page with the new pagination.
fn state_changed(mode: DataMode) -> Vec<Action> {
    match mode {
        DataMode::Frontend => vec![Action::Render],
        DataMode::Backend => vec![Action::ShowLoading(true), Action::NotifyHost, Action::Render],
    }
}
