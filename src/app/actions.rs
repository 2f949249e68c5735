//! Side effects requested by the event handler.
//!
//! This module defines the [`Action`] type: imperative commands produced by
//! [`handle_event`](crate::app::handle_event) after it has applied an event to the
//! view state. Actions are the boundary between the pure state transition and the
//! effectful work the orchestrator performs: arming and cancelling debounces,
//! updating live inputs, notifying the host and re-rendering.
//!
//! # Ordering
//!
//! The handler returns a `Vec<Action>` and the orchestrator executes it front to
//! back. Cancellations always precede the state-derived effects so that a pending
//! debounce can never overwrite a value the same event has just set.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::Action;
//!
//! let actions = vec![
//!     Action::CancelSearch,
//!     Action::SyncSearchInput("alice".to_string()),
//!     Action::Render,
//! ];
//! assert_eq!(actions.len(), 3);
//! ```

/// Commands executed by the orchestrator after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arms (or re-arms) the global search debounce with the typed text.
    ScheduleSearch(String),

    /// Arms (or re-arms) the debounce of one column filter input.
    ScheduleColumnFilter {
        /// Column key of the filter input.
        key: String,
        /// Text currently in the input.
        value: String,
    },

    /// Drops a pending global search debounce. No-op when none is pending.
    CancelSearch,

    /// Drops the pending debounce of one column filter.
    CancelColumnFilter(String),

    /// Drops every pending column filter debounce.
    CancelAllColumnFilters,

    /// Writes a programmatic value into the live global search input.
    SyncSearchInput(String),

    /// Writes a programmatic value into one live column filter input.
    SyncColumnFilterInput {
        key: String,
        value: String,
    },

    /// Empties every live column filter input.
    ClearColumnFilterInputs,

    /// Shows or hides the loading overlay.
    ShowLoading(bool),

    /// Reports the current state to the host (backend mode only).
    NotifyHost,

    /// Recomputes the visible rows and updates body, pagination, info and sort
    /// indicators.
    Render,
}
