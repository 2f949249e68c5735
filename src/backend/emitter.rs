//! Host notification in backend mode.

use super::query::build_query_string;
use crate::app::state::ViewState;
use std::fmt;

/// Host callback receiving the query string and a snapshot of the state.
pub type StateChangeFn = Box<dyn FnMut(&str, ViewState)>;

/// Reports state changes to the host.
///
/// The emitter only reads the state. Whatever the callback does, the table keeps
/// showing its current rows until the host supplies new ones.
pub struct QueryEmitter {
    on_state_change: StateChangeFn,
    emitted: usize,
}

impl QueryEmitter {
    #[must_use]
    pub fn new(on_state_change: StateChangeFn) -> Self {
        Self {
            on_state_change,
            emitted: 0,
        }
    }

    /// Serializes `state` and passes it, with an owned copy of the state, to the
    /// host callback.
    pub fn emit(&mut self, state: &ViewState) {
        let query = build_query_string(state);
        self.emitted += 1;
        tracing::debug!(query = %query, count = self.emitted, "notifying host of state change");
        (self.on_state_change)(&query, state.clone());
    }

    /// Number of notifications sent so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }
}

impl fmt::Debug for QueryEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryEmitter")
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}
