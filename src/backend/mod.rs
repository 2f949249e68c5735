//! Backend-mode plumbing: query serialization and host notification.
//!
//! In backend mode the host owns filtering, sorting and pagination. After every
//! state change the table describes the page it wants as a query string and hands
//! it to the host, together with a snapshot of the state. It never executes the
//! query and never touches its data until the host calls `set_data`.
//!
//! # Modules
//!
//! - [`query`]: canonical query-string serialization of the view state
//! - [`emitter`]: wrapper around the host's state-change callback

pub mod emitter;
pub mod query;

pub use emitter::{QueryEmitter, StateChangeFn};
pub use query::build_query_string;
