//! Application layer: view state, event handling and the table controller.
//!
//! This module sits between the public API and the domain/ui/backend layers. It
//! implements the event-driven core that keeps the view state, the dataset and
//! the surface consistent.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Public call / SurfaceEvent → Event → handle_event → ViewState → Actions
//!                                                                    ↓
//!        Renderer ← pipeline (frontend) / emitter (backend) ← DataTable
//! ```
//!
//! # Modules
//!
//! - [`state`]: view-state record and its transitions
//! - [`modes`]: data and search mode types
//! - [`handler`]: pure event processing producing actions
//! - [`actions`]: side effects executed by the controller
//! - [`pipeline`]: frontend search, filter, sort and pagination
//! - [`debounce`]: deadline-based input debouncing
//! - [`table`]: the [`DataTable`](table::DataTable) controller
//!
//! # Example
//!
//! ```rust
//! use datatable::app::{handle_event, Action, Event};
//! use datatable::app::modes::DataMode;
//! use datatable::app::state::{SortOrder, ViewState};
//!
//! let mut state = ViewState::new(10, 30);
//! state.current_page = 2;
//!
//! let actions = handle_event(&mut state, DataMode::Frontend, &Event::SortToggled("name".into()));
//! assert_eq!(actions, vec![Action::Render]);
//! assert_eq!(state.sort_order, SortOrder::Asc);
//! assert_eq!(state.current_page, 2);
//! ```

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod modes;
pub mod pipeline;
pub mod state;
pub mod table;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DataMode, SearchMode};
pub use state::{SortOrder, ViewState};
pub use table::{DataSource, DataTable, TableConfig};
