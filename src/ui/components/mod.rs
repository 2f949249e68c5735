//! Element-tree builders for the structural parts of the table.
//!
//! Each component turns the view state into an [`Element`](crate::ui::surface::Element)
//! subtree. Components never touch the surface: nodes that need later updates get a
//! handle from the shared [`Assembly`], and every listener a component needs is
//! recorded there as a [`Wire`]. The renderer mounts the tree first and attaches
//! the wires afterwards.
//!
//! # Components
//!
//! - [`toolbar`]: global search box and page-size selector
//! - [`header`]: header row with sort affordances, optional column-filter row
//! - [`body`]: data rows or the empty-state row
//! - [`footer`]: info text, pagination control, loading overlay
//!
//! # Layout
//!
//! ```text
//! div.datatable
//! ├── div.datatable__toolbar           (optional)
//! ├── div.datatable__table-wrapper
//! │   ├── table.datatable__table
//! │   │   ├── thead.datatable__header
//! │   │   └── tbody.datatable__body
//! │   └── div.datatable__loading
//! └── div.datatable__footer
//!     ├── div.datatable__info          (optional)
//!     └── div.datatable__pagination
//! ```

pub mod body;
pub mod footer;
pub mod header;
pub mod toolbar;

use crate::domain::Column;
use crate::ui::surface::{EventKind, NodeHandle};
use crate::TableOptions;

/// Read-only inputs shared by every component.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub columns: &'a [Column],
    pub options: &'a TableOptions,
}

/// Surface part whose listeners are released together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Toolbar,
    Header,
    Pagination,
}

/// What a listener reports when its event arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Header cell of the column with this key.
    Sort(String),
    /// Page button leading to this page.
    Page(usize),
    PageSizeSelect,
    SearchInput,
    /// Filter input of the column with this key.
    ColumnFilter(String),
}

impl Target {
    #[must_use]
    pub const fn region(&self) -> Region {
        match self {
            Self::Sort(_) | Self::ColumnFilter(_) => Region::Header,
            Self::Page(_) => Region::Pagination,
            Self::PageSizeSelect | Self::SearchInput => Region::Toolbar,
        }
    }
}

/// A listener to attach once the element carrying `handle` is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub handle: NodeHandle,
    pub kind: EventKind,
    pub target: Target,
}

/// Handle allocator and wire collector for one build pass.
#[derive(Debug)]
pub struct Assembly {
    next_handle: u64,
    wires: Vec<Wire>,
}

impl Assembly {
    /// Starts allocating after `last_handle`.
    #[must_use]
    pub const fn new(last_handle: u64) -> Self {
        Self {
            next_handle: last_handle,
            wires: Vec::new(),
        }
    }

    /// Allocates a fresh handle.
    pub fn handle(&mut self) -> NodeHandle {
        self.next_handle += 1;
        NodeHandle(self.next_handle)
    }

    pub fn wire(&mut self, handle: NodeHandle, kind: EventKind, target: Target) {
        self.wires.push(Wire { handle, kind, target });
    }

    /// Last handle allocated, to seed the next pass.
    #[must_use]
    pub const fn last_handle(&self) -> u64 {
        self.next_handle
    }

    #[must_use]
    pub fn into_wires(self) -> Vec<Wire> {
        self.wires
    }
}
