//! Incremental renderer.
//!
//! The [`Renderer`] owns the surface and keeps it consistent with the view state
//! without tearing everything down on each interaction. It moves through two
//! states: **unbuilt** until the first [`Renderer::build`], then **built** until
//! [`Renderer::destroy`].
//!
//! # Update granularity
//!
//! | Operation                             | Touches                                   |
//! |---------------------------------------|-------------------------------------------|
//! | [`build`](Renderer::build)            | everything, mounted in one step           |
//! | [`update_body`](Renderer::update_body) | body, pagination, info                   |
//! | [`update_sort_indicators`](Renderer::update_sort_indicators) | previously and currently sorted header cells |
//! | [`set_loading_visible`](Renderer::set_loading_visible) | loading overlay visibility |
//!
//! # Binding ownership
//!
//! Every listener belongs to a [`Region`]. Replacing a region releases exactly the
//! bindings of that region before the new ones are attached, and [`Renderer::build`]
//! and [`Renderer::destroy`] release all of them. Each binding is released once.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::state::ViewState;
//! use datatable::domain::Column;
//! use datatable::ui::components::RenderContext;
//! use datatable::ui::renderer::Renderer;
//! use datatable::ui::surface::MemorySurface;
//! use datatable::TableOptions;
//!
//! let columns = vec![Column::string("name", "Name").sortable(true)];
//! let options = TableOptions::default();
//! let ctx = RenderContext { columns: &columns, options: &options };
//!
//! let mut renderer = Renderer::new(MemorySurface::new());
//! renderer.build(&ctx, &ViewState::new(10, 0), &[]);
//!
//! assert!(renderer.surface().html().contains("No data available"));
//! ```

use crate::app::handler::Event;
use crate::app::state::ViewState;
use crate::domain::Row;
use crate::ui::components::body::build_body;
use crate::ui::components::footer::{build_info, build_loading, build_pagination};
use crate::ui::components::header::{build_header, header_cell_classes, sort_icon, SortCell};
use crate::ui::components::toolbar::build_toolbar;
use crate::ui::components::{Assembly, Region, RenderContext, Target, Wire};
use crate::ui::helpers::cls;
use crate::ui::surface::{BindingId, Element, EventKind, NodeHandle, Surface, SurfaceEvent};
use crate::ui::viewmodel::HeaderCellModel;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Binding {
    id: BindingId,
    region: Region,
    handle: NodeHandle,
    kind: EventKind,
    target: Target,
}

/// Handles of the nodes updated after the initial build.
#[derive(Debug, Clone)]
struct Layout {
    body: NodeHandle,
    pagination: NodeHandle,
    info: Option<NodeHandle>,
    loading: NodeHandle,
    search_input: Option<NodeHandle>,
    page_size_select: Option<NodeHandle>,
    sort_cells: HashMap<String, SortCell>,
    column_filters: HashMap<String, NodeHandle>,
}

/// Reconciles a [`Surface`] with the view state.
#[derive(Debug)]
pub struct Renderer<S: Surface> {
    surface: S,
    last_handle: u64,
    layout: Option<Layout>,
    bindings: Vec<Binding>,
    /// Column currently painted as sorted.
    painted_sort: Option<String>,
}

impl<S: Surface> Renderer<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            last_handle: 0,
            layout: None,
            bindings: Vec::new(),
            painted_sort: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.layout.is_some()
    }

    /// Number of bindings this renderer currently holds.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Builds the complete table and mounts it, replacing any previous content.
    ///
    /// All previous bindings are released first. The loading overlay starts hidden.
    pub fn build(&mut self, ctx: &RenderContext<'_>, state: &ViewState, rows: &[&Row]) {
        let _span = tracing::debug_span!("render_build", rows = rows.len()).entered();

        self.release_all();

        let classes = &ctx.options.classes;
        let mut asm = Assembly::new(self.last_handle);
        let mut root = Element::new("div").classes(cls("datatable", classes.root.as_deref()));

        let toolbar_refs = match build_toolbar(ctx, state, &mut asm) {
            Some((toolbar, refs)) => {
                root = root.child(toolbar);
                refs
            }
            None => Default::default(),
        };

        let (thead, header_refs) = build_header(ctx, state, &mut asm);
        let body = asm.handle();
        let table = Element::new("table")
            .classes(cls("datatable__table", classes.table.as_deref()))
            .child(thead)
            .child(build_body(ctx, rows, body));

        let loading = asm.handle();
        root = root.child(
            Element::new("div")
                .class("datatable__table-wrapper")
                .style("position", "relative")
                .child(table)
                .child(build_loading(ctx, loading)),
        );

        let mut footer = Element::new("div").class("datatable__footer");
        let info = ctx.options.show_info.then(|| asm.handle());
        if let Some(info) = info {
            footer = footer.child(build_info(ctx, state, info));
        }
        let pagination = asm.handle();
        footer = footer.child(build_pagination(ctx, state, pagination, &mut asm));
        root = root.child(footer);

        self.last_handle = asm.last_handle();
        self.surface.mount(root);
        self.attach(asm.into_wires());

        self.layout = Some(Layout {
            body,
            pagination,
            info,
            loading,
            search_input: toolbar_refs.search_input,
            page_size_select: toolbar_refs.page_size_select,
            sort_cells: header_refs.sort_cells,
            column_filters: header_refs.column_filters,
        });
        self.painted_sort = active_sort(state);

        tracing::debug!(bindings = self.bindings.len(), "table built");
    }

    /// Replaces body, pagination and info, leaving toolbar and header untouched.
    ///
    /// Builds the whole table instead when nothing has been built yet.
    pub fn update_body(&mut self, ctx: &RenderContext<'_>, state: &ViewState, rows: &[&Row]) {
        let Some((body, pagination, info, page_size_select)) = self
            .layout
            .as_ref()
            .map(|l| (l.body, l.pagination, l.info, l.page_size_select))
        else {
            self.build(ctx, state, rows);
            return;
        };
        let _span = tracing::debug_span!("render_body", rows = rows.len()).entered();

        self.surface.replace(body, build_body(ctx, rows, body));

        self.release(Region::Pagination);
        let mut asm = Assembly::new(self.last_handle);
        let control = build_pagination(ctx, state, pagination, &mut asm);
        self.last_handle = asm.last_handle();
        self.surface.replace(pagination, control);
        self.attach(asm.into_wires());

        if let Some(info) = info {
            self.surface.replace(info, build_info(ctx, state, info));
        }

        if let Some(select) = page_size_select {
            let size = state.page_size.to_string();
            if self.surface.value(select).as_deref() != Some(size.as_str()) {
                self.surface.set_value(select, &size);
            }
        }
    }

    /// Repaints the sort icon and classes of the header cells that were or now are
    /// the sort column. Other header cells are not touched.
    pub fn update_sort_indicators(&mut self, ctx: &RenderContext<'_>, state: &ViewState) {
        let Some(layout) = &self.layout else {
            return;
        };

        let active = active_sort(state);
        let mut keys: Vec<&str> = Vec::with_capacity(2);
        for key in self.painted_sort.iter().chain(active.iter()) {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }

        for key in keys {
            let (Some(cell), Some(column)) = (
                layout.sort_cells.get(key),
                ctx.columns.iter().find(|c| c.key == key),
            ) else {
                continue;
            };
            let model = HeaderCellModel::new(column, state);
            self.surface
                .set_classes(cell.cell, &header_cell_classes(&model, &ctx.options.classes));
            self.surface.set_markup(cell.icon, sort_icon(model.sort));
        }

        tracing::trace!(previous = ?self.painted_sort, current = ?active, "sort indicators updated");
        self.painted_sort = active;
    }

    /// Shows or hides the loading overlay.
    pub fn set_loading_visible(&mut self, visible: bool) {
        if let Some(layout) = &self.layout {
            self.surface.set_visible(layout.loading, visible);
        }
    }

    /// Writes `value` into the global search input if it differs.
    pub fn sync_search_input(&mut self, value: &str) {
        if let Some(input) = self.layout.as_ref().and_then(|l| l.search_input) {
            sync_value(&mut self.surface, input, value);
        }
    }

    /// Writes `value` into the filter input of column `key` if it differs.
    pub fn sync_column_filter(&mut self, key: &str, value: &str) {
        if let Some(input) = self.layout.as_ref().and_then(|l| l.column_filters.get(key).copied()) {
            sync_value(&mut self.surface, input, value);
        }
    }

    /// Empties every column filter input.
    pub fn clear_column_filters(&mut self) {
        if let Some(layout) = &self.layout {
            for input in layout.column_filters.values() {
                sync_value(&mut self.surface, *input, "");
            }
        }
    }

    /// Translates a surface event into a table event.
    ///
    /// Returns `None` for events no live binding was registered for, key presses
    /// other than Enter and Space, and page sizes that do not parse.
    #[must_use]
    pub fn resolve(&self, event: &SurfaceEvent) -> Option<Event> {
        let binding = self
            .bindings
            .iter()
            .find(|b| b.handle == event.target && b.kind == event.kind)?;
        let value = event.value.clone().unwrap_or_default();

        match (&binding.target, event.kind) {
            (Target::Sort(key), EventKind::Click) => Some(Event::SortToggled(key.clone())),
            (Target::Sort(key), EventKind::KeyDown) => {
                matches!(value.as_str(), "Enter" | " ").then(|| Event::SortToggled(key.clone()))
            }
            (Target::Page(page), _) => Some(Event::PageRequested(*page)),
            (Target::PageSizeSelect, _) => value.trim().parse().ok().map(Event::PageSizeChanged),
            (Target::SearchInput, _) => Some(Event::SearchTyped(value)),
            (Target::ColumnFilter(key), _) => Some(Event::ColumnFilterTyped {
                key: key.clone(),
                value,
            }),
            (Target::Sort(_), _) => None,
        }
    }

    /// Releases every binding and clears the surface.
    pub fn destroy(&mut self) {
        self.release_all();
        self.surface.clear();
        self.layout = None;
        self.painted_sort = None;
        tracing::debug!("renderer destroyed");
    }

    fn attach(&mut self, wires: Vec<Wire>) {
        for wire in wires {
            let id = self.surface.listen(wire.handle, wire.kind);
            self.bindings.push(Binding {
                id,
                region: wire.target.region(),
                handle: wire.handle,
                kind: wire.kind,
                target: wire.target,
            });
        }
    }

    fn release(&mut self, region: Region) {
        let (released, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.bindings)
            .into_iter()
            .partition(|b| b.region == region);
        self.bindings = kept;
        for binding in released {
            self.surface.unlisten(binding.id);
        }
    }

    fn release_all(&mut self) {
        for binding in std::mem::take(&mut self.bindings) {
            self.surface.unlisten(binding.id);
        }
    }
}

fn active_sort(state: &ViewState) -> Option<String> {
    state.sort_by.clone().filter(|_| state.is_sorting())
}

fn sync_value<S: Surface>(surface: &mut S, handle: NodeHandle, value: &str) {
    if surface.value(handle).as_deref() != Some(value) {
        surface.set_value(handle, value);
    }
}
