//! The table controller.
//!
//! [`DataTable`] owns the dataset, the view state, the renderer and the debounce
//! timers. Every public operation and every surface event is routed through the
//! pure [`handle_event`] and the returned [`Action`]s are executed here, in order.
//!
//! # Lifecycle
//!
//! ```text
//! create ──validate──→ built ──(operations, events)──→ built ──destroy──→ destroyed
//! ```
//!
//! After [`DataTable::destroy`] every mutating call returns
//! [`DataTableError::Destroyed`]; `destroy` itself may be called again.
//!
//! # Time
//!
//! The table never reads timers on its own. Typed input arms a debounce deadline;
//! the host calls [`DataTable::advance`] with the current time (for example when
//! [`DataTable::next_deadline`] has passed) to apply inputs whose quiet period has
//! elapsed.
//!
//! # Example
//!
//! ```rust
//! use datatable::{Column, DataSource, DataTable, MemorySurface, TableConfig, TableOptions, ViewState};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//!
//! let mut table = DataTable::create(TableConfig {
//!     mount: Some(MemorySurface::new()),
//!     columns: vec![Column::string("name", "Name")],
//!     source: DataSource::Backend {
//!         data: Vec::new(),
//!         total_rows: Some(95),
//!         on_state_change: Some(Box::new(move |query: &str, _state: ViewState| {
//!             sink.borrow_mut().push(query.to_string());
//!         })),
//!     },
//!     options: TableOptions::default(),
//! })?;
//!
//! table.go_to_page(2)?;
//! assert_eq!(seen.borrow().as_slice(), ["?page=2&pageSize=10"]);
//! # Ok::<(), datatable::DataTableError>(())
//! ```

use crate::app::actions::Action;
use crate::app::debounce::Debouncer;
use crate::app::handler::{handle_event, Event};
use crate::app::modes::DataMode;
use crate::app::pipeline;
use crate::app::state::ViewState;
use crate::backend::{QueryEmitter, StateChangeFn};
use crate::domain::{Column, DataTableError, Result, Row};
use crate::ui::components::RenderContext;
use crate::ui::renderer::Renderer;
use crate::ui::surface::{Surface, SurfaceEvent};
use crate::TableOptions;
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Where the rows come from.
pub enum DataSource {
    /// The full dataset; filtering, sorting and pagination happen locally.
    Frontend { data: Vec<Row> },

    /// The current page as supplied by the host.
    ///
    /// Both `total_rows` and `on_state_change` are required; they are optional
    /// here only so that their absence is reported as a configuration error.
    Backend {
        data: Vec<Row>,
        total_rows: Option<usize>,
        on_state_change: Option<StateChangeFn>,
    },
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frontend { data } => f.debug_struct("Frontend").field("rows", &data.len()).finish(),
            Self::Backend {
                data,
                total_rows,
                on_state_change,
            } => f
                .debug_struct("Backend")
                .field("rows", &data.len())
                .field("total_rows", total_rows)
                .field("on_state_change", &on_state_change.is_some())
                .finish(),
        }
    }
}

/// Everything needed to construct a table.
#[derive(Debug)]
pub struct TableConfig<S> {
    /// Surface the table draws into.
    pub mount: Option<S>,
    pub columns: Vec<Column>,
    pub source: DataSource,
    pub options: TableOptions,
}

/// Debounced input sources, in tie-break order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Search,
    ColumnFilter(String),
}

/// A sortable, filterable, paginated table bound to a surface.
pub struct DataTable<S: Surface> {
    options: TableOptions,
    columns: Vec<Column>,
    mode: DataMode,
    data: Vec<Row>,
    state: ViewState,
    renderer: Renderer<S>,
    emitter: Option<QueryEmitter>,
    search_debounce: Debouncer<String>,
    filter_debounces: HashMap<String, Debouncer<String>>,
    destroyed: bool,
}

impl<S: Surface> DataTable<S> {
    /// Validates `config`, builds the table and mounts it.
    ///
    /// # Errors
    ///
    /// Returns [`DataTableError::Config`] when the mount surface is missing or not
    /// drawable, `columns` is empty, `page_size` is zero, or a backend source lacks
    /// `total_rows` or `on_state_change`.
    pub fn create(config: TableConfig<S>) -> Result<Self> {
        let TableConfig {
            mount,
            columns,
            source,
            options,
        } = config;

        let surface = mount
            .filter(|surface| surface.is_drawable())
            .ok_or_else(|| DataTableError::Config("invalid mount target: provide a drawable surface".to_string()))?;
        if columns.is_empty() {
            return Err(DataTableError::Config("\"columns\" is required and must not be empty".to_string()));
        }
        if options.page_size == 0 {
            return Err(DataTableError::Config("\"page_size\" must be greater than zero".to_string()));
        }

        let (mode, data, total_rows, emitter) = match source {
            DataSource::Frontend { data } => {
                let total = data.len();
                (DataMode::Frontend, data, total, None)
            }
            DataSource::Backend {
                data,
                total_rows,
                on_state_change,
            } => {
                let total = total_rows.ok_or_else(|| {
                    DataTableError::Config("\"total_rows\" is required in backend mode".to_string())
                })?;
                let callback = on_state_change.ok_or_else(|| {
                    DataTableError::Config("\"on_state_change\" callback is required in backend mode".to_string())
                })?;
                (DataMode::Backend, data, total, Some(QueryEmitter::new(callback)))
            }
        };

        let delay = Duration::from_millis(options.search.debounce_ms);
        let mut table = Self {
            state: ViewState::new(options.page_size, total_rows),
            renderer: Renderer::new(surface),
            search_debounce: Debouncer::new(delay),
            filter_debounces: HashMap::new(),
            options,
            columns,
            mode,
            data,
            emitter,
            destroyed: false,
        };

        tracing::debug!(
            mode = ?table.mode,
            columns = table.columns.len(),
            rows = table.data.len(),
            total_rows,
            "creating data table"
        );
        table.rebuild();
        Ok(table)
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    /// Replaces the dataset.
    ///
    /// Frontend tables take the new length as their total. Backend tables take
    /// `total_rows` when given, keep the previous total otherwise, and hide the
    /// loading overlay. The current page is kept, clamped to the new page count.
    pub fn set_data(&mut self, data: Vec<Row>, total_rows: Option<usize>) -> Result<()> {
        self.ensure_alive()?;
        self.data = data;

        match self.mode {
            DataMode::Frontend => self.state.total_rows = self.data.len(),
            DataMode::Backend => {
                if let Some(total) = total_rows {
                    self.state.total_rows = total;
                }
                self.renderer.set_loading_visible(false);
            }
        }
        self.state.recalc_pages();
        tracing::debug!(rows = self.data.len(), total_rows = self.state.total_rows, "data replaced");

        self.render();
        Ok(())
    }

    /// Merges `patch` into the row at `index`. Out-of-range indices are ignored.
    pub fn update_row(&mut self, index: usize, patch: Row) -> Result<()> {
        self.ensure_alive()?;
        let Some(row) = self.data.get_mut(index) else {
            tracing::debug!(index, len = self.data.len(), "ignoring update of missing row");
            return Ok(());
        };
        row.extend(patch);

        self.render();
        Ok(())
    }

    /// Inserts `row` at `index`, or appends it when `index` is `None` or past the end.
    pub fn add_row(&mut self, row: Row, index: Option<usize>) -> Result<()> {
        self.ensure_alive()?;
        match index.filter(|i| *i <= self.data.len()) {
            Some(i) => self.data.insert(i, row),
            None => self.data.push(row),
        }

        self.rows_changed();
        Ok(())
    }

    /// Removes the row at `index`. Out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        self.ensure_alive()?;
        if index >= self.data.len() {
            tracing::debug!(index, len = self.data.len(), "ignoring removal of missing row");
            return Ok(());
        }
        self.data.remove(index);

        self.rows_changed();
        Ok(())
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    /// Changes the page size and returns to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.dispatch(Event::PageSizeChanged(size))
    }

    /// Moves to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        self.dispatch(Event::PageRequested(page))
    }

    /// Sets the global search, cancelling any pending typed search.
    pub fn set_search(&mut self, value: &str) -> Result<()> {
        self.dispatch(Event::SearchSet(value.to_string()))
    }

    /// Sets the filter of column `key`, cancelling any pending typed filter for it.
    pub fn set_column_filter(&mut self, key: &str, value: &str) -> Result<()> {
        self.dispatch(Event::ColumnFilterSet {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    /// Clears the global search and every column filter, including pending typed
    /// input, and empties the live inputs.
    pub fn clear_filters(&mut self) -> Result<()> {
        self.dispatch(Event::FiltersCleared)
    }

    /// Shows or hides the loading overlay.
    pub fn set_loading(&mut self, loading: bool) -> Result<()> {
        self.ensure_alive()?;
        self.renderer.set_loading_visible(loading);
        Ok(())
    }

    /// Owned copy of the current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.clone()
    }

    /// The query string describing the current state.
    #[must_use]
    pub fn query_string(&self) -> String {
        crate::backend::build_query_string(&self.state)
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Replaces the column set and rebuilds the whole table.
    ///
    /// Pending typed filters of columns that no longer exist are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DataTableError::Config`] if `columns` is empty, and
    /// [`DataTableError::Destroyed`] after `destroy()`.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        self.ensure_alive()?;
        if columns.is_empty() {
            return Err(DataTableError::Config("\"columns\" must not be empty".to_string()));
        }
        self.filter_debounces
            .retain(|key, _| columns.iter().any(|c| c.key == *key));
        self.columns = columns;
        tracing::debug!(columns = self.columns.len(), "columns replaced");

        self.rebuild();
        Ok(())
    }

    /// Rebuilds the whole table from the current state.
    pub fn refresh(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.rebuild();
        Ok(())
    }

    /// Cancels pending input, releases every surface binding and clears the
    /// surface. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.search_debounce.cancel();
        for debounce in self.filter_debounces.values_mut() {
            debounce.cancel();
        }
        self.renderer.destroy();
        tracing::debug!("data table destroyed");
    }

    // ------------------------------------------------------------------
    // Event plumbing
    // ------------------------------------------------------------------

    /// Handles user input reported by the surface at time `now`.
    ///
    /// Returns whether the event belonged to one of the table's live bindings.
    pub fn handle_event(&mut self, event: &SurfaceEvent, now: Instant) -> Result<bool> {
        self.ensure_alive()?;
        let Some(event) = self.renderer.resolve(event) else {
            return Ok(false);
        };
        let actions = handle_event(&mut self.state, self.mode, &event);
        self.execute(actions, now);
        Ok(true)
    }

    /// Applies every debounced input whose quiet period has elapsed by `now`, in
    /// deadline order. Returns how many were applied.
    pub fn advance(&mut self, now: Instant) -> Result<usize> {
        self.ensure_alive()?;

        let mut due: Vec<(Instant, Pending)> = Vec::new();
        if let Some(deadline) = self.search_debounce.deadline().filter(|d| *d <= now) {
            due.push((deadline, Pending::Search));
        }
        for (key, debounce) in &self.filter_debounces {
            if let Some(deadline) = debounce.deadline().filter(|d| *d <= now) {
                due.push((deadline, Pending::ColumnFilter(key.clone())));
            }
        }
        due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| pending_rank(&a.1).cmp(&pending_rank(&b.1))));

        let mut fired = 0;
        for (_, pending) in due {
            let event = match pending {
                Pending::Search => self.search_debounce.poll(now).map(Event::SearchCommitted),
                Pending::ColumnFilter(key) => self
                    .filter_debounces
                    .get_mut(&key)
                    .and_then(|d| d.poll(now))
                    .map(|value| Event::ColumnFilterCommitted { key, value }),
            };
            if let Some(event) = event {
                let actions = handle_event(&mut self.state, self.mode, &event);
                self.execute(actions, now);
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Earliest pending debounce deadline, if any input is waiting.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.filter_debounces
            .values()
            .filter_map(Debouncer::deadline)
            .chain(self.search_debounce.deadline())
            .min()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    /// The rows as last supplied: the full dataset in frontend mode, the current
    /// page in backend mode.
    #[must_use]
    pub fn data(&self) -> &[Row] {
        &self.data
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub const fn mode(&self) -> DataMode {
        self.mode
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(DataTableError::Destroyed);
        }
        Ok(())
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        self.ensure_alive()?;
        let actions = handle_event(&mut self.state, self.mode, &event);
        self.execute(actions, Instant::now());
        Ok(())
    }

    /// Row added or removed: frontend tables restart at the first page.
    fn rows_changed(&mut self) {
        if self.mode == DataMode::Frontend {
            self.state.total_rows = self.data.len();
            self.state.reset_page();
            self.state.recalc_pages();
        }
        self.render();
    }

    fn execute(&mut self, actions: Vec<Action>, now: Instant) {
        for action in actions {
            tracing::trace!(?action, "executing action");
            match action {
                Action::ScheduleSearch(value) => self.search_debounce.call(value, now),
                Action::ScheduleColumnFilter { key, value } => {
                    let delay = self.search_debounce.delay();
                    self.filter_debounces
                        .entry(key)
                        .or_insert_with(|| Debouncer::new(delay))
                        .call(value, now);
                }
                Action::CancelSearch => {
                    if self.search_debounce.cancel() {
                        tracing::debug!("pending search cancelled");
                    }
                }
                Action::CancelColumnFilter(key) => {
                    if self.filter_debounces.get_mut(&key).is_some_and(Debouncer::cancel) {
                        tracing::debug!(column = %key, "pending column filter cancelled");
                    }
                }
                Action::CancelAllColumnFilters => {
                    for debounce in self.filter_debounces.values_mut() {
                        debounce.cancel();
                    }
                }
                Action::SyncSearchInput(value) => self.renderer.sync_search_input(&value),
                Action::SyncColumnFilterInput { key, value } => self.renderer.sync_column_filter(&key, &value),
                Action::ClearColumnFilterInputs => self.renderer.clear_column_filters(),
                Action::ShowLoading(visible) => self.renderer.set_loading_visible(visible),
                Action::NotifyHost => {
                    if let Some(emitter) = &mut self.emitter {
                        emitter.emit(&self.state);
                    }
                }
                Action::Render => self.render(),
            }
        }
    }

    /// Updates body, pagination, info and sort indicators.
    fn render(&mut self) {
        let Self {
            options,
            columns,
            mode,
            data,
            state,
            renderer,
            ..
        } = self;

        let rows = visible_rows(*mode, data, columns, state, options);
        let ctx = RenderContext {
            columns: columns.as_slice(),
            options: &*options,
        };
        renderer.update_body(&ctx, state, &rows);
        renderer.update_sort_indicators(&ctx, state);
    }

    /// Builds the whole table from scratch.
    fn rebuild(&mut self) {
        let Self {
            options,
            columns,
            mode,
            data,
            state,
            renderer,
            ..
        } = self;

        let rows = visible_rows(*mode, data, columns, state, options);
        let ctx = RenderContext {
            columns: columns.as_slice(),
            options: &*options,
        };
        renderer.build(&ctx, state, &rows);
    }
}

impl<S: Surface> fmt::Debug for DataTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("mode", &self.mode)
            .field("columns", &self.columns.len())
            .field("rows", &self.data.len())
            .field("state", &self.state)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

/// Rows of the current page.
///
/// In frontend mode this runs the pipeline, stores the post-filter total and clamps
/// the page before slicing. Backend data already is the current page.
fn visible_rows<'a>(
    mode: DataMode,
    data: &'a [Row],
    columns: &[Column],
    state: &mut ViewState,
    options: &TableOptions,
) -> Vec<&'a Row> {
    match mode {
        DataMode::Frontend => {
            let allow_list = options.search.searchable_columns.as_deref();
            let rows = pipeline::filter_and_sort(data, columns, state, allow_list);
            state.total_rows = rows.len();
            state.recalc_pages();
            pipeline::paginate(&rows, state.current_page, state.page_size)
        }
        DataMode::Backend => data.iter().collect(),
    }
}

const fn pending_rank(pending: &Pending) -> u8 {
    match pending {
        Pending::Search => 0,
        Pending::ColumnFilter(_) => 1,
    }
}
