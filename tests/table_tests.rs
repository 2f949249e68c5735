mod common;

use common::{
    body_cells, column_values, frontend_table, handle_by_class, header_cell, info_text, people, people_columns, row,
};
use datatable::ui::surface::{EventKind, Surface};
use datatable::{
    Column, DataSource, DataTable, DataTableError, MemorySurface, SearchMode, TableConfig, TableOptions, ViewState,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

type Seen = Rc<RefCell<Vec<(String, ViewState)>>>;

const LOADING: &str = "datatable__loading";

fn backend_table(seen: &Seen, options: TableOptions) -> DataTable<MemorySurface> {
    let sink = Rc::clone(seen);
    DataTable::create(TableConfig {
        mount: Some(MemorySurface::new()),
        columns: people_columns(),
        source: DataSource::Backend {
            data: people(10),
            total_rows: Some(95),
            on_state_change: Some(Box::new(move |query: &str, state: ViewState| {
                sink.borrow_mut().push((query.to_string(), state));
            })),
        },
        options,
    })
    .unwrap()
}

fn options_with_mode(mode: SearchMode) -> TableOptions {
    let mut options = TableOptions::default();
    options.search.mode = mode;
    options
}

fn column_filter_input(table: &DataTable<MemorySurface>, label: &str) -> datatable::ui::NodeHandle {
    table
        .surface()
        .find_by_class("datatable__column-filter")
        .into_iter()
        .find(|input| input.get_attr("aria-label") == Some(label))
        .and_then(|input| input.handle)
        .unwrap()
}

fn type_into(table: &mut DataTable<MemorySurface>, handle: datatable::ui::NodeHandle, text: &str, at: Instant) {
    let event = table
        .surface_mut()
        .fire(handle, EventKind::Input, Some(text))
        .unwrap();
    assert!(table.handle_event(&event, at).unwrap());
}

fn click(table: &mut DataTable<MemorySurface>, handle: datatable::ui::NodeHandle) {
    let event = table
        .surface_mut()
        .fire(handle, EventKind::Click, None)
        .unwrap();
    assert!(table.handle_event(&event, Instant::now()).unwrap());
}

// ---------------------------------------------------------------------
// Frontend
// ---------------------------------------------------------------------

#[test]
fn test_frontend_pagination() {
    let mut table = frontend_table(people(25), TableOptions::default());
    assert_eq!(table.state().total_pages, 3);
    assert_eq!(body_cells(table.surface()).len(), 10);
    assert_eq!(info_text(table.surface()), "Showing 1-10 of 25 entries");

    table.go_to_page(3).unwrap();
    assert_eq!(body_cells(table.surface()).len(), 5);
    assert_eq!(info_text(table.surface()), "Showing 21-25 of 25 entries");
    assert_eq!(
        table
            .surface()
            .first_by_class("datatable__page-btn--active")
            .unwrap()
            .text_content(),
        "3"
    );

    table.go_to_page(4).unwrap();
    table.go_to_page(0).unwrap();
    assert_eq!(table.state().current_page, 3);
    assert_eq!(table.surface().mount_count(), 1);
}

#[test]
fn test_header_click_cycles_sort() {
    let mut table = frontend_table(people(25), TableOptions::default());
    let id = header_cell(table.surface(), "id");

    click(&mut table, id);
    assert_eq!(column_values(table.surface(), 0)[0], "1");

    click(&mut table, id);
    assert_eq!(column_values(table.surface(), 0)[0], "25");
    assert!(table
        .surface()
        .find(id)
        .unwrap()
        .has_class("datatable__header-cell--sorted-desc"));

    click(&mut table, id);
    assert_eq!(table.state().sort_by, None);
    assert_eq!(column_values(table.surface(), 0)[0], "1");
    assert!(!table
        .surface()
        .find(id)
        .unwrap()
        .has_class("datatable__header-cell--sorted-desc"));
}

#[test]
fn test_sort_keeps_page_and_reorders_it() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.go_to_page(3).unwrap();

    let id = header_cell(table.surface(), "id");
    click(&mut table, id);
    click(&mut table, id);

    assert_eq!(table.state().current_page, 3);
    assert_eq!(column_values(table.surface(), 0), vec!["5", "4", "3", "2", "1"]);
}

#[test]
fn test_search_resets_page_and_totals() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.go_to_page(3).unwrap();
    table.set_search("Paris").unwrap();

    let state = table.state();
    assert_eq!((state.current_page, state.total_rows, state.total_pages), (1, 12, 2));
    assert_eq!(info_text(table.surface()), "Showing 1-10 of 12 entries");
    assert_eq!(table.query_string(), "?page=1&pageSize=10&search=Paris");
}

#[test]
fn test_empty_searchable_columns_from_toml_searches_everything() {
    let options = TableOptions::from_toml_str("[search]\nsearchable_columns = []\n").unwrap();
    let mut table = frontend_table(people(5), options);
    table.set_search("user").unwrap();

    assert_eq!(table.state().total_rows, 5);
    assert_eq!(column_values(table.surface(), 0), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_filtered_sorted_page() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.set_column_filter("city", "oslo").unwrap();
    let name = header_cell(table.surface(), "name");
    click(&mut table, name);
    click(&mut table, name);
    table.go_to_page(2).unwrap();

    assert_eq!(table.state().total_rows, 13);
    assert_eq!(column_values(table.surface(), 0), vec!["5", "3", "1"]);
}

#[test]
fn test_set_data_clamps_page() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.go_to_page(3).unwrap();
    table.set_data(people(12), None).unwrap();

    assert_eq!(table.state().current_page, 2);
    assert_eq!(column_values(table.surface(), 0), vec!["11", "12"]);
    assert_eq!(info_text(table.surface()), "Showing 11-12 of 12 entries");
}

#[test]
fn test_typed_search_is_debounced() {
    let mut table = frontend_table(people(25), TableOptions::default());
    let input = handle_by_class(table.surface(), "datatable__search-input");
    let t0 = Instant::now();

    type_into(&mut table, input, "user1", t0);
    type_into(&mut table, input, "user2", t0 + Duration::from_millis(100));
    assert_eq!(table.next_deadline(), Some(t0 + Duration::from_millis(400)));

    assert_eq!(table.advance(t0 + Duration::from_millis(350)).unwrap(), 0);
    assert_eq!(table.state().global_search, "");

    assert_eq!(table.advance(t0 + Duration::from_millis(400)).unwrap(), 1);
    assert_eq!(table.state().global_search, "user2");
    assert_eq!(table.state().total_rows, 6);
    assert_eq!(table.next_deadline(), None);
}

#[test]
fn test_set_search_cancels_pending_input() {
    let mut table = frontend_table(people(25), TableOptions::default());
    let input = handle_by_class(table.surface(), "datatable__search-input");
    let t0 = Instant::now();

    type_into(&mut table, input, "user1", t0);
    table.set_search("Oslo").unwrap();

    assert_eq!(table.advance(t0 + Duration::from_secs(1)).unwrap(), 0);
    assert_eq!(table.state().global_search, "Oslo");
    assert_eq!(table.state().total_rows, 13);
    assert_eq!(table.surface().value(input).as_deref(), Some("Oslo"));
}

#[test]
fn test_typed_column_filter_is_debounced() {
    let mut table = frontend_table(people(25), options_with_mode(SearchMode::Column));
    assert!(table.surface().first_by_class("datatable__search-input").is_none());

    let city = column_filter_input(&table, "Filter City");
    let t0 = Instant::now();
    type_into(&mut table, city, "par", t0);

    assert_eq!(table.advance(t0 + Duration::from_millis(299)).unwrap(), 0);
    assert_eq!(table.advance(t0 + Duration::from_millis(300)).unwrap(), 1);
    assert_eq!(table.state().column_filters.get("city"), Some("par"));
    assert_eq!(table.state().total_rows, 12);
}

#[test]
fn test_search_and_filter_due_together() {
    let mut table = frontend_table(people(25), options_with_mode(SearchMode::Both));
    let search = handle_by_class(table.surface(), "datatable__search-input");
    let city = column_filter_input(&table, "Filter City");
    let t0 = Instant::now();

    type_into(&mut table, city, "oslo", t0);
    type_into(&mut table, search, "user1", t0);

    assert_eq!(table.advance(t0 + Duration::from_millis(300)).unwrap(), 2);
    assert_eq!(table.state().total_rows, 5);
}

#[test]
fn test_clear_filters_cancels_everything() {
    let mut table = frontend_table(people(25), options_with_mode(SearchMode::Both));
    let search = handle_by_class(table.surface(), "datatable__search-input");
    let city = column_filter_input(&table, "Filter City");

    table.set_column_filter("city", "Paris").unwrap();
    assert_eq!(table.surface().value(city).as_deref(), Some("Paris"));

    let t0 = Instant::now();
    type_into(&mut table, search, "zzz", t0);
    table.clear_filters().unwrap();

    assert_eq!(table.advance(t0 + Duration::from_secs(1)).unwrap(), 0);
    let state = table.state();
    assert!(state.global_search.is_empty());
    assert!(state.column_filters.is_empty());
    assert_eq!(state.total_rows, 25);
    assert_eq!(table.surface().value(search).as_deref(), Some(""));
    assert_eq!(table.surface().value(city).as_deref(), Some(""));
}

#[test]
fn test_page_size_select() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.go_to_page(2).unwrap();

    let select = handle_by_class(table.surface(), "datatable__page-size-select");
    let event = table
        .surface_mut()
        .fire(select, EventKind::Change, Some("25"))
        .unwrap();
    assert!(table.handle_event(&event, Instant::now()).unwrap());

    let state = table.state();
    assert_eq!((state.page_size, state.current_page, state.total_pages), (25, 1, 1));
    assert!(table.surface().find_by_class("datatable__page-btn").is_empty());
}

#[test]
fn test_row_mutations() {
    let mut table = frontend_table(people(25), TableOptions::default());
    table.go_to_page(3).unwrap();

    table.update_row(0, row(&[("name", json!("zed"))])).unwrap();
    assert_eq!(table.data()[0]["name"], json!("zed"));
    assert_eq!(table.data()[0]["id"], json!(1));
    assert_eq!(table.state().current_page, 3);

    table
        .add_row(row(&[("id", json!(0)), ("name", json!("new")), ("city", json!("Rome"))]), Some(0))
        .unwrap();
    assert_eq!(table.state().current_page, 1);
    assert_eq!(table.state().total_rows, 26);
    assert_eq!(column_values(table.surface(), 1)[0], "new");

    table.remove_row(100).unwrap();
    assert_eq!(table.data().len(), 26);
    table.remove_row(0).unwrap();
    assert_eq!(table.data().len(), 25);
    assert_eq!(column_values(table.surface(), 1)[0], "zed");
}

#[test]
fn test_custom_markup_reaches_surface() {
    let columns = vec![
        Column::string("name", "Name"),
        Column::custom("action", "Action", |r, _| {
            format!("<a href=\"#{}\">edit</a>", r["name"].as_str().unwrap_or_default())
        }),
    ];
    let table = DataTable::create(TableConfig {
        mount: Some(MemorySurface::new()),
        columns,
        source: DataSource::Frontend {
            data: vec![row(&[("name", json!("<b>"))])],
        },
        options: TableOptions::default(),
    })
    .unwrap();

    let html = table.surface().html();
    assert!(html.contains("<a href=\"#<b>\">edit</a>"));
    assert!(html.contains("&lt;b&gt;"));
}

#[test]
fn test_empty_table() {
    let table = frontend_table(Vec::new(), TableOptions::default());
    let empty = table.surface().first_by_class("datatable__empty").unwrap();
    assert_eq!(empty.text_content(), "No data available");
    assert_eq!(empty.get_attr("colspan"), Some("3"));
    assert_eq!(info_text(table.surface()), "No entries");
    assert!(table.surface().find_by_class("datatable__page-btn").is_empty());
}

#[test]
fn test_set_columns_rebuilds() {
    let mut table = frontend_table(people(5), TableOptions::default());
    assert!(matches!(table.set_columns(Vec::new()), Err(DataTableError::Config(_))));

    table.set_columns(vec![Column::string("name", "Name")]).unwrap();
    assert_eq!(table.surface().mount_count(), 2);
    assert!(body_cells(table.surface()).iter().all(|cells| cells.len() == 1));
    assert_eq!(table.columns().len(), 1);
}

#[test]
fn test_loading_overlay_and_refresh() {
    let mut table = frontend_table(people(5), TableOptions::default());
    assert!(table.surface().first_by_class(LOADING).unwrap().hidden);

    table.set_loading(true).unwrap();
    assert!(!table.surface().first_by_class(LOADING).unwrap().hidden);

    table.refresh().unwrap();
    assert!(table.surface().first_by_class(LOADING).unwrap().hidden);
    assert_eq!(table.surface().mount_count(), 2);
}

// ---------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------

#[test]
fn test_backend_page_change_notifies_host() {
    let seen: Seen = Rc::default();
    let mut table = backend_table(&seen, TableOptions::default());
    assert!(seen.borrow().is_empty());

    table.go_to_page(2).unwrap();

    {
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "?page=2&pageSize=10");
        assert_eq!(seen[0].1.current_page, 2);
    }
    assert_eq!(table.data(), people(10).as_slice());
    assert_eq!(column_values(table.surface(), 0)[0], "1");
    assert_eq!(info_text(table.surface()), "Showing 11-20 of 95 entries");
    assert!(!table.surface().first_by_class(LOADING).unwrap().hidden);

    table.set_data(people(5), Some(42)).unwrap();
    assert!(table.surface().first_by_class(LOADING).unwrap().hidden);
    let state = table.state();
    assert_eq!((state.total_rows, state.total_pages, state.current_page), (42, 5, 2));
    assert_eq!(body_cells(table.surface()).len(), 5);
}

#[test]
fn test_backend_same_page_still_notifies() {
    let seen: Seen = Rc::default();
    let mut table = backend_table(&seen, TableOptions::default());
    table.go_to_page(2).unwrap();
    table.go_to_page(2).unwrap();
    table.go_to_page(11).unwrap();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_backend_sort_and_search_queries() {
    let seen: Seen = Rc::default();
    let mut table = backend_table(&seen, TableOptions::default());
    table.go_to_page(2).unwrap();

    let name = header_cell(table.surface(), "name");
    click(&mut table, name);
    table.set_search("x y").unwrap();
    table.set_column_filter("city", "Oslo").unwrap();

    let queries: Vec<String> = seen.borrow().iter().map(|(q, _)| q.clone()).collect();
    assert_eq!(
        queries,
        vec![
            "?page=2&pageSize=10",
            "?page=2&pageSize=10&sortBy=name&sortOrder=asc",
            "?page=1&pageSize=10&sortBy=name&sortOrder=asc&search=x%20y",
            "?page=1&pageSize=10&sortBy=name&sortOrder=asc&search=x%20y&filter[city]=Oslo",
        ]
    );
}

#[test]
fn test_backend_typed_search_notifies_after_quiet_period() {
    let seen: Seen = Rc::default();
    let mut table = backend_table(&seen, TableOptions::default());
    let input = handle_by_class(table.surface(), "datatable__search-input");
    let t0 = Instant::now();

    type_into(&mut table, input, "ab", t0);
    type_into(&mut table, input, "abc", t0 + Duration::from_millis(200));
    assert!(seen.borrow().is_empty());

    assert_eq!(table.advance(t0 + Duration::from_millis(500)).unwrap(), 1);
    assert_eq!(seen.borrow()[0].0, "?page=1&pageSize=10&search=abc");
}

// ---------------------------------------------------------------------
// Lifecycle and configuration
// ---------------------------------------------------------------------

#[test]
fn test_destroyed_table_rejects_operations() {
    let mut table = frontend_table(people(25), TableOptions::default());
    let input = handle_by_class(table.surface(), "datatable__search-input");
    type_into(&mut table, input, "user", Instant::now());

    table.destroy();
    assert!(table.is_destroyed());
    assert_eq!(table.next_deadline(), None);
    assert_eq!(table.surface().html(), "");
    assert_eq!(table.surface().live_listeners(), 0);
    assert_eq!(table.surface().double_releases(), 0);

    assert!(matches!(table.go_to_page(1), Err(DataTableError::Destroyed)));
    assert!(matches!(table.set_data(people(2), None), Err(DataTableError::Destroyed)));
    assert!(matches!(table.set_search("a"), Err(DataTableError::Destroyed)));
    assert!(matches!(table.refresh(), Err(DataTableError::Destroyed)));
    assert!(matches!(table.advance(Instant::now()), Err(DataTableError::Destroyed)));

    table.destroy();
    assert_eq!(table.surface().double_releases(), 0);
    assert_eq!(table.state().total_rows, 25);
    assert_eq!(table.query_string(), "?page=1&pageSize=10");
}

fn create_error(config: TableConfig<MemorySurface>) -> String {
    match DataTable::create(config) {
        Err(DataTableError::Config(message)) => message,
        other => panic!("expected config error, got {other:?}"),
    }
}

fn frontend_config(mount: Option<MemorySurface>) -> TableConfig<MemorySurface> {
    TableConfig {
        mount,
        columns: people_columns(),
        source: DataSource::Frontend { data: people(3) },
        options: TableOptions::default(),
    }
}

#[test]
fn test_config_errors() {
    assert!(create_error(frontend_config(None)).contains("mount"));
    assert!(create_error(frontend_config(Some(MemorySurface::detached()))).contains("mount"));

    let mut config = frontend_config(Some(MemorySurface::new()));
    config.columns.clear();
    assert!(create_error(config).contains("columns"));

    let mut config = frontend_config(Some(MemorySurface::new()));
    config.options.page_size = 0;
    assert!(create_error(config).contains("page_size"));

    let mut config = frontend_config(Some(MemorySurface::new()));
    config.source = DataSource::Backend {
        data: Vec::new(),
        total_rows: None,
        on_state_change: Some(Box::new(|_: &str, _: ViewState| {})),
    };
    assert!(create_error(config).contains("total_rows"));

    let mut config = frontend_config(Some(MemorySurface::new()));
    config.source = DataSource::Backend {
        data: Vec::new(),
        total_rows: Some(10),
        on_state_change: None,
    };
    assert!(create_error(config).contains("on_state_change"));
}
