use datatable::app::state::{page_count, ColumnFilters};
use datatable::{handle_event, Action, DataMode, Event, SortOrder, ViewState};
use serde_json::json;

#[test]
fn test_sort_order_cycle() {
    assert_eq!(SortOrder::None.cycle(), SortOrder::Asc);
    assert_eq!(SortOrder::Asc.cycle(), SortOrder::Desc);
    assert_eq!(SortOrder::Desc.cycle(), SortOrder::None);
}

#[test]
fn test_toggle_same_column_visits_three_states() {
    let mut state = ViewState::new(10, 50);

    state.toggle_sort("name");
    assert_eq!((state.sort_by.as_deref(), state.sort_order), (Some("name"), SortOrder::Asc));
    state.toggle_sort("name");
    assert_eq!((state.sort_by.as_deref(), state.sort_order), (Some("name"), SortOrder::Desc));
    state.toggle_sort("name");
    assert_eq!((state.sort_by.as_deref(), state.sort_order), (None, SortOrder::None));
    assert!(!state.is_sorting());
}

#[test]
fn test_toggle_other_column_starts_ascending() {
    let mut state = ViewState::new(10, 50);
    state.toggle_sort("name");
    state.toggle_sort("name");
    state.toggle_sort("age");
    assert_eq!((state.sort_by.as_deref(), state.sort_order), (Some("age"), SortOrder::Asc));
}

#[test]
fn test_page_count_never_below_one() {
    assert_eq!(page_count(0, 10), 1);
    assert_eq!(page_count(1, 10), 1);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(25, 10), 3);
    assert_eq!(page_count(30, 10), 3);
}

#[test]
fn test_recalc_pages_clamps_current_page() {
    let mut state = ViewState::new(10, 100);
    state.current_page = 10;
    state.total_rows = 25;
    state.recalc_pages();
    assert_eq!((state.current_page, state.total_pages), (3, 3));

    state.total_rows = 0;
    state.recalc_pages();
    assert_eq!((state.current_page, state.total_pages), (1, 1));
}

#[test]
fn test_page_bounds() {
    let mut state = ViewState::new(10, 25);
    assert_eq!(state.page_bounds(), (0, 10));
    state.current_page = 3;
    assert_eq!(state.page_bounds(), (20, 25));
}

#[test]
fn test_column_filters_keep_insertion_order() {
    let mut filters = ColumnFilters::default();
    filters.set("city", "Oslo");
    filters.set("name", "");
    filters.set("age", "3");
    filters.set("city", "Paris");

    let all: Vec<_> = filters.iter().collect();
    assert_eq!(all, vec![("city", "Paris"), ("name", ""), ("age", "3")]);

    let active: Vec<_> = filters.active().collect();
    assert_eq!(active, vec![("city", "Paris"), ("age", "3")]);

    filters.clear();
    assert!(filters.is_empty());
}

#[test]
fn test_state_serializes_camel_case() {
    let mut state = ViewState::new(25, 60);
    state.toggle_sort("name");
    state.column_filters.set("city", "Oslo");

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["currentPage"], json!(1));
    assert_eq!(value["pageSize"], json!(25));
    assert_eq!(value["sortBy"], json!("name"));
    assert_eq!(value["sortOrder"], json!("asc"));
    assert_eq!(value["columnFilters"], json!({"city": "Oslo"}));
    assert_eq!(value["totalPages"], json!(3));
}

#[test]
fn test_out_of_range_page_is_ignored() {
    let mut state = ViewState::new(10, 30);
    assert!(handle_event(&mut state, DataMode::Frontend, &Event::PageRequested(0)).is_empty());
    assert!(handle_event(&mut state, DataMode::Frontend, &Event::PageRequested(4)).is_empty());
    assert_eq!(state.current_page, 1);

    let actions = handle_event(&mut state, DataMode::Frontend, &Event::PageRequested(3));
    assert_eq!(actions, vec![Action::Render]);
    assert_eq!(state.current_page, 3);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut state = ViewState::new(10, 30);
    state.current_page = 3;

    assert!(handle_event(&mut state, DataMode::Frontend, &Event::PageSizeChanged(0)).is_empty());
    assert_eq!(state.page_size, 10);

    handle_event(&mut state, DataMode::Frontend, &Event::PageSizeChanged(25));
    assert_eq!((state.current_page, state.page_size, state.total_pages), (1, 25, 2));
}

#[test]
fn test_sort_keeps_current_page() {
    let mut state = ViewState::new(10, 30);
    state.current_page = 2;
    handle_event(&mut state, DataMode::Frontend, &Event::SortToggled("name".into()));
    assert_eq!(state.current_page, 2);
}

#[test]
fn test_typed_input_only_schedules() {
    let mut state = ViewState::new(10, 30);
    state.current_page = 2;

    let actions = handle_event(&mut state, DataMode::Frontend, &Event::SearchTyped("ab".into()));
    assert_eq!(actions, vec![Action::ScheduleSearch("ab".into())]);
    assert_eq!(state.global_search, "");
    assert_eq!(state.current_page, 2);
}

#[test]
fn test_committed_search_resets_page() {
    let mut state = ViewState::new(10, 30);
    state.current_page = 2;

    handle_event(&mut state, DataMode::Frontend, &Event::SearchCommitted("ab".into()));
    assert_eq!(state.global_search, "ab");
    assert_eq!(state.current_page, 1);
}

#[test]
fn test_backend_changes_notify_host() {
    let mut state = ViewState::new(10, 30);
    let actions = handle_event(&mut state, DataMode::Backend, &Event::PageRequested(2));
    assert_eq!(
        actions,
        vec![Action::ShowLoading(true), Action::NotifyHost, Action::Render]
    );
}

#[test]
fn test_programmatic_search_cancels_pending_input() {
    let mut state = ViewState::new(10, 30);
    let actions = handle_event(&mut state, DataMode::Frontend, &Event::SearchSet("x".into()));
    assert_eq!(
        actions,
        vec![
            Action::CancelSearch,
            Action::SyncSearchInput("x".into()),
            Action::Render
        ]
    );
}

#[test]
fn test_clear_filters() {
    let mut state = ViewState::new(10, 30);
    state.global_search = "a".into();
    state.column_filters.set("city", "Oslo");
    state.current_page = 2;

    let actions = handle_event(&mut state, DataMode::Frontend, &Event::FiltersCleared);
    assert_eq!(
        actions,
        vec![
            Action::CancelSearch,
            Action::CancelAllColumnFilters,
            Action::SyncSearchInput(String::new()),
            Action::ClearColumnFilterInputs,
            Action::Render
        ]
    );
    assert!(state.global_search.is_empty());
    assert!(state.column_filters.is_empty());
    assert_eq!(state.current_page, 1);
}
