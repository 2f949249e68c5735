use datatable::{build_query_string, ViewState};

#[test]
fn test_default_query() {
    assert_eq!(build_query_string(&ViewState::new(10, 0)), "?page=1&pageSize=10");
}

#[test]
fn test_sort_parameters() {
    let mut state = ViewState::new(10, 100);
    state.toggle_sort("created_at");
    state.toggle_sort("created_at");
    assert_eq!(
        build_query_string(&state),
        "?page=1&pageSize=10&sortBy=created_at&sortOrder=desc"
    );

    state.toggle_sort("created_at");
    assert_eq!(build_query_string(&state), "?page=1&pageSize=10");
}

#[test]
fn test_filters_keep_first_set_order_and_skip_empty() {
    let mut state = ViewState::new(10, 100);
    state.column_filters.set("b", "2");
    state.column_filters.set("a", "");
    state.column_filters.set("c", "3");
    state.column_filters.set("b", "22");

    assert_eq!(
        build_query_string(&state),
        "?page=1&pageSize=10&filter[b]=22&filter[c]=3"
    );
}

#[test]
fn test_keys_and_values_are_percent_encoded() {
    let mut state = ViewState::new(10, 100);
    state.global_search = "café & co".into();
    state.column_filters.set("first name", "a=b?");

    assert_eq!(
        build_query_string(&state),
        "?page=1&pageSize=10&search=caf%C3%A9%20%26%20co&filter[first%20name]=a%3Db%3F"
    );
}

#[test]
fn test_full_query_order() {
    let mut state = ViewState::new(50, 500);
    state.current_page = 4;
    state.column_filters.set("status", "open");
    state.global_search = "bug".into();
    state.toggle_sort("id");

    assert_eq!(
        build_query_string(&state),
        "?page=4&pageSize=50&sortBy=id&sortOrder=asc&search=bug&filter[status]=open"
    );
}
