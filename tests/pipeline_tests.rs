mod common;

use common::row;
use datatable::app::pipeline::{filter_and_sort, paginate, process};
use datatable::{Column, Row, ViewState};
use serde_json::json;

fn data() -> Vec<Row> {
    vec![
        row(&[("name", json!("Alice")), ("city", json!("London")), ("age", json!(31))]),
        row(&[("name", json!("Lonnie")), ("city", json!("Paris")), ("age", json!(25))]),
        row(&[("name", json!("Bob")), ("city", json!("Oslo")), ("age", json!(31))]),
        row(&[("name", json!("Carla")), ("city", json!("Rome")), ("age", json!(25))]),
        row(&[("name", json!("Dan")), ("city", json!("Boston")), ("age", json!(40))]),
    ]
}

fn columns() -> Vec<Column> {
    vec![
        Column::string("name", "Name").sortable(true),
        Column::string("city", "City").sortable(true),
        Column::number("age", "Age").sortable(true),
        Column::custom("note", "Note", |_, _| "<i>note</i>".to_string()),
    ]
}

fn names(rows: &[&Row]) -> Vec<String> {
    rows.iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_global_search_matches_any_column() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.global_search = "lon".into();

    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Alice", "Lonnie"]);
}

#[test]
fn test_column_filters_must_all_match() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.column_filters.set("city", "o");
    state.column_filters.set("name", "b");

    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Bob"]);
}

#[test]
fn test_search_and_filters_combine() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.global_search = "o".into();
    state.column_filters.set("age", "31");

    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Alice", "Bob"]);
}

#[test]
fn test_empty_filters_are_inactive() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.column_filters.set("city", "");

    assert_eq!(filter_and_sort(&data, &columns(), &state, None).len(), 5);
}

#[test]
fn test_filters_on_unknown_columns_are_ignored() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.column_filters.set("missing", "zzz");

    assert_eq!(filter_and_sort(&data, &columns(), &state, None).len(), 5);
}

#[test]
fn test_allow_list_restricts_global_search() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.global_search = "london".into();

    let allow = vec!["name".to_string()];
    assert!(filter_and_sort(&data, &columns(), &state, Some(&allow)).is_empty());

    let allow = vec!["city".to_string()];
    assert_eq!(filter_and_sort(&data, &columns(), &state, Some(&allow)).len(), 1);
}

#[test]
fn test_empty_allow_list_searches_all_columns() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.global_search = "lon".into();

    let rows = filter_and_sort(&data, &columns(), &state, Some(&[]));
    assert_eq!(names(&rows), vec!["Alice", "Lonnie"]);
}

#[test]
fn test_custom_columns_are_not_searched_by_default() {
    let data = data();
    let mut state = ViewState::new(10, data.len());
    state.global_search = "note".into();

    let allow = vec!["note".to_string()];
    assert!(filter_and_sort(&data, &columns(), &state, None).is_empty());
    assert!(filter_and_sort(&data, &columns(), &state, Some(&allow)).is_empty());
}

#[test]
fn test_sort_is_stable() {
    let data = data();
    let mut state = ViewState::new(10, data.len());

    state.toggle_sort("age");
    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Lonnie", "Carla", "Alice", "Bob", "Dan"]);

    state.toggle_sort("age");
    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Dan", "Alice", "Bob", "Lonnie", "Carla"]);

    state.toggle_sort("age");
    let rows = filter_and_sort(&data, &columns(), &state, None);
    assert_eq!(names(&rows), vec!["Alice", "Lonnie", "Bob", "Carla", "Dan"]);
}

#[test]
fn test_sort_by_unsortable_column_keeps_order() {
    let data = data();
    let columns = vec![Column::string("name", "Name"), Column::string("city", "City")];
    let mut state = ViewState::new(10, data.len());
    state.toggle_sort("name");

    let rows = filter_and_sort(&data, &columns, &state, None);
    assert_eq!(names(&rows), vec!["Alice", "Lonnie", "Bob", "Carla", "Dan"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let data = data();
    let mut state = ViewState::new(2, data.len());
    state.global_search = "on".into();
    state.toggle_sort("name");

    let first = process(&data, &columns(), &state, None);
    let second = process(&data, &columns(), &state, None);
    assert_eq!(first, second);
    assert_eq!(first.filtered_total, 3);
    assert_eq!(names(&first.page_rows), vec!["Alice", "Dan"]);
}

#[test]
fn test_paginate_slices_current_page() {
    let data = data();
    let all: Vec<&Row> = data.iter().collect();

    assert_eq!(names(&paginate(&all, 1, 2)), vec!["Alice", "Lonnie"]);
    assert_eq!(names(&paginate(&all, 3, 2)), vec!["Dan"]);
    assert!(paginate(&all, 4, 2).is_empty());
}
