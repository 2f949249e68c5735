#![allow(dead_code)]

use datatable::ui::surface::{Element, Node, NodeHandle};
use datatable::{Column, DataSource, DataTable, MemorySurface, Row, TableConfig, TableOptions};
use serde_json::{json, Value};

pub fn row(fields: &[(&str, Value)]) -> Row {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// `count` people with ids starting at 1; even ids live in Paris, odd ids in Oslo.
pub fn people(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| {
            row(&[
                ("id", json!(i)),
                ("name", json!(format!("user{i:02}"))),
                ("city", json!(if i % 2 == 0 { "Paris" } else { "Oslo" })),
            ])
        })
        .collect()
}

pub fn people_columns() -> Vec<Column> {
    vec![
        Column::number("id", "ID").sortable(true),
        Column::string("name", "Name").sortable(true),
        Column::string("city", "City").sortable(true),
    ]
}

pub fn frontend_table(data: Vec<Row>, options: TableOptions) -> DataTable<MemorySurface> {
    DataTable::create(TableConfig {
        mount: Some(MemorySurface::new()),
        columns: people_columns(),
        source: DataSource::Frontend { data },
        options,
    })
    .expect("valid config")
}

/// Markup of every body cell, row by row.
pub fn body_cells(surface: &MemorySurface) -> Vec<Vec<String>> {
    surface
        .find_by_class("datatable__row")
        .into_iter()
        .map(|tr| tr.child_elements().map(markup_of).collect())
        .collect()
}

/// Rendered text of the cells in column `index`.
pub fn column_values(surface: &MemorySurface, index: usize) -> Vec<String> {
    body_cells(surface)
        .into_iter()
        .map(|cells| cells[index].clone())
        .collect()
}

pub fn markup_of(element: &Element) -> String {
    element
        .children
        .iter()
        .map(|child| match child {
            Node::Markup(m) => m.clone(),
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.to_html(),
        })
        .collect()
}

/// Handle of the header cell of column `key`.
pub fn header_cell(surface: &MemorySurface, key: &str) -> NodeHandle {
    surface
        .find_by_class("datatable__header-cell")
        .into_iter()
        .find(|th| th.get_attr("data-column-key") == Some(key))
        .and_then(|th| th.handle)
        .expect("header cell")
}

pub fn handle_by_class(surface: &MemorySurface, class: &str) -> NodeHandle {
    surface
        .first_by_class(class)
        .and_then(|e| e.handle)
        .expect("element with handle")
}

pub fn info_text(surface: &MemorySurface) -> String {
    surface
        .first_by_class("datatable__info")
        .map(Element::text_content)
        .unwrap_or_default()
}
