//! Header component: column labels, sort affordances and the column-filter row.
//!
//! Sortable header cells are keyboard-operable (`role="button"`, `tabindex="0"`)
//! and listen for both clicks and key presses. Their sort icon lives in its own
//! wrapper node so the renderer can swap it without rebuilding the header.

use super::{Assembly, RenderContext, Target};
use crate::app::state::{SortOrder, ViewState};
use crate::domain::Align;
use crate::ui::helpers::{append, cls};
use crate::ui::surface::{Element, EventKind, NodeHandle};
use crate::ui::theme::{icons, ClassOverrides};
use crate::ui::viewmodel::HeaderCellModel;
use std::collections::HashMap;

/// Handles of one sortable header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCell {
    pub cell: NodeHandle,
    pub icon: NodeHandle,
}

/// Handles the renderer keeps after building the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRefs {
    /// Sortable cells by column key.
    pub sort_cells: HashMap<String, SortCell>,
    /// Column filter inputs by column key.
    pub column_filters: HashMap<String, NodeHandle>,
}

/// Icon markup for a sort direction.
#[must_use]
pub const fn sort_icon(order: SortOrder) -> &'static str {
    match order {
        SortOrder::None => icons::SORT_NONE,
        SortOrder::Asc => icons::SORT_ASC,
        SortOrder::Desc => icons::SORT_DESC,
    }
}

/// Class list of a header cell, including sort-state modifiers.
#[must_use]
pub fn header_cell_classes(model: &HeaderCellModel, classes: &ClassOverrides) -> Vec<String> {
    let mut list = cls("datatable__header-cell", classes.header_cell.as_deref());
    if model.sortable {
        list.push("datatable__header-cell--sortable".to_string());
        match model.sort {
            SortOrder::Asc => list.push("datatable__header-cell--sorted-asc".to_string()),
            SortOrder::Desc => list.push("datatable__header-cell--sorted-desc".to_string()),
            SortOrder::None => {}
        }
        if model.is_active() {
            append(&mut list, classes.header_cell_active.as_deref());
        }
    }
    list
}

/// Builds the `thead` with its header row and, for column search modes, the filter
/// row.
#[must_use]
pub fn build_header(ctx: &RenderContext<'_>, state: &ViewState, asm: &mut Assembly) -> (Element, HeaderRefs) {
    let classes = &ctx.options.classes;
    let mut refs = HeaderRefs::default();

    let mut row = Element::new("tr").classes(cls("datatable__header-row", classes.header_row.as_deref()));
    for column in ctx.columns {
        let model = HeaderCellModel::new(column, state);
        let handle = asm.handle();

        let mut cell = Element::new("th")
            .handle(handle)
            .classes(header_cell_classes(&model, classes))
            .attr("data-column-key", model.key.as_str());
        if let Some(width) = &model.width {
            cell = cell.style("width", width.as_str());
        }
        if model.align != Align::Left {
            cell = cell.style("text-align", model.align.as_str());
        }
        cell = cell.child(Element::new("span").class("datatable__header-label").text(model.label.as_str()));

        if model.sortable {
            let icon = asm.handle();
            cell = cell
                .attr("role", "button")
                .attr("tabindex", "0")
                .attr("aria-label", format!("Sort by {}", model.label))
                .child(
                    Element::new("span")
                        .handle(icon)
                        .class("datatable__sort-icon-wrapper")
                        .markup(sort_icon(model.sort)),
                );
            asm.wire(handle, EventKind::Click, Target::Sort(model.key.clone()));
            asm.wire(handle, EventKind::KeyDown, Target::Sort(model.key.clone()));
            refs.sort_cells.insert(model.key.clone(), SortCell { cell: handle, icon });
        }

        row = row.child(cell);
    }

    let mut thead = Element::new("thead")
        .classes(cls("datatable__header", classes.header.as_deref()))
        .child(row);

    if ctx.options.search.mode.has_column_filters() {
        let mut filter_row = Element::new("tr").class("datatable__filter-row");
        for column in ctx.columns {
            let mut td = Element::new("td").class("datatable__filter-cell");
            if column.is_searchable() {
                let handle = asm.handle();
                td = td.child(
                    Element::new("input")
                        .handle(handle)
                        .classes(cls("datatable__column-filter", classes.column_filter.as_deref()))
                        .attr("type", "text")
                        .attr("placeholder", "Filter...")
                        .attr("aria-label", format!("Filter {}", column.label))
                        .attr("value", state.column_filters.get(&column.key).unwrap_or_default()),
                );
                asm.wire(handle, EventKind::Input, Target::ColumnFilter(column.key.clone()));
                refs.column_filters.insert(column.key.clone(), handle);
            }
            filter_row = filter_row.child(td);
        }
        thead = thead.child(filter_row);
    }

    (thead, refs)
}
