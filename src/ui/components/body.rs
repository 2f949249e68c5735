//! Body component: one row per visible record, or the empty-state row.

use super::RenderContext;
use crate::domain::{Align, Row};
use crate::ui::helpers::{append, cls};
use crate::ui::surface::{Element, NodeHandle};

/// Builds the `tbody` for `rows`, addressed by `handle`.
///
/// Cells hold the column's rendered markup; custom columns are inserted verbatim.
/// Every second row carries the even-row modifier. With no rows a single cell
/// spanning all columns shows the configured empty text.
#[must_use]
pub fn build_body(ctx: &RenderContext<'_>, rows: &[&Row], handle: NodeHandle) -> Element {
    let classes = &ctx.options.classes;
    let mut tbody = Element::new("tbody")
        .handle(handle)
        .classes(cls("datatable__body", classes.body.as_deref()));

    if rows.is_empty() {
        let cell = Element::new("td")
            .classes(cls("datatable__empty", classes.empty.as_deref()))
            .attr("colspan", ctx.columns.len().to_string())
            .text(ctx.options.empty_text.as_str());
        return tbody.child(Element::new("tr").child(cell));
    }

    for (index, row) in rows.iter().enumerate() {
        let mut row_classes = cls("datatable__row", classes.row.as_deref());
        if index % 2 == 1 {
            row_classes.push("datatable__row--even".to_string());
            append(&mut row_classes, classes.row_even.as_deref());
        }

        let mut tr = Element::new("tr").classes(row_classes);
        for column in ctx.columns {
            let mut td = Element::new("td").classes(cls("datatable__cell", classes.cell.as_deref()));
            let align = column.resolved_align();
            if align != Align::Left {
                td = td.style("text-align", align.as_str());
            }
            tr = tr.child(td.markup(column.render_value(row, index)));
        }
        tbody = tbody.child(tr);
    }

    tbody
}
