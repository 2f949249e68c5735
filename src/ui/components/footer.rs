//! Footer component: info text, pagination control and loading overlay.

use super::{Assembly, RenderContext, Target};
use crate::app::state::ViewState;
use crate::ui::helpers::{append, cls};
use crate::ui::surface::{Element, EventKind, NodeHandle};
use crate::ui::theme::{icons, ClassOverrides};
use crate::ui::viewmodel::{info_text, PageItem, PaginationModel};

/// Builds the pagination control, addressed by `handle`.
///
/// With a single page the container is rendered empty. Otherwise it holds a
/// previous button, the numbered buttons with ellipses, and a next button. Disabled
/// buttons get no listener.
///
/// # Layout
///
/// ```text
/// [‹] [1] … [4] [5] [6] … [10] [›]
/// ```
#[must_use]
pub fn build_pagination(ctx: &RenderContext<'_>, state: &ViewState, handle: NodeHandle, asm: &mut Assembly) -> Element {
    let classes = &ctx.options.classes;
    let mut container = Element::new("div")
        .handle(handle)
        .classes(cls("datatable__pagination", classes.pagination.as_deref()));

    let Some(model) = PaginationModel::from_state(state) else {
        return container;
    };

    let prev = page_button(classes, asm, model.current - 1, !model.has_prev())
        .attr("aria-label", "Previous page")
        .markup(icons::CHEVRON_LEFT);
    container = container.child(prev);

    for item in &model.items {
        container = container.child(match *item {
            PageItem::Ellipsis => Element::new("span").class("datatable__page-ellipsis").text("..."),
            PageItem::Page(page) => {
                let mut button = page_button(classes, asm, page, false).text(page.to_string());
                if page == model.current {
                    button.classes.push("datatable__page-btn--active".to_string());
                    append(&mut button.classes, classes.page_button_active.as_deref());
                    button = button.attr("aria-current", "page");
                }
                button
            }
        });
    }

    let next = page_button(classes, asm, model.current + 1, !model.has_next())
        .attr("aria-label", "Next page")
        .markup(icons::CHEVRON_RIGHT);
    container.child(next)
}

fn page_button(classes: &ClassOverrides, asm: &mut Assembly, page: usize, disabled: bool) -> Element {
    let handle = asm.handle();
    let button = Element::new("button")
        .handle(handle)
        .classes(cls("datatable__page-btn", classes.page_button.as_deref()))
        .attr("type", "button");

    if disabled {
        return button.class("datatable__page-btn--disabled").attr("disabled", "disabled");
    }
    asm.wire(handle, EventKind::Click, Target::Page(page));
    button
}

/// Builds the info line, addressed by `handle`.
#[must_use]
pub fn build_info(ctx: &RenderContext<'_>, state: &ViewState, handle: NodeHandle) -> Element {
    Element::new("div")
        .handle(handle)
        .classes(cls("datatable__info", ctx.options.classes.info.as_deref()))
        .text(info_text(state))
}

/// Builds the hidden loading overlay, addressed by `handle`.
#[must_use]
pub fn build_loading(ctx: &RenderContext<'_>, handle: NodeHandle) -> Element {
    Element::new("div")
        .handle(handle)
        .classes(cls("datatable__loading", ctx.options.classes.loading.as_deref()))
        .attr("aria-live", "polite")
        .hidden(true)
        .markup(icons::SPINNER)
        .child(Element::new("span").text(ctx.options.loading_text.as_str()))
}
