//! Toolbar component: global search box and page-size selector.

use super::{Assembly, RenderContext, Target};
use crate::app::state::ViewState;
use crate::ui::helpers::cls;
use crate::ui::surface::{Element, EventKind, NodeHandle};
use crate::ui::theme::icons;

/// Handles of the toolbar inputs the renderer keeps in sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarRefs {
    pub search_input: Option<NodeHandle>,
    pub page_size_select: Option<NodeHandle>,
}

/// Builds the toolbar, or `None` when both of its parts are switched off.
///
/// The search box appears when search is enabled and the search mode includes the
/// global box. The page-size selector appears when `show_page_size` is set and
/// lists `page_size_options` with the current size selected.
#[must_use]
pub fn build_toolbar(ctx: &RenderContext<'_>, state: &ViewState, asm: &mut Assembly) -> Option<(Element, ToolbarRefs)> {
    let options = ctx.options;
    let show_search = options.search.enabled && options.search.mode.has_global_search();
    let show_page_size = options.show_page_size;
    if !show_search && !show_page_size {
        return None;
    }

    let classes = &options.classes;
    let mut toolbar = Element::new("div").classes(cls("datatable__toolbar", classes.toolbar.as_deref()));
    let mut refs = ToolbarRefs::default();

    if show_search {
        let handle = asm.handle();
        let input = Element::new("input")
            .handle(handle)
            .classes(cls("datatable__search-input", classes.search_input.as_deref()))
            .attr("type", "text")
            .attr("placeholder", options.search.placeholder.as_str())
            .attr("aria-label", "Search")
            .attr("value", state.global_search.as_str());
        asm.wire(handle, EventKind::Input, Target::SearchInput);

        toolbar = toolbar.child(
            Element::new("div")
                .class("datatable__search")
                .markup(icons::SEARCH)
                .child(input),
        );
        refs.search_input = Some(handle);
    }

    if show_page_size {
        let handle = asm.handle();
        let mut select = Element::new("select")
            .handle(handle)
            .classes(cls("datatable__page-size-select", classes.page_size_select.as_deref()))
            .attr("value", state.page_size.to_string());
        for size in &options.page_size_options {
            let mut option = Element::new("option").attr("value", size.to_string());
            if *size == state.page_size {
                option = option.attr("selected", "selected");
            }
            select = select.child(option.text(size.to_string()));
        }
        asm.wire(handle, EventKind::Change, Target::PageSizeSelect);

        let label = Element::new("label")
            .class("datatable__page-size-label")
            .text("Show ")
            .child(select)
            .child(Element::new("span").text(" entries"));
        toolbar = toolbar.child(Element::new("div").class("datatable__page-size").child(label));
        refs.page_size_select = Some(handle);
    }

    Some((toolbar, refs))
}
