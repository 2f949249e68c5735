//! Abstract render surface and its in-memory implementation.
//!
//! The table never talks to a concrete UI toolkit. It builds [`Element`] trees and
//! hands them to a [`Surface`], which owns the live nodes and reports user input
//! back as [`SurfaceEvent`]s. Nodes the renderer needs to address later carry a
//! [`NodeHandle`]; everything else is anonymous.
//!
//! # Surface contract
//!
//! - [`Surface::mount`] replaces the entire content atomically.
//! - [`Surface::replace`] swaps one addressed subtree and leaves siblings intact.
//! - [`Surface::listen`] returns a [`BindingId`] that must be released exactly once
//!   with [`Surface::unlisten`]. Events are only delivered for live bindings.
//!
//! [`MemorySurface`] implements the contract on a plain element tree. It is used
//! for server-side HTML snapshots and by the test suite, and it counts mounts,
//! replacements and listener releases so leaks are observable.
//!
//! # Example
//!
//! ```rust
//! use datatable::ui::surface::{Element, EventKind, MemorySurface, NodeHandle, Surface};
//!
//! let mut surface = MemorySurface::new();
//! let button = NodeHandle(1);
//! surface.mount(Element::new("div").child(Element::new("button").handle(button).text("Go")));
//!
//! let binding = surface.listen(button, EventKind::Click);
//! assert!(surface.fire(button, EventKind::Click, None).is_some());
//!
//! surface.unlisten(binding);
//! assert!(surface.fire(button, EventKind::Click, None).is_none());
//! assert_eq!(surface.html(), "<div><button>Go</button></div>");
//! ```

use crate::ui::helpers::escape_html;
use std::collections::HashMap;

/// Stable address of a node the renderer updates in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(pub u64);

/// Registration of one event listener on one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u64);

/// Kinds of user input the table listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    /// Key press; the event value carries the key name (`"Enter"`, `" "`).
    KeyDown,
    /// Text input; the event value carries the input's current text.
    Input,
    /// Selection change; the event value carries the selected option value.
    Change,
}

/// User input reported by a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceEvent {
    pub target: NodeHandle,
    pub kind: EventKind,
    pub value: Option<String>,
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Plain text, escaped on output.
    Text(String),
    /// Trusted markup, emitted verbatim.
    Markup(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

const VOID_TAGS: [&str; 4] = ["input", "br", "hr", "img"];

/// A declarative element tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub handle: Option<NodeHandle>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(String, String)>,
    pub hidden: bool,
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn handle(mut self, handle: NodeHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    #[must_use]
    pub fn classes(mut self, classes: Vec<String>) -> Self {
        self.classes.extend(classes);
        self
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute, replacing a previous value of the same name.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.styles.push((property.to_string(), value.into()));
        self
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    #[must_use]
    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Markup(markup.into()));
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    /// Sets the `value` of an input or select. On a select the `selected` flag
    /// moves to the option carrying that value.
    pub fn set_value(&mut self, value: &str) {
        self.set_attr("value", value);
        if self.tag != "select" {
            return;
        }
        for child in &mut self.children {
            if let Node::Element(option) = child {
                if option.get_attr("value") == Some(value) {
                    option.set_attr("selected", "selected");
                } else {
                    option.remove_attr("selected");
                }
            }
        }
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for the element carrying `handle`.
    #[must_use]
    pub fn find(&self, handle: NodeHandle) -> Option<&Self> {
        if self.handle == Some(handle) {
            return Some(self);
        }
        self.child_elements().find_map(|c| c.find(handle))
    }

    pub fn find_mut(&mut self, handle: NodeHandle) -> Option<&mut Self> {
        if self.handle == Some(handle) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| match c {
            Node::Element(e) => e.find_mut(handle),
            _ => None,
        })
    }

    /// All descendants (including `self`) carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Self>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_by_class(class, found);
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Concatenated text content, unescaped. Markup children are skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Element(e) => out.push_str(&e.text_content()),
                Node::Text(t) => out.push_str(t),
                Node::Markup(_) => {}
            }
        }
        out
    }

    /// Serializes the tree to HTML. Node handles are not part of the output.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_html(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        if !self.styles.is_empty() {
            let style: Vec<String> = self.styles.iter().map(|(p, v)| format!("{p}: {v}")).collect();
            out.push_str(" style=\"");
            out.push_str(&escape_html(&style.join("; ")));
            out.push('"');
        }
        if self.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_html(out),
                Node::Text(t) => out.push_str(&escape_html(t)),
                Node::Markup(m) => out.push_str(m),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// A drawable target the renderer owns and updates.
///
/// Operations addressing a handle that is not present return `false` and change
/// nothing.
pub trait Surface {
    /// Whether the surface can display content at all.
    fn is_drawable(&self) -> bool;

    /// Replaces the whole content with `root` in one step.
    fn mount(&mut self, root: Element);

    /// Replaces the subtree addressed by `handle` with `element`.
    fn replace(&mut self, handle: NodeHandle, element: Element) -> bool;

    /// Replaces the children of `handle` with trusted markup.
    fn set_markup(&mut self, handle: NodeHandle, markup: &str) -> bool;

    /// Replaces the class list of `handle`.
    fn set_classes(&mut self, handle: NodeHandle, classes: &[String]) -> bool;

    fn set_visible(&mut self, handle: NodeHandle, visible: bool) -> bool;

    /// Sets the current value of an input or select.
    fn set_value(&mut self, handle: NodeHandle, value: &str) -> bool;

    fn value(&self, handle: NodeHandle) -> Option<String>;

    /// Starts delivering events of `kind` on `handle`.
    fn listen(&mut self, handle: NodeHandle, kind: EventKind) -> BindingId;

    /// Stops delivering events for `binding`. Returns `false` if it was not live.
    fn unlisten(&mut self, binding: BindingId) -> bool;

    /// Removes all content.
    fn clear(&mut self);
}

/// In-memory [`Surface`] backed by an [`Element`] tree.
#[derive(Debug, Default)]
pub struct MemorySurface {
    root: Option<Element>,
    detached: bool,
    listeners: HashMap<BindingId, (NodeHandle, EventKind)>,
    next_binding: u64,
    mounts: usize,
    replacements: usize,
    double_releases: usize,
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that reports itself as not drawable.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// HTML of the current content, or an empty string when nothing is mounted.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.as_ref().map(Element::to_html).unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, handle: NodeHandle) -> Option<&Element> {
        self.root.as_ref().and_then(|r| r.find(handle))
    }

    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.root
            .as_ref()
            .map(|r| r.find_by_class(class))
            .unwrap_or_default()
    }

    /// First element carrying `class`.
    #[must_use]
    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        self.find_by_class(class).into_iter().next()
    }

    /// Number of bindings currently live.
    #[must_use]
    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Live bindings registered on `handle`.
    #[must_use]
    pub fn listeners_on(&self, handle: NodeHandle) -> usize {
        self.listeners.values().filter(|(h, _)| *h == handle).count()
    }

    #[must_use]
    pub const fn mount_count(&self) -> usize {
        self.mounts
    }

    #[must_use]
    pub const fn replace_count(&self) -> usize {
        self.replacements
    }

    /// Calls to `unlisten` with a binding that was not live.
    #[must_use]
    pub const fn double_releases(&self) -> usize {
        self.double_releases
    }

    /// Simulates user input on `handle`.
    ///
    /// For [`EventKind::Input`] and [`EventKind::Change`] a given `value` is first
    /// written into the node, as typing or selecting would. Returns the event to
    /// hand to the table, or `None` if nothing listens for `kind` on `handle`.
    pub fn fire(&mut self, handle: NodeHandle, kind: EventKind, value: Option<&str>) -> Option<SurfaceEvent> {
        let live = self
            .listeners
            .values()
            .any(|(h, k)| *h == handle && *k == kind);
        if !live {
            return None;
        }

        let value = match kind {
            EventKind::Input | EventKind::Change => {
                if let Some(v) = value {
                    self.set_value(handle, v);
                }
                self.value(handle)
            }
            EventKind::Click | EventKind::KeyDown => value.map(str::to_string),
        };

        Some(SurfaceEvent {
            target: handle,
            kind,
            value,
        })
    }
}

impl Surface for MemorySurface {
    fn is_drawable(&self) -> bool {
        !self.detached
    }

    fn mount(&mut self, root: Element) {
        self.root = Some(root);
        self.mounts += 1;
    }

    fn replace(&mut self, handle: NodeHandle, element: Element) -> bool {
        match self.root.as_mut().and_then(|r| r.find_mut(handle)) {
            Some(slot) => {
                *slot = element;
                self.replacements += 1;
                true
            }
            None => false,
        }
    }

    fn set_markup(&mut self, handle: NodeHandle, markup: &str) -> bool {
        self.root
            .as_mut()
            .and_then(|r| r.find_mut(handle))
            .map(|node| node.children = vec![Node::Markup(markup.to_string())])
            .is_some()
    }

    fn set_classes(&mut self, handle: NodeHandle, classes: &[String]) -> bool {
        self.root
            .as_mut()
            .and_then(|r| r.find_mut(handle))
            .map(|node| node.classes = classes.to_vec())
            .is_some()
    }

    fn set_visible(&mut self, handle: NodeHandle, visible: bool) -> bool {
        self.root
            .as_mut()
            .and_then(|r| r.find_mut(handle))
            .map(|node| node.hidden = !visible)
            .is_some()
    }

    fn set_value(&mut self, handle: NodeHandle, value: &str) -> bool {
        self.root
            .as_mut()
            .and_then(|r| r.find_mut(handle))
            .map(|node| node.set_value(value))
            .is_some()
    }

    fn value(&self, handle: NodeHandle) -> Option<String> {
        self.find(handle)
            .map(|node| node.get_attr("value").unwrap_or_default().to_string())
    }

    fn listen(&mut self, handle: NodeHandle, kind: EventKind) -> BindingId {
        self.next_binding += 1;
        let id = BindingId(self.next_binding);
        self.listeners.insert(id, (handle, kind));
        id
    }

    fn unlisten(&mut self, binding: BindingId) -> bool {
        let released = self.listeners.remove(&binding).is_some();
        if !released {
            self.double_releases += 1;
        }
        released
    }

    fn clear(&mut self) {
        self.root = None;
    }
}
