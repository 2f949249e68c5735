//! Shared rendering utilities.
//!
//! Text escaping and class-list composition used by every component builder.
//!
//! # Example
//!
//! ```rust
//! use datatable::ui::helpers::{cls, escape_html};
//!
//! assert_eq!(escape_html("<b>&'\""), "&lt;b&gt;&amp;&#039;&quot;");
//! assert_eq!(cls("datatable__row", Some("hover stripe")), vec!["datatable__row", "hover", "stripe"]);
//! ```

/// Escapes the five HTML-significant characters `& < > " '`.
///
/// # Example
///
/// ```rust
/// use datatable::ui::helpers::escape_html;
///
/// let escaped = escape_html("<script>&\"'");
/// assert!(!escaped.contains(['<', '>', '"', '\'']));
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds a class list from a built-in class and an optional override slot.
///
/// The override may hold several whitespace-separated classes; they are appended
/// after the built-in one.
#[must_use]
pub fn cls(base: &str, extra: Option<&str>) -> Vec<String> {
    let mut classes = vec![base.to_string()];
    append(&mut classes, extra);
    classes
}

/// Appends the classes of an override slot to `classes`.
pub fn append(classes: &mut Vec<String>, extra: Option<&str>) {
    if let Some(extra) = extra {
        classes.extend(extra.split_whitespace().map(str::to_string));
    }
}
