//! Column schema and per-type semantics.
//!
//! A [`Column`] names the row field it reads and a [`ColumnKind`] that decides how
//! that field is compared, filtered, aligned and rendered. The four kinds form a
//! closed enum, so every semantic function is an exhaustive `match`.
//!
//! # Trust boundary
//!
//! String, number and date cells are HTML-escaped before they reach the surface.
//! Custom columns return markup from a host-supplied render function and that markup
//! is emitted verbatim: sanitizing it is the host's responsibility.

use super::date;
use super::value::{cell_number, cell_text, format_thousands, Row};
use crate::ui::helpers::escape_html;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Renders a custom cell from the whole row and its index within the page.
pub type RenderFn = Rc<dyn Fn(&Row, usize) -> String>;

/// Orders two cell values of a custom column.
pub type CompareFn = Rc<dyn Fn(&Value, &Value) -> Ordering>;

/// Decides whether a custom cell matches a filter: `(cell, filter_text, row)`.
pub type FilterFn = Rc<dyn Fn(&Value, &str, &Row) -> bool>;

/// Orders two rows by one column.
pub type RowComparator<'c> = Box<dyn Fn(&Row, &Row) -> Ordering + 'c>;

/// Horizontal alignment of header and body cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Host-supplied behaviour of a custom column.
#[derive(Clone)]
pub struct CustomColumn {
    /// Produces the cell markup. The output is not escaped.
    pub render: RenderFn,
    /// Without a comparator the column never sorts, even if flagged sortable.
    pub comparator: Option<CompareFn>,
    /// Without a filter predicate the column never matches a filter.
    pub filter: Option<FilterFn>,
}

impl fmt::Debug for CustomColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomColumn")
            .field("comparator", &self.comparator.is_some())
            .field("filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

/// Type-specific part of a column.
#[derive(Debug, Clone)]
pub enum ColumnKind {
    /// Plain text, compared case-insensitively.
    String,
    /// Numeric value; optionally displayed with thousand separators.
    Number { thousand_separator: bool },
    /// Date stored as text in `date_format`, optionally displayed in `display_format`.
    Date {
        date_format: String,
        display_format: Option<String>,
    },
    /// Host-rendered cell.
    Custom(CustomColumn),
}

/// A typed schema entry describing one field of the rows.
#[derive(Debug, Clone)]
pub struct Column {
    /// Field name in each row; unique within a table.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the header offers sorting.
    pub sortable: bool,
    /// Explicit searchability; `None` uses the per-type default.
    pub searchable: Option<bool>,
    /// Fixed width, e.g. `"120px"` or `"20%"`.
    pub width: Option<String>,
    /// Explicit alignment; `None` uses the per-type default.
    pub align: Option<Align>,
    pub kind: ColumnKind,
}

impl Column {
    fn with_kind(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            searchable: None,
            width: None,
            align: None,
            kind,
        }
    }

    /// Creates a string column.
    #[must_use]
    pub fn string(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(key, label, ColumnKind::String)
    }

    /// Creates a number column without thousand separators.
    #[must_use]
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(key, label, ColumnKind::Number { thousand_separator: false })
    }

    /// Creates a date column whose values are stored in `date_format`.
    #[must_use]
    pub fn date(key: impl Into<String>, label: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self::with_kind(
            key,
            label,
            ColumnKind::Date {
                date_format: date_format.into(),
                display_format: None,
            },
        )
    }

    /// Creates a custom column rendered by `render`.
    ///
    /// The markup returned by `render` is inserted without escaping.
    #[must_use]
    pub fn custom<F>(key: impl Into<String>, label: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Row, usize) -> String + 'static,
    {
        Self::with_kind(
            key,
            label,
            ColumnKind::Custom(CustomColumn {
                render: Rc::new(render),
                comparator: None,
                filter: None,
            }),
        )
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = Some(searchable);
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    /// Enables thousand separators. No effect on non-number columns.
    #[must_use]
    pub fn thousand_separator(mut self, enabled: bool) -> Self {
        if let ColumnKind::Number { thousand_separator } = &mut self.kind {
            *thousand_separator = enabled;
        }
        self
    }

    /// Sets the display format of a date column. No effect on other columns.
    #[must_use]
    pub fn display_format(mut self, format: impl Into<String>) -> Self {
        if let ColumnKind::Date { display_format, .. } = &mut self.kind {
            *display_format = Some(format.into());
        }
        self
    }

    /// Sets the comparator of a custom column. No effect on other columns.
    #[must_use]
    pub fn compare_with<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + 'static,
    {
        if let ColumnKind::Custom(custom) = &mut self.kind {
            custom.comparator = Some(Rc::new(compare));
        }
        self
    }

    /// Sets the filter predicate of a custom column. No effect on other columns.
    #[must_use]
    pub fn filter_with<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value, &str, &Row) -> bool + 'static,
    {
        if let ColumnKind::Custom(custom) = &mut self.kind {
            custom.filter = Some(Rc::new(filter));
        }
        self
    }

    /// Returns the row ordering of this column, if it can sort at all.
    ///
    /// Requires `sortable`. Custom columns additionally require a comparator.
    ///
    /// - String: case-insensitive comparison.
    /// - Number: leading-float parse, unparseable values count as `0`.
    /// - Date: parsed with the column's format, invalid dates count as the epoch.
    #[must_use]
    pub fn comparator(&self) -> Option<RowComparator<'_>> {
        if !self.sortable {
            return None;
        }

        let key = self.key.as_str();
        match &self.kind {
            ColumnKind::String => Some(Box::new(move |a: &Row, b: &Row| {
                compare_text(&cell_text(a, key), &cell_text(b, key))
            })),
            ColumnKind::Number { .. } => Some(Box::new(move |a: &Row, b: &Row| {
                cell_number(a, key).total_cmp(&cell_number(b, key))
            })),
            ColumnKind::Date { date_format, .. } => Some(Box::new(move |a: &Row, b: &Row| {
                let ta = date::timestamp_or_epoch(&cell_text(a, key), date_format);
                let tb = date::timestamp_or_epoch(&cell_text(b, key), date_format);
                ta.cmp(&tb)
            })),
            ColumnKind::Custom(custom) => custom.comparator.as_ref().map(|compare| {
                let compare = Rc::clone(compare);
                Box::new(move |a: &Row, b: &Row| {
                    compare(a.get(key).unwrap_or(&Value::Null), b.get(key).unwrap_or(&Value::Null))
                }) as RowComparator<'_>
            }),
        }
    }

    /// Whether the row's value in this column contains `filter` (case-insensitive).
    ///
    /// Date columns with a display format match against the formatted display text,
    /// falling back to the raw value when it does not parse. Custom columns delegate
    /// to their filter predicate and never match without one.
    #[must_use]
    pub fn matches(&self, row: &Row, filter: &str) -> bool {
        let needle = filter.to_lowercase();

        match &self.kind {
            ColumnKind::String | ColumnKind::Number { .. } => {
                cell_text(row, &self.key).to_lowercase().contains(&needle)
            }
            ColumnKind::Date {
                date_format,
                display_format,
            } => {
                let raw = cell_text(row, &self.key);
                let display = display_format
                    .as_deref()
                    .and_then(|fmt| date::parse(&raw, date_format).map(|d| date::format(&d, fmt)));
                display.unwrap_or(raw).to_lowercase().contains(&needle)
            }
            ColumnKind::Custom(custom) => custom.filter.as_ref().is_some_and(|predicate| {
                predicate(row.get(&self.key).unwrap_or(&Value::Null), filter, row)
            }),
        }
    }

    /// Explicit searchability, else `true` for every kind except custom.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
            .unwrap_or(!matches!(self.kind, ColumnKind::Custom(_)))
    }

    /// Explicit alignment, else right for numbers and left for everything else.
    #[must_use]
    pub fn resolved_align(&self) -> Align {
        self.align.unwrap_or(match self.kind {
            ColumnKind::Number { .. } => Align::Right,
            _ => Align::Left,
        })
    }

    /// Cell markup for `row`, which sits at `row_index` within the rendered page.
    ///
    /// Built-in kinds return escaped text. Custom columns return the render
    /// function's output untouched.
    #[must_use]
    pub fn render_value(&self, row: &Row, row_index: usize) -> String {
        match &self.kind {
            ColumnKind::String => escape_html(&cell_text(row, &self.key)),
            ColumnKind::Number { thousand_separator } => {
                if *thousand_separator {
                    escape_html(&format_thousands(row.get(&self.key).unwrap_or(&Value::Null)))
                } else {
                    escape_html(&cell_text(row, &self.key))
                }
            }
            ColumnKind::Date {
                date_format,
                display_format,
            } => {
                let raw = cell_text(row, &self.key);
                let display = display_format
                    .as_deref()
                    .and_then(|fmt| date::parse(&raw, date_format).map(|d| date::format(&d, fmt)));
                escape_html(&display.unwrap_or(raw))
            }
            ColumnKind::Custom(custom) => (custom.render)(row, row_index),
        }
    }
}

/// Base-letter text ordering: case and accents are ignored, so "a", "A" and "á"
/// compare equal and "Émile" sorts between "Eve" and "Zoe".
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a).cmp(base_letters(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
