//! Field extraction from parsed HTML
//!
//! Pure functions that apply one rule from [`rules`] to a document node and
//! return a typed value, the rule's default, or [`MissingField`] when a
//! required node is absent. Nothing here performs I/O.
//!
//! # Example
//!
//! ```
//! use hoopstat::extract::{self, rules::DETAIL_PAGE};
//! use scraper::Html;
//!
//! let html = Html::parse_document(
//!     r#"<div id="meta"><p><span>6-9</span>, <span>215lb</span></p></div>"#,
//! );
//! let m = extract::measurements(html.root_element(), &DETAIL_PAGE.measurements);
//! assert_eq!(m.height.as_deref(), Some("6-9"));
//! assert_eq!(m.weight.as_deref(), Some("215lb"));
//! ```

mod fields;
pub mod rules;

pub use fields::{
    classify_measurements, footer_row, labeled_sibling, link, list, measurements,
    parenthetical_items, parenthetical_list, table_rows, text, KeyedRow, Measurements,
};

use scraper::{ElementRef, Selector};
use thiserror::Error;

/// A required node was not found; the containing record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required field '{field}' is missing")]
pub struct MissingField {
    pub field: &'static str,
}

/// Text of an element with each fragment trimmed and empty fragments dropped
pub fn stripped_text(element: ElementRef<'_>) -> String {
    joined_text(element, "")
}

/// Like [`stripped_text`], with `separator` between fragments
pub fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// First descendant of `scope` matching `css`
///
/// An unparsable selector matches nothing.
pub(crate) fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// All descendants of `scope` matching `css`, in document order
pub(crate) fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}
