use super::rules::{
    FooterRule, LabeledSiblingRule, LinkRule, ListRule, ListSource, MeasurementRule,
    ParentheticalRule, Presence, TableRule, TextRule,
};
use super::{joined_text, select_all, select_first, stripped_text, MissingField};
use scraper::ElementRef;
use std::collections::BTreeMap;

/// Height and weight sorted out of a set of candidate strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements {
    pub height: Option<String>,
    pub weight: Option<String>,
}

/// One table body row: the header cell's text plus every `data-stat` cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedRow {
    pub key: String,
    pub cells: BTreeMap<String, String>,
}

/// Applies a [`TextRule`]
///
/// * `Ok(Some(text))` - node found (text may be empty)
/// * `Ok(None)` - optional node absent
/// * `Err(MissingField)` - required node absent
pub fn text(scope: ElementRef<'_>, rule: &TextRule) -> Result<Option<String>, MissingField> {
    match select_first(scope, rule.selector) {
        Some(element) => Ok(Some(stripped_text(element))),
        None => match rule.presence {
            Presence::Required => Err(MissingField { field: rule.field }),
            Presence::Optional => Ok(None),
        },
    }
}

/// Applies a [`ListRule`]; absence yields an empty list
pub fn list(scope: ElementRef<'_>, rule: &ListRule) -> Vec<String> {
    match rule.source {
        ListSource::EachMatch => select_all(scope, rule.selector)
            .into_iter()
            .map(stripped_text)
            .collect(),
        ListSource::SplitFirst(separator) => match select_first(scope, rule.selector) {
            Some(element) => split_trimmed(&joined_text(element, ", "), separator),
            None => Vec::new(),
        },
    }
}

/// Applies a [`LinkRule`]; returns the raw `href`
pub fn link(scope: ElementRef<'_>, rule: &LinkRule) -> Option<String> {
    select_first(scope, rule.selector)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Applies a [`MeasurementRule`] to every candidate node under `scope`
pub fn measurements(scope: ElementRef<'_>, rule: &MeasurementRule) -> Measurements {
    let candidates = select_all(scope, rule.selector)
        .into_iter()
        .map(stripped_text);
    classify_measurements(candidates, rule.weight_suffix)
}

/// Sorts candidate strings into height and weight
///
/// Two digit groups joined by a hyphen (`6-9`) is a height; digits followed
/// by `weight_suffix` (`215lb`) is a weight. Anything else is dropped, and
/// the first match for each slot wins.
///
/// # Example
///
/// ```
/// use hoopstat::extract::classify_measurements;
///
/// let m = classify_measurements(["6-9", "loading…", "215lb"], "lb");
/// assert_eq!(m.height.as_deref(), Some("6-9"));
/// assert_eq!(m.weight.as_deref(), Some("215lb"));
/// ```
pub fn classify_measurements<I, S>(candidates: I, weight_suffix: &str) -> Measurements
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = Measurements::default();

    for candidate in candidates {
        let value = candidate.as_ref().trim();
        if found.height.is_none() && is_height(value) {
            found.height = Some(value.to_string());
        } else if found.weight.is_none() && is_weight(value, weight_suffix) {
            found.weight = Some(value.to_string());
        }
    }

    found
}

fn is_height(value: &str) -> bool {
    match value.split_once('-') {
        Some((feet, inches)) => is_digits(feet) && is_digits(inches),
        None => false,
    }
}

fn is_weight(value: &str, suffix: &str) -> bool {
    match value.strip_suffix(suffix) {
        Some(amount) => is_digits(amount.trim_end()),
        None => false,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Applies a [`ParentheticalRule`]
///
/// Looks at the first matching node that holds a single string containing
/// the opening character. Nodes with mixed content (the size line, for one)
/// never match. No such node yields an empty list.
pub fn parenthetical_list(scope: ElementRef<'_>, rule: &ParentheticalRule) -> Vec<String> {
    select_all(scope, rule.selector)
        .into_iter()
        .filter_map(sole_string)
        .find(|text| text.contains(rule.open))
        .map(|text| parenthetical_items(&text, rule))
        .unwrap_or_default()
}

/// Text of an element whose only child is a string, looking through
/// single-child wrappers; None for empty or mixed content
fn sole_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value().as_text() {
        Some(text) => Some(String::from(&*text.text)),
        None => ElementRef::wrap(only).and_then(sole_string),
    }
}

/// Splits the contents of the first parenthesis in `text`
///
/// Without a closing character the contents run to the end of the text.
///
/// # Example
///
/// ```
/// use hoopstat::extract::{parenthetical_items, rules::DETAIL_PAGE};
///
/// let items = parenthetical_items("John Doe (Big John, JD)", &DETAIL_PAGE.nicknames);
/// assert_eq!(items, vec!["Big John", "JD"]);
/// ```
pub fn parenthetical_items(text: &str, rule: &ParentheticalRule) -> Vec<String> {
    let Some(start) = text.find(rule.open) else {
        return Vec::new();
    };
    let inner = &text[start + rule.open.len_utf8()..];
    let inner = match inner.find(rule.close) {
        Some(end) => &inner[..end],
        None => inner,
    };
    split_trimmed(inner, rule.separator)
}

/// Applies a [`LabeledSiblingRule`]
pub fn labeled_sibling(scope: ElementRef<'_>, rule: &LabeledSiblingRule) -> Option<String> {
    let label = select_all(scope, rule.label_selector)
        .into_iter()
        .find(|element| stripped_text(*element).contains(rule.marker))?;

    let sibling = label.next_sibling()?;
    let raw = match sibling.value().as_text() {
        Some(text) => String::from(&*text.text),
        None => ElementRef::wrap(sibling)
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default(),
    };

    first_clean_line(&raw, rule.bullet)
}

/// First line of `raw` that is not blank once bullets are removed
fn first_clean_line(raw: &str, bullet: char) -> Option<String> {
    raw.lines()
        .map(|line| line.replace(bullet, ""))
        .map(|line| line.trim().to_string())
        .find(|line| !line.is_empty())
}

/// Applies a [`TableRule`]
///
/// Rows without a key cell (repeated headers, spacer rows) are skipped. A
/// missing table yields no rows.
pub fn table_rows(scope: ElementRef<'_>, rule: &TableRule) -> Vec<KeyedRow> {
    let Some(table) = select_first(scope, rule.table) else {
        return Vec::new();
    };

    select_all(table, "tbody tr")
        .into_iter()
        .filter_map(|row| {
            let key = select_first(row, rule.key_selector).map(stripped_text)?;
            Some(KeyedRow {
                key,
                cells: stat_cells(row),
            })
        })
        .collect()
}

/// Applies a [`FooterRule`]; a missing table or footer yields an empty map
pub fn footer_row(scope: ElementRef<'_>, rule: &FooterRule) -> BTreeMap<String, String> {
    select_first(scope, rule.table)
        .and_then(|table| select_first(table, "tfoot tr"))
        .map(stat_cells)
        .unwrap_or_default()
}

/// `td` cells of a row keyed by their `data-stat` attribute
fn stat_cells(row: ElementRef<'_>) -> BTreeMap<String, String> {
    select_all(row, "td")
        .into_iter()
        .filter_map(|cell| {
            let key = cell.value().attr("data-stat")?;
            Some((key.to_string(), stripped_text(cell)))
        })
        .collect()
}

fn split_trimmed(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
