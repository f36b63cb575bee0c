//! Page parsers for index and profile pages
//!
//! Both parsers only compose the rules in [`crate::extract::rules`]; they
//! never fail on missing optional data.

use crate::extract::rules::{IndexRowRules, DETAIL_PAGE, INDEX_ROW};
use crate::extract::{self, MissingField};
use crate::model::{CareerStatsRow, Record, SeasonStatRow, Stub, TeamYear};
use crate::url::resolve_href;
use scraper::{ElementRef, Html};
use url::Url;

/// Column that carries the season key inside a per-game row
const SEASON_KEY: &str = "season";

/// Parses every row of an index page into a [`Stub`]
///
/// Rows missing any of name, start year, end year or birth date are dropped.
/// Profile links are resolved against `base_url`.
///
/// # Example
///
/// ```
/// use hoopstat::crawler::parse_index_page;
/// use scraper::Html;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<table><tbody><tr>
///     <th data-stat="player"><a href="/players/a/abdelal01.html">Alaa Abdelnaby</a></th>
///     <td data-stat="year_min">1991</td><td data-stat="year_max">1995</td>
///     <td data-stat="birth_date">June 24, 1968</td><td data-stat="colleges">Duke</td>
/// </tr></tbody></table>"#);
/// let base = Url::parse("https://www.basketball-reference.com").unwrap();
/// let stubs = parse_index_page(&html, &base);
/// assert_eq!(stubs[0].name, "Alaa Abdelnaby");
/// ```
pub fn parse_index_page(document: &Html, base_url: &Url) -> Vec<Stub> {
    let rules = &INDEX_ROW;

    extract::select_all(document.root_element(), rules.rows)
        .into_iter()
        .filter_map(|row| match parse_index_row(row, rules, base_url) {
            Ok(stub) => Some(stub),
            Err(missing) => {
                tracing::trace!("Dropping index row: {}", missing);
                None
            }
        })
        .collect()
}

fn parse_index_row(
    row: ElementRef<'_>,
    rules: &IndexRowRules,
    base_url: &Url,
) -> Result<Stub, MissingField> {
    let name = extract::text(row, &rules.name)?;
    let start_year = extract::text(row, &rules.start_year)?;
    let end_year = extract::text(row, &rules.end_year)?;
    let birth_date = extract::text(row, &rules.birth_date)?;

    let profile_url = extract::link(row, &rules.profile_url)
        .and_then(|href| resolve_href(base_url, &href));

    Ok(Stub {
        name: name.unwrap_or_default(),
        start_year: start_year.unwrap_or_default(),
        end_year: end_year.unwrap_or_default(),
        birth_date: birth_date.unwrap_or_default(),
        colleges: extract::list(row, &rules.colleges),
        profile_url,
    })
}

/// Parses a profile page into a [`Record`]
///
/// Missing sections default to `None` or empty collections; a page without
/// the per-game table has no season or career stats.
pub fn parse_detail_page(document: &Html) -> Record {
    let rules = &DETAIL_PAGE;
    let page = document.root_element();

    // optional rules never report a missing field
    let name = extract::text(page, &rules.name)
        .ok()
        .flatten()
        .or_else(|| extract::text(page, &rules.name_fallback).ok().flatten())
        .unwrap_or_default();

    let measurements = extract::measurements(page, &rules.measurements);

    let teams = extract::table_rows(page, &rules.teams)
        .into_iter()
        .filter_map(|row| {
            let team = row.cells.get(rules.team_column)?.clone();
            Some(TeamYear {
                team,
                years: row.key,
            })
        })
        .collect();

    let season_stats = extract::table_rows(page, &rules.season_stats)
        .into_iter()
        .map(|row| {
            let mut stats = row.cells;
            stats.remove(SEASON_KEY);
            SeasonStatRow {
                season: row.key,
                stats,
            }
        })
        .collect();

    Record {
        name,
        accolades: extract::list(page, &rules.accolades),
        nicknames: extract::parenthetical_list(page, &rules.nicknames),
        height: measurements.height,
        weight: measurements.weight,
        position: extract::labeled_sibling(page, &rules.position),
        teams,
        season_stats,
        career_stats: CareerStatsRow {
            stats: extract::footer_row(page, &rules.career_stats),
        },
    }
}

/// Convenience wrapper around [`parse_index_page`] for raw HTML
pub fn parse_index_html(html: &str, base_url: &Url) -> Vec<Stub> {
    parse_index_page(&Html::parse_document(html), base_url)
}

/// Convenience wrapper around [`parse_detail_page`] for raw HTML
pub fn parse_detail_html(html: &str) -> Record {
    parse_detail_page(&Html::parse_document(html))
}
