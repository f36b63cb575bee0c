//! Extraction rule descriptors and the fixed rule tables
//!
//! Every field the parser knows about is listed here exactly once, as data:
//! which nodes to look at, how to turn them into a value, and what happens
//! when they are missing. [`INDEX_ROW`] covers one row of an index page and
//! [`DETAIL_PAGE`] covers a whole profile page.

/// What happens when a rule's target node is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absence rejects the containing record
    Required,
    /// Absence yields the rule's default
    Optional,
}

/// Trimmed text of the first matching node
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub presence: Presence,
}

/// How a list rule turns matches into items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// One item per matching node
    EachMatch,
    /// The first matching node's text fragments, joined then split on a separator
    SplitFirst(char),
}

/// Ordered list of strings; absence yields an empty list
#[derive(Debug, Clone, Copy)]
pub struct ListRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub source: ListSource,
}

/// `href` of the first matching anchor; absence yields `None`
#[derive(Debug, Clone, Copy)]
pub struct LinkRule {
    pub field: &'static str,
    pub selector: &'static str,
}

/// Candidate nodes sorted into height or weight by their content
#[derive(Debug, Clone, Copy)]
pub struct MeasurementRule {
    pub selector: &'static str,
    /// Unit a weight value ends with, e.g. `lb`
    pub weight_suffix: &'static str,
}

/// Comma-separated list inside the first parenthesis of the first matching node
#[derive(Debug, Clone, Copy)]
pub struct ParentheticalRule {
    pub field: &'static str,
    pub selector: &'static str,
    pub open: char,
    pub close: char,
    pub separator: char,
}

/// Text that follows a label node, first meaningful line only
#[derive(Debug, Clone, Copy)]
pub struct LabeledSiblingRule {
    pub field: &'static str,
    pub label_selector: &'static str,
    pub marker: &'static str,
    pub bullet: char,
}

/// Body rows of a table, each keyed by a header cell
#[derive(Debug, Clone, Copy)]
pub struct TableRule {
    pub field: &'static str,
    pub table: &'static str,
    pub key_selector: &'static str,
}

/// Footer row of a table as a flat mapping
#[derive(Debug, Clone, Copy)]
pub struct FooterRule {
    pub field: &'static str,
    pub table: &'static str,
}

/// Rules for one row of an index page
#[derive(Debug, Clone, Copy)]
pub struct IndexRowRules {
    pub rows: &'static str,
    pub name: TextRule,
    pub start_year: TextRule,
    pub end_year: TextRule,
    pub birth_date: TextRule,
    pub colleges: ListRule,
    pub profile_url: LinkRule,
}

/// Rules for a profile page
#[derive(Debug, Clone, Copy)]
pub struct DetailPageRules {
    pub name: TextRule,
    pub name_fallback: TextRule,
    pub accolades: ListRule,
    pub nicknames: ParentheticalRule,
    pub measurements: MeasurementRule,
    pub position: LabeledSiblingRule,
    pub teams: TableRule,
    /// Column of a `teams` row holding the team abbreviation
    pub team_column: &'static str,
    pub season_stats: TableRule,
    pub career_stats: FooterRule,
}

pub const INDEX_ROW: IndexRowRules = IndexRowRules {
    rows: "tbody tr",
    name: TextRule {
        field: "name",
        selector: "th[data-stat='player']",
        presence: Presence::Required,
    },
    start_year: TextRule {
        field: "start_year",
        selector: "td[data-stat='year_min']",
        presence: Presence::Required,
    },
    end_year: TextRule {
        field: "end_year",
        selector: "td[data-stat='year_max']",
        presence: Presence::Required,
    },
    birth_date: TextRule {
        field: "birth_date",
        selector: "td[data-stat='birth_date']",
        presence: Presence::Required,
    },
    colleges: ListRule {
        field: "colleges",
        selector: "td[data-stat='colleges']",
        source: ListSource::SplitFirst(','),
    },
    profile_url: LinkRule {
        field: "profile_url",
        selector: "th[data-stat='player'] a[href]",
    },
};

pub const DETAIL_PAGE: DetailPageRules = DetailPageRules {
    name: TextRule {
        field: "name",
        selector: "h1 span",
        presence: Presence::Optional,
    },
    name_fallback: TextRule {
        field: "name",
        selector: "h1",
        presence: Presence::Optional,
    },
    accolades: ListRule {
        field: "accolades",
        selector: "#bling li",
        source: ListSource::EachMatch,
    },
    nicknames: ParentheticalRule {
        field: "nicknames",
        selector: "p",
        open: '(',
        close: ')',
        separator: ',',
    },
    measurements: MeasurementRule {
        selector: "div#meta p span",
        weight_suffix: "lb",
    },
    position: LabeledSiblingRule {
        field: "position",
        label_selector: "strong",
        marker: "Position:",
        bullet: '\u{25aa}',
    },
    teams: TableRule {
        field: "teams",
        table: "table#totals",
        key_selector: "th[data-stat='season']",
    },
    team_column: "team_id",
    season_stats: TableRule {
        field: "season_stats",
        table: "table#per_game_stats",
        key_selector: "th[data-stat='year_id']",
    },
    career_stats: FooterRule {
        field: "career_stats",
        table: "table#per_game_stats",
    },
};
