//! Output record types
//!
//! Two artifacts come out of a crawl: a roster of [`Stub`]s harvested from the
//! index pages, and a list of [`Record`]s harvested from profile pages. Each
//! table on a profile page has its own row type, so a missing value is a
//! `None` or an empty collection rather than a missing key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimal identifying entry from one index row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stub {
    pub name: String,
    pub start_year: String,
    pub end_year: String,
    pub birth_date: String,
    #[serde(default)]
    pub colleges: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

/// One row of the career totals table: a team and the season it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamYear {
    pub team: String,
    pub years: String,
}

/// One row of the per-game table, keyed by column identifier
///
/// Serializes as a flat object: `{"season": "1990-91", "g": "43", ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStatRow {
    pub season: String,
    #[serde(flatten)]
    pub stats: BTreeMap<String, String>,
}

/// Footer row of the per-game table, keyed by column identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerStatsRow {
    pub stats: BTreeMap<String, String>,
}

impl CareerStatsRow {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.get(key).map(String::as_str)
    }
}

/// Fully normalized profile of one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub accolades: Vec<String>,
    pub nicknames: Vec<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub position: Option<String>,
    pub teams: Vec<TeamYear>,
    pub season_stats: Vec<SeasonStatRow>,
    pub career_stats: CareerStatsRow,
}

impl Record {
    /// Uses `name` when the profile page carried no heading of its own
    pub fn with_fallback_name(mut self, name: &str) -> Self {
        if self.name.is_empty() {
            self.name = name.to_string();
        }
        self
    }
}
