use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Hoopstat
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the catalog lives and how its index is sectioned
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Origin used for index pages and for resolving relative profile links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path template of one index section; `{letter}` is replaced per section
    #[serde(rename = "index-path")]
    pub index_path: String,

    /// Section letters, enumerated in order
    pub sections: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.basketball-reference.com".to_string(),
            index_path: "/players/{letter}/".to_string(),
            sections: ('a'..='z').collect(),
        }
    }
}

/// Request pacing and identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Minimum time between the starts of two requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Extra attempts for 5xx responses and timeouts
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base backoff between retries, doubled per attempt (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36"
                .to_string(),
            request_delay_ms: 10_000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 0,
            retry_backoff_ms: 5_000,
        }
    }
}

impl FetcherConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

/// Output artifacts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the roster artifact (JSON array of stubs)
    #[serde(rename = "roster-path")]
    pub roster_path: String,

    /// Path to the detail artifact (JSON array of records)
    #[serde(rename = "detail-path")]
    pub detail_path: String,

    /// Flush the detail buffer after this many new records; 0 disables
    #[serde(rename = "checkpoint-every")]
    pub checkpoint_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            roster_path: "players_base_info.json".to_string(),
            detail_path: "player_detail_info.json".to_string(),
            checkpoint_every: 25,
        }
    }
}
