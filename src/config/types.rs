use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Reelpick
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Where lists live and where requests are sent
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Domain accepted in input URLs (e.g., "letterboxd.com")
    pub domain: String,

    /// Base URL that feed and page requests are sent to
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path segment separating the owner from the list name
    #[serde(rename = "list-marker")]
    pub list_marker: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            domain: "letterboxd.com".to_string(),
            base_url: "https://letterboxd.com".to_string(),
            list_marker: "list".to_string(),
        }
    }
}

/// Outbound request behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retries after the first attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay unit in milliseconds; the wait before retry `n` is `n` units
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl FetchConfig {
    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base_ms: 500,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Limits for walking a list's HTML pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Hard ceiling on pages visited per list
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Consecutive failed page fetches that end the walk
    #[serde(rename = "max-consecutive-failures")]
    pub max_consecutive_failures: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_consecutive_failures: 2,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        if self.contact_url.is_empty() {
            format!("{}/{}", self.name, self.version)
        } else {
            format!("{}/{} (+{})", self.name, self.version, self.contact_url)
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "Reelpick".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: String::new(),
        }
    }
}
