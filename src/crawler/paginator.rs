//! Pagination walker
//!
//! Visits a list's HTML pages one after another. Each page's "next" decision
//! depends on the previous page, so fetches are strictly sequential. The walk
//! itself is a loop over [`WalkState::advance`], a pure step function, which
//! keeps the stop rules testable without a network.

use crate::config::PaginationConfig;
use crate::crawler::fetcher::{fetch_with_retry, RetryPolicy};
use crate::crawler::parser::scrape_page;
use crate::list::ListIdentity;
use crate::model::{FilmRecord, PageResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

/// Page ceiling and failure budget for one walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    pub max_pages: u32,
    pub max_consecutive_failures: u32,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self::from(&PaginationConfig::default())
    }
}

impl From<&PaginationConfig> for WalkLimits {
    fn from(config: &PaginationConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_consecutive_failures: config.max_consecutive_failures,
        }
    }
}

/// What happened when fetching the current page
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Fetched(PageResult),
    Failed,
}

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The first page could not be fetched
    FirstPageFailed,
    /// A page had no item containers
    EmptyPage,
    /// A page had no next-page link
    LastPage,
    /// The page ceiling was reached
    PageCeiling,
    /// The consecutive-failure budget was spent
    TooManyFailures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    Stop(StopReason),
}

/// Progress of a walk: the page about to be fetched and what has been found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkState {
    pub page: u32,
    pub consecutive_failures: u32,
    pub films: Vec<FilmRecord>,
}

impl Default for WalkState {
    fn default() -> Self {
        Self {
            page: 1,
            consecutive_failures: 0,
            films: Vec::new(),
        }
    }
}

impl WalkState {
    /// Applies the outcome of fetching `self.page` and decides whether to go on
    ///
    /// Films from earlier pages are never dropped. After a failed page the
    /// walk moves on to the next page index.
    pub fn advance(mut self, outcome: PageOutcome, limits: WalkLimits) -> (Self, WalkControl) {
        match outcome {
            PageOutcome::Failed => {
                if self.page == 1 {
                    return (self, WalkControl::Stop(StopReason::FirstPageFailed));
                }
                self.consecutive_failures += 1;
                if self.consecutive_failures >= limits.max_consecutive_failures {
                    return (self, WalkControl::Stop(StopReason::TooManyFailures));
                }
            }
            PageOutcome::Fetched(result) => {
                self.consecutive_failures = 0;
                if result.container_count == 0 {
                    return (self, WalkControl::Stop(StopReason::EmptyPage));
                }
                self.films.extend(result.films);
                if !result.has_next {
                    return (self, WalkControl::Stop(StopReason::LastPage));
                }
            }
        }

        if self.page >= limits.max_pages {
            return (self, WalkControl::Stop(StopReason::PageCeiling));
        }

        self.page += 1;
        (self, WalkControl::Continue)
    }
}

/// Walks every page of a list and returns the films in encounter order
///
/// Never fails: a list whose first page cannot be fetched yields nothing.
pub async fn walk_pages(
    client: &Client,
    identity: &ListIdentity,
    base_url: &str,
    policy: RetryPolicy,
    limits: WalkLimits,
) -> Vec<FilmRecord> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

    let mut state = WalkState::default();

    loop {
        let url = identity.page_url(base_url, state.page);
        tracing::debug!("Fetching page {} of {}", state.page, identity);

        let outcome = match fetch_with_retry(client, &url, headers.clone(), policy).await {
            Ok(Some(body)) => PageOutcome::Fetched(scrape_page(&body)),
            Ok(None) => PageOutcome::Failed,
            Err(e) => {
                tracing::warn!("Page {} of {} failed: {}", state.page, identity, e);
                PageOutcome::Failed
            }
        };

        let (next, control) = state.advance(outcome, limits);
        state = next;

        if let WalkControl::Stop(reason) = control {
            tracing::debug!(
                "Stopped walking {} at page {} ({:?}), {} films",
                identity,
                state.page,
                reason,
                state.films.len()
            );
            break;
        }
    }

    state.films
}
