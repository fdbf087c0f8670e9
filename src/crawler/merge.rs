//! Merging the two list sources
//!
//! The page walk and the feed run concurrently against the same list. The
//! page walk wins whenever it found anything; the feed is only a fallback.
//! The winner is then deduplicated by slug, keeping first occurrences.

use crate::config::Config;
use crate::crawler::feed::fetch_feed;
use crate::crawler::fetcher::RetryPolicy;
use crate::crawler::paginator::{walk_pages, WalkLimits};
use crate::list::ListIdentity;
use crate::model::FilmRecord;
use rand::seq::IndexedRandom;
use reqwest::Client;
use std::collections::HashSet;

/// Which source a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Pages,
    Feed,
    Neither,
}

/// Runs both sources, waits for both, then selects and deduplicates
pub async fn merge_sources(
    client: &Client,
    identity: &ListIdentity,
    config: &Config,
) -> Vec<FilmRecord> {
    let policy = RetryPolicy::from(&config.fetch);
    let limits = WalkLimits::from(&config.pagination);
    let base_url = config.source.base_url.as_str();

    let (pages, feed) = tokio::join!(
        walk_pages(client, identity, base_url, policy, limits),
        fetch_feed(client, identity, base_url, policy),
    );

    let (pages_found, feed_found) = (pages.len(), feed.len());
    let (source, films) = select_source(pages, feed);
    let films = dedupe_by_slug(films);

    tracing::info!(
        "{}: {} films from pages, {} from feed; using {:?} ({} unique)",
        identity,
        pages_found,
        feed_found,
        source,
        films.len()
    );

    films
}

/// Picks the page walk's films when it found any, else the feed's
pub fn select_source(pages: Vec<FilmRecord>, feed: Vec<FilmRecord>) -> (Source, Vec<FilmRecord>) {
    if !pages.is_empty() {
        (Source::Pages, pages)
    } else if !feed.is_empty() {
        (Source::Feed, feed)
    } else {
        (Source::Neither, Vec::new())
    }
}

/// Drops later records whose slug was already seen; order is preserved
pub fn dedupe_by_slug(films: Vec<FilmRecord>) -> Vec<FilmRecord> {
    let mut seen = HashSet::with_capacity(films.len());
    films
        .into_iter()
        .filter(|film| !film.slug.is_empty() && seen.insert(film.slug.clone()))
        .collect()
}

/// Chooses one film uniformly at random
pub fn pick_random(films: &[FilmRecord]) -> Option<&FilmRecord> {
    films.choose(&mut rand::rng())
}
