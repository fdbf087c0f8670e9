//! Crawler module for list ingestion
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching with retry and backoff
//! - RSS feed extraction
//! - HTML page scraping and pagination
//! - Source selection and deduplication
//! - Overall list-fetch orchestration

mod coordinator;
mod feed;
mod fetcher;
mod merge;
mod paginator;
mod parser;

pub use coordinator::ListFetcher;
pub use feed::{fetch_feed, looks_like_feed, parse_feed, slug_from_link};
pub use fetcher::{build_http_client, fetch_with_retry, RetryPolicy};
pub use merge::{dedupe_by_slug, merge_sources, pick_random, select_source, Source};
pub use paginator::{walk_pages, PageOutcome, StopReason, WalkControl, WalkLimits, WalkState};
pub use parser::scrape_page;

