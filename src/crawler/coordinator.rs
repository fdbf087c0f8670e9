//! List-fetch orchestration
//!
//! One call moves through these steps:
//! 1. Validate the input URL (no network on failure)
//! 2. Derive the list identity
//! 3. Run the page walk and the feed concurrently, select, deduplicate
//! 4. Respond with the films, or a typed failure when there are none
//!
//! Any fault escaping step 3 is caught here and reported as `FetchFailed`.

use crate::config::Config;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::merge::merge_sources;
use crate::list::{validate_list_url, ListIdentity};
use crate::model::{ApiResponse, FilmRecord};
use crate::{ListError, ReelError};
use reqwest::Client;
use std::sync::Arc;
use tokio::task::JoinError;

/// Entry point for fetching lists
///
/// Holds the configuration and one HTTP client; calls share nothing else.
#[derive(Debug, Clone)]
pub struct ListFetcher {
    config: Arc<Config>,
    client: Client,
}

impl ListFetcher {
    /// Creates a fetcher with a client built from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ListFetcher)` - Ready to fetch lists
    /// * `Err(ReelError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ReelError> {
        let client = build_http_client(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(config: Config, client: Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Fetches every film of the list at `input`
    ///
    /// # Returns
    ///
    /// * `Ok(films)` - Non-empty, ordered, unique by slug
    /// * `Err(ListError::InvalidInput)` - Not a list URL; nothing was fetched
    /// * `Err(ListError::EmptyResult)` - Neither source produced a film
    /// * `Err(ListError::FetchFailed)` - The pipeline failed unexpectedly
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reelpick::config::Config;
    /// use reelpick::crawler::ListFetcher;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = ListFetcher::new(Config::default())?;
    /// let films = fetcher.fetch_list("https://letterboxd.com/alice/list/favorites/").await?;
    /// println!("{} films", films.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_list(&self, input: &str) -> Result<Vec<FilmRecord>, ListError> {
        let url = validate_list_url(input, &self.config.source).map_err(|e| {
            tracing::debug!("Rejected input {:?}: {}", input, e);
            ListError::InvalidInput(e)
        })?;

        let identity = ListIdentity::from_url(&url, &self.config.source.list_marker)?;
        tracing::info!("Fetching list {}", identity);

        let client = self.client.clone();
        let config = Arc::clone(&self.config);
        let task_identity = identity.clone();
        let merged = tokio::spawn(async move {
            merge_sources(&client, &task_identity, &config).await
        })
        .await;

        settle(merged, &identity)
    }

    /// Like [`fetch_list`](Self::fetch_list), shaped as a status and JSON body
    pub async fn respond(&self, input: &str) -> ApiResponse {
        into_response(self.fetch_list(input).await)
    }
}

/// Turns the joined merge task into the caller-visible result
///
/// A task that panicked or was cancelled becomes `FetchFailed`; an empty
/// collection becomes `EmptyResult`.
fn settle(
    joined: Result<Vec<FilmRecord>, JoinError>,
    identity: &ListIdentity,
) -> Result<Vec<FilmRecord>, ListError> {
    let films = joined.map_err(|e| {
        tracing::error!("List fetch for {} failed: {}", identity, e);
        ListError::FetchFailed(e.to_string())
    })?;

    if films.is_empty() {
        tracing::info!("No films found for {}", identity);
        return Err(ListError::EmptyResult);
    }

    Ok(films)
}

fn into_response(result: Result<Vec<FilmRecord>, ListError>) -> ApiResponse {
    match result {
        Ok(films) => ApiResponse::films(films),
        Err(e) => ApiResponse::error(e.status_code(), e.user_message()),
    }
}
