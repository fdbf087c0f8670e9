//! Reelpick: discovers every film in a public Letterboxd list
//!
//! This crate implements a list-ingestion pipeline that walks a list's
//! paginated HTML pages and its RSS feed concurrently, picks the more complete
//! source, and returns a deduplicated, ordered collection of films.

pub mod config;
pub mod crawler;
pub mod list;
pub mod model;

use thiserror::Error;

/// Main error type for Reelpick operations
#[derive(Debug, Error)]
pub enum ReelError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a free-form input into a list identity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("URL is empty")]
    Empty,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL does not point at {expected}: {found}")]
    WrongDomain { expected: String, found: String },

    #[error("URL is not a list URL: {0}")]
    NotAList(String),

    #[error("URL is missing the {0} segment")]
    MissingSegment(&'static str),
}

/// Failures of a list fetch, as seen by the caller
#[derive(Debug, Error)]
pub enum ListError {
    /// The input could not be recognized as a list URL. No request was made.
    #[error("invalid list URL: {0}")]
    InvalidInput(#[from] UrlError),

    /// A single source failed. Sources narrow this to an empty result.
    #[error("{source_name} unavailable: {reason}")]
    SourceUnavailable {
        source_name: &'static str,
        reason: String,
    },

    /// The input was well-formed but neither source produced any film.
    #[error("no films found in list")]
    EmptyResult,

    /// Something unexpected failed inside the pipeline.
    #[error("list fetch failed: {0}")]
    FetchFailed(String),
}

impl ListError {
    /// HTTP-style status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::EmptyResult => 404,
            Self::SourceUnavailable { .. } | Self::FetchFailed(_) => 500,
        }
    }

    /// Short message suitable for showing to a user
    ///
    /// Never includes the text of an underlying collaborator error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => {
                "Please enter a valid Letterboxd list URL (https://letterboxd.com/<user>/list/<name>/)"
            }
            Self::EmptyResult => "No films found. The list may be private, empty, or unavailable.",
            Self::SourceUnavailable { .. } | Self::FetchFailed(_) => {
                "Failed to fetch the list. Please try again later."
            }
        }
    }
}

/// Result type alias for Reelpick operations
pub type Result<T> = std::result::Result<T, ReelError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{pick_random, ListFetcher};
pub use list::{parse_list_url, ListIdentity};
pub use model::{ApiResponse, FilmRecord, PageResult};
