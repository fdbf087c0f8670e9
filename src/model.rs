//! Records produced by the pipeline and the response envelopes returned to callers

use serde::{Deserialize, Serialize};

/// Base of canonical film detail URLs
pub const FILM_URL_BASE: &str = "https://letterboxd.com/film/";

/// One film discovered in a list
///
/// `slug` is the identity: two records with the same slug are the same film,
/// whatever their captured title or year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRecord {
    /// Display title, possibly ending in `" (YYYY)"`
    pub title: String,
    /// Four-digit year, or empty when unknown
    pub year: String,
    pub slug: String,
    pub source_url: String,
}

impl FilmRecord {
    /// Builds a record, deriving `source_url` from the slug
    ///
    /// Returns `None` when the slug is empty.
    pub fn new(title: impl Into<String>, year: impl Into<String>, slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        if slug.is_empty() {
            return None;
        }

        Some(Self {
            title: title.into(),
            year: year.into(),
            source_url: film_url(&slug),
            slug,
        })
    }

    /// Title without a trailing `" (YYYY)"`, for search queries
    pub fn display_title(&self) -> &str {
        match split_trailing_year(&self.title) {
            Some((bare, _)) => bare,
            None => &self.title,
        }
    }

    /// Fills an empty `year` from a trailing `" (YYYY)"` in the title
    pub fn with_year_from_title(mut self) -> Self {
        if self.year.is_empty() {
            if let Some((_, year)) = split_trailing_year(&self.title) {
                self.year = year.to_string();
            }
        }
        self
    }
}

/// Canonical detail-page URL for a slug
pub fn film_url(slug: &str) -> String {
    format!("{}{}/", FILM_URL_BASE, slug)
}

/// Splits `"Title (1999)"` into `("Title", "1999")`
fn split_trailing_year(title: &str) -> Option<(&str, &str)> {
    let rest = title.strip_suffix(')')?;
    let open = rest.rfind(" (")?;
    let year = &rest[open + 2..];
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Some((&rest[..open], year))
    } else {
        None
    }
}

/// Films found on one HTML page of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Complete entries, in page order
    pub films: Vec<FilmRecord>,
    /// Item containers seen, complete or not; zero ends pagination
    pub container_count: usize,
    /// Whether the page shows a next-page link
    pub has_next: bool,
}

/// Successful response body: `{ "films": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmsBody {
    pub films: Vec<FilmRecord>,
}

/// Failure response body: `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Either response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Films(FilmsBody),
    Error(ErrorBody),
}

/// Status code plus body, ready for a front-end or an HTTP layer
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn films(films: Vec<FilmRecord>) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Films(FilmsBody { films }),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Error(ErrorBody {
                error: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.body)
    }

    /// Narrows a film response to one randomly chosen film
    ///
    /// The pick gets its year recovered from the title when no year was
    /// captured. Error responses come back unchanged.
    pub fn into_random_pick(self) -> Self {
        let picked = match &self.body {
            ResponseBody::Films(body) => crate::crawler::pick_random(&body.films).cloned(),
            ResponseBody::Error(_) => None,
        };

        match picked {
            Some(film) => {
                tracing::info!("Picked {} ({})", film.display_title(), film.slug);
                Self::films(vec![film.with_year_from_title()])
            }
            None => self,
        }
    }
}
