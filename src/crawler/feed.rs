//! RSS feed extraction
//!
//! The feed is a best-effort source: one request, possibly incomplete for
//! long lists, and any failure simply yields no films.

use crate::crawler::fetcher::{fetch_with_retry, RetryPolicy};
use crate::list::ListIdentity;
use crate::model::FilmRecord;
use crate::ListError;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

const FEED_ACCEPT: &str = "application/rss+xml, application/xml;q=0.9, text/xml;q=0.8";

/// Item fields collected while reading one `<item>`
#[derive(Debug, Default)]
struct ItemFields {
    title: String,
    link: String,
    film_title: String,
    film_year: String,
}

impl ItemFields {
    fn into_record(self) -> Option<FilmRecord> {
        let slug = slug_from_link(self.link.trim())?;
        let film_title = self.film_title.trim();
        let year = self.film_year.trim();

        let base_title = if film_title.is_empty() {
            self.title.trim()
        } else {
            film_title
        };
        let title = if year.is_empty() {
            base_title.to_string()
        } else {
            format!("{} ({})", base_title, year)
        };

        FilmRecord::new(title, year, slug)
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Link,
    FilmTitle,
    FilmYear,
}

impl Field {
    /// Maps an element's local name (namespace prefix already stripped)
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"filmTitle" => Some(Self::FilmTitle),
            b"filmYear" => Some(Self::FilmYear),
            _ => None,
        }
    }
}

/// Fetches and parses the feed for a list
///
/// Never fails: network errors, HTML error pages and malformed XML are
/// logged and reported as an empty result.
pub async fn fetch_feed(
    client: &Client,
    identity: &ListIdentity,
    base_url: &str,
    policy: RetryPolicy,
) -> Vec<FilmRecord> {
    match try_fetch_feed(client, identity, base_url, policy).await {
        Ok(films) => {
            tracing::debug!("Feed for {} yielded {} films", identity, films.len());
            films
        }
        Err(e) => {
            tracing::warn!("{}", e);
            Vec::new()
        }
    }
}

async fn try_fetch_feed(
    client: &Client,
    identity: &ListIdentity,
    base_url: &str,
    policy: RetryPolicy,
) -> Result<Vec<FilmRecord>, ListError> {
    let url = identity.feed_url(base_url);
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));

    let body = fetch_with_retry(client, &url, headers, policy)
        .await
        .map_err(|e| unavailable(e.to_string()))?
        .ok_or_else(|| unavailable(format!("no successful response from {}", url)))?;

    if !looks_like_feed(&body) {
        return Err(unavailable(format!("{} did not return a feed document", url)));
    }

    parse_feed(&body).map_err(|e| unavailable(e.to_string()))
}

fn unavailable(reason: String) -> ListError {
    ListError::SourceUnavailable {
        source_name: "feed",
        reason,
    }
}

/// Whether a body is an XML feed rather than an HTML error page
pub fn looks_like_feed(body: &str) -> bool {
    let head = body.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<?xml") || head.starts_with("<rss") || head.starts_with("<feed")
}

/// Parses an RSS document into film records, in item order
///
/// Items whose link carries no film slug are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<FilmRecord>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut films = Vec::new();
    let mut item: Option<ItemFields> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"item" {
                    item = Some(ItemFields::default());
                } else if item.is_some() {
                    field = Field::from_local_name(name.as_ref());
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"item" {
                    if let Some(record) = item.take().and_then(ItemFields::into_record) {
                        films.push(record);
                    }
                }
                field = None;
            }
            Event::Text(t) => {
                if let (Some(current), Some(f)) = (item.as_mut(), field) {
                    push_text(current, f, &t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let (Some(current), Some(f)) = (item.as_mut(), field) {
                    push_text(current, f, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(films)
}

fn push_text(item: &mut ItemFields, field: Field, text: &str) {
    let target = match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::FilmTitle => &mut item.film_title,
        Field::FilmYear => &mut item.film_year,
    };
    target.push_str(text);
}

/// Extracts the film slug from a link containing `film/<slug>`
///
/// Handles both `/film/<slug>/` and `/<user>/film/<slug>/`.
pub fn slug_from_link(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let position = segments.iter().position(|s| *s == "film")?;
    segments.get(position + 1).map(|s| s.to_string())
}
