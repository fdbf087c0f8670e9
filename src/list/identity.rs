use crate::config::SourceConfig;
use crate::list::normalize::normalize_input;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// Owner and list segments that identify one list on the source site
///
/// Two inputs that normalize to the same canonical path compare equal,
/// so the identity can key lookups directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListIdentity {
    owner: String,
    marker: String,
    list: String,
}

impl ListIdentity {
    /// Derives the identity from an already-normalized URL
    ///
    /// The path must begin `/<owner>/<marker>/<list>/`; anything after the
    /// list segment (sort orders, `page/<n>/`, `detail/`) is ignored.
    pub fn from_url(url: &Url, marker: &str) -> UrlResult<Self> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let owner = segments.first().ok_or(UrlError::MissingSegment("owner"))?;
        if segments.get(1) != Some(&marker) {
            return Err(UrlError::NotAList(url.to_string()));
        }
        let list = segments.get(2).ok_or(UrlError::MissingSegment("list"))?;

        Ok(Self {
            owner: (*owner).to_string(),
            marker: marker.to_string(),
            list: (*list).to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    /// Canonical path of the list, e.g. `/alice/list/favorites/`
    pub fn canonical_path(&self) -> String {
        format!("/{}/{}/{}/", self.owner, self.marker, self.list)
    }

    /// Feed endpoint under the given base URL
    pub fn feed_url(&self, base_url: &str) -> String {
        format!("{}{}rss/", base_url.trim_end_matches('/'), self.canonical_path())
    }

    /// HTML page endpoint; page 1 is the bare list path
    pub fn page_url(&self, base_url: &str, page: u32) -> String {
        let base = base_url.trim_end_matches('/');
        if page <= 1 {
            format!("{}{}", base, self.canonical_path())
        } else {
            format!("{}{}page/{}/", base, self.canonical_path(), page)
        }
    }
}

impl fmt::Display for ListIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_path())
    }
}

/// Checks that an input looks like a list URL on the configured source
///
/// Returns the normalized URL. No network access.
pub fn validate_list_url(input: &str, source: &SourceConfig) -> UrlResult<Url> {
    let url = normalize_input(input)?;

    let host = url.host_str().unwrap_or_default();
    let expected = source.domain.to_lowercase();
    if host != expected {
        return Err(UrlError::WrongDomain {
            expected,
            found: host.to_string(),
        });
    }

    let has_marker = url
        .path_segments()
        .map(|mut s| s.any(|seg| seg == source.list_marker))
        .unwrap_or(false);
    if !has_marker {
        return Err(UrlError::NotAList(url.to_string()));
    }

    Ok(url)
}

/// Validates an input and derives its list identity
///
/// # Examples
///
/// ```
/// use reelpick::config::SourceConfig;
/// use reelpick::list::parse_list_url;
///
/// let id = parse_list_url("https://letterboxd.com/alice/list/favorites/", &SourceConfig::default()).unwrap();
/// assert_eq!(id.canonical_path(), "/alice/list/favorites/");
/// ```
pub fn parse_list_url(input: &str, source: &SourceConfig) -> UrlResult<ListIdentity> {
    let url = validate_list_url(input, source)?;
    ListIdentity::from_url(&url, &source.list_marker)
}
