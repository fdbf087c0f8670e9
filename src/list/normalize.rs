use crate::UrlError;
use url::Url;

/// Normalizes a user-supplied list URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject if empty
/// 2. Assume `https://` when no scheme is given
/// 3. Parse the URL; reject if malformed
/// 4. Accept only HTTP and HTTPS schemes
/// 5. Lowercase the host and remove a `www.` prefix
/// 6. Drop the query string and the fragment
/// 7. Normalize the path: drop empty and dot segments, always end with `/`
///
/// # Examples
///
/// ```
/// use reelpick::list::normalize_input;
///
/// let url = normalize_input("  LetterBoxd.com/alice/list/favorites?sort=asc  ").unwrap();
/// assert_eq!(url.as_str(), "https://letterboxd.com/alice/list/favorites/");
/// ```
pub fn normalize_input(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| UrlError::Parse(format!("no host in '{}'", trimmed)))?;
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(e.to_string()))?;

    url.set_query(None);
    url.set_fragment(None);

    let path = normalize_path(url.path());
    url.set_path(&path);

    Ok(url)
}

/// Whether the input starts with `<scheme>://`
///
/// Only the text before the first `/` is considered, so a `://` inside the
/// path or query does not count.
fn has_scheme(input: &str) -> bool {
    let head = input.split('/').next().unwrap_or_default();
    match head.strip_suffix(':') {
        Some(scheme) => {
            input[head.len()..].starts_with("//")
                && !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Removes empty and dot segments and guarantees a trailing slash
fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}
