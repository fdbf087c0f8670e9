//! HTML parser for one page of a list
//!
//! This module extracts from a list page:
//! - One film per list-item container (slug and display title)
//! - Whether a next-page link is present

use crate::model::{FilmRecord, PageResult};
use scraper::{ElementRef, Html, Selector};

/// List-item containers across the site's current and older layouts
const CONTAINER_SELECTOR: &str = "li.poster-container, li.posteritem, li.film-list-entry";

/// The element carrying a film's identity attributes
const IDENTITY_SELECTOR: &str = "[data-film-slug], [data-item-slug]";

const NEXT_PAGE_SELECTOR: &str = "a.next";

/// Parses one list page
///
/// # Extraction Rules
///
/// - Each container contributes at most one film, from the first element
///   inside it with `data-film-slug` or `data-item-slug`
/// - Title comes from `data-film-name` / `data-item-name`, else the `alt` of
///   a nested `<img>`
/// - Containers missing a slug or a title are skipped silently
/// - Year is left empty
///
/// # Example
///
/// ```
/// use reelpick::crawler::scrape_page;
///
/// let html = r#"<ul><li class="poster-container"><div data-film-slug="heat" data-film-name="Heat"></div></li></ul>"#;
/// let page = scrape_page(html);
/// assert_eq!(page.films[0].slug, "heat");
/// assert!(!page.has_next);
/// ```
pub fn scrape_page(html: &str) -> PageResult {
    let document = Html::parse_document(html);

    let (Ok(containers), Ok(identity), Ok(next)) = (
        Selector::parse(CONTAINER_SELECTOR),
        Selector::parse(IDENTITY_SELECTOR),
        Selector::parse(NEXT_PAGE_SELECTOR),
    ) else {
        return PageResult::default();
    };

    let mut result = PageResult::default();

    for container in document.select(&containers) {
        result.container_count += 1;

        if let Some(film) = container
            .select(&identity)
            .next()
            .and_then(extract_film)
        {
            result.films.push(film);
        }
    }

    result.has_next = document.select(&next).next().is_some();
    result
}

/// Reads slug and title from an identity element
fn extract_film(element: ElementRef<'_>) -> Option<FilmRecord> {
    let attrs = element.value();

    let slug = attrs
        .attr("data-film-slug")
        .or_else(|| attrs.attr("data-item-slug"))
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let title = attrs
        .attr("data-film-name")
        .or_else(|| attrs.attr("data-item-name"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| image_alt(element))?;

    FilmRecord::new(title, "", slug)
}

fn image_alt(element: ElementRef<'_>) -> Option<String> {
    let img = Selector::parse("img[alt]").ok()?;
    element
        .select(&img)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().to_string())
        .filter(|alt| !alt.is_empty())
}
