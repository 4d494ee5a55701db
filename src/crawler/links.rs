//! Secondary page discovery
//!
//! Picks the anchor on a homepage most likely to lead to contact details.

use scraper::{Html, Selector};
use url::Url;

/// Words that mark a link as contact-like
const KEYWORDS: &[&str] = &[
    "contact",
    "contact us",
    "support",
    "about",
    "about us",
    "connect",
    "reach",
    "help",
];

/// Ranks an anchor: 2 for `contact`, 1 for any other keyword, 0 otherwise
fn rank(text: &str, href: &str) -> u8 {
    let text = text.to_lowercase();
    let href = href.to_lowercase();
    let has = |word: &str| text.contains(word) || href.contains(word);

    if has("contact") {
        2
    } else if KEYWORDS.iter().any(|k| has(k)) {
        1
    } else {
        0
    }
}

/// Finds the best contact-like link on a page
///
/// Every `<a href>` is ranked on its visible text and its href. The highest-ranked
/// anchor wins, the earliest one on ties. Returns the link resolved against
/// `base_url`, or `None` if no anchor ranks above zero.
///
/// ```
/// use company_enricher::crawler::find_contact_link;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="/contact">Contact</a>"#;
/// let base = Url::parse("https://acme.io/").unwrap();
/// assert_eq!(
///     find_contact_link(html, &base).map(|u| u.to_string()),
///     Some("https://acme.io/contact".to_string())
/// );
/// ```
pub fn find_contact_link(html: &str, base_url: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href]").ok()?;

    let mut best: Option<(u8, Url)> = None;

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text: String = element.text().collect();

        let score = rank(&text, href);
        if score == 0 || best.as_ref().is_some_and(|(b, _)| *b >= score) {
            continue;
        }

        if let Some(url) = resolve_link(href, base_url) {
            best = Some((score, url));
            if score == 2 {
                break;
            }
        }
    }

    best.map(|(_, url)| url)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for `javascript:`, `mailto:`, `tel:` and `data:` links, fragment-only
/// links, unparseable hrefs, and anything that is not http(s) after resolution.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(absolute)
    } else {
        None
    }
}
