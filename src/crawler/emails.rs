//! Email candidate extraction
//!
//! Raw page text is de-obfuscated, scanned with an email-shaped pattern and filtered
//! down to addresses that belong to the site the page came from.

use crate::url::{email_domain, SuffixList};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

/// Spelled-out forms of `@`, replaced in this order
const OBFUSCATIONS: &[&str] = &[" [at] ", "(at)", " at "];

/// Matches ending in one of these are asset file names, not addresses
const BAD_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".css", ".js", ".svg", ".webp"];

/// Finds contact email candidates in page text
#[derive(Clone)]
pub struct EmailExtractor {
    suffixes: Arc<SuffixList>,
    max_len: usize,
}

impl EmailExtractor {
    pub fn new(suffixes: Arc<SuffixList>, max_len: usize) -> Self {
        Self { suffixes, max_len }
    }

    /// Extracts the emails on `html` that belong to the site of `page_url`
    ///
    /// Candidates are lowercased, stripped of asset names and over-long matches, and
    /// kept only when the registrable name of their domain contains the site's
    /// registrable name. The result is deduplicated and keeps first-appearance order.
    /// A page URL without a usable host yields no candidates.
    ///
    /// # Example
    ///
    /// ```
    /// use company_enricher::crawler::EmailExtractor;
    /// use company_enricher::url::SuffixList;
    /// use std::sync::Arc;
    /// use url::Url;
    ///
    /// let extractor = EmailExtractor::new(Arc::new(SuffixList::embedded().unwrap()), 50);
    /// let page = Url::parse("https://acme.io/").unwrap();
    /// let found = extractor.extract("write to jane [at] acme.io", &page);
    /// assert_eq!(found, vec!["jane@acme.io".to_string()]);
    /// ```
    pub fn extract(&self, html: &str, page_url: &Url) -> Vec<String> {
        let Some(site) = self.suffixes.site_name(page_url) else {
            tracing::debug!("No registrable name for {}, skipping extraction", page_url);
            return Vec::new();
        };

        let text = deobfuscate(html);
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for m in EMAIL_PATTERN.find_iter(&text) {
            let email = m.as_str().to_lowercase();

            if BAD_EXTENSIONS.iter().any(|ext| email.ends_with(ext)) {
                continue;
            }
            if email.len() > self.max_len {
                continue;
            }
            if !self.belongs_to_site(&email, &site) {
                tracing::trace!("Dropping off-site candidate {}", email);
                continue;
            }

            if seen.insert(email.clone()) {
                found.push(email);
            }
        }

        found
    }

    fn belongs_to_site(&self, email: &str, site: &str) -> bool {
        email_domain(email)
            .and_then(|domain| self.suffixes.registrable_name(domain))
            .map(|name| name.contains(site))
            .unwrap_or(false)
    }
}

/// Rewrites common spelled-out `@` forms into `@`
fn deobfuscate(text: &str) -> String {
    OBFUSCATIONS
        .iter()
        .fold(text.to_string(), |acc, pattern| acc.replace(pattern, "@"))
}
