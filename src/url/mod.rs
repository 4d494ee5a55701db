//! URL handling module for Company Enricher
//!
//! This module provides host extraction, website URL parsing, and public-suffix-aware
//! registrable names. The registrable name is the identity used to decide whether an
//! email address belongs to the site it was scraped from.

mod domain;

use crate::{EnricherError, UrlError};
use publicsuffix::{List, Psl};
use std::path::Path;
use url::Url;

// Re-export main functions
pub use domain::{email_domain, extract_domain};

/// Complete Public Suffix List compiled into the binary
const EMBEDDED_SUFFIX_LIST: &str = include_str!("public_suffix_list.dat");

/// Public suffix list used to derive registrable names
pub struct SuffixList {
    list: List,
}

impl SuffixList {
    /// Builds the complete list shipped with the crate
    pub fn embedded() -> Result<Self, EnricherError> {
        Self::parse(EMBEDDED_SUFFIX_LIST)
    }

    /// Parses a list in the public_suffix_list.dat format
    pub fn parse(content: &str) -> Result<Self, EnricherError> {
        let list = content
            .parse::<List>()
            .map_err(|e| EnricherError::SuffixList(e.to_string()))?;
        Ok(Self { list })
    }

    /// Loads a list from disk
    pub fn from_file(path: &Path) -> Result<Self, EnricherError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the list from `path` if given, otherwise the embedded list
    pub fn load(path: Option<&str>) -> Result<Self, EnricherError> {
        match path {
            Some(p) => {
                tracing::info!("Loading public suffix list from {}", p);
                Self::from_file(Path::new(p))
            }
            None => Self::embedded(),
        }
    }

    /// Returns the registrable name of a host: its registrable domain minus the suffix
    ///
    /// `sub.acme.co.uk` yields `acme`. IP literals are returned unchanged, since they
    /// have no suffix to strip. Returns `None` when the host is itself a public suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use company_enricher::url::SuffixList;
    ///
    /// let list = SuffixList::embedded().unwrap();
    /// assert_eq!(list.registrable_name("www.acme.co.uk"), Some("acme".to_string()));
    /// assert_eq!(list.registrable_name("co.uk"), None);
    /// ```
    pub fn registrable_name(&self, host: &str) -> Option<String> {
        let host = host.trim().trim_end_matches('.').to_lowercase();
        if host.is_empty() {
            return None;
        }

        if domain::is_ip_literal(&host) {
            return Some(host);
        }

        let registrable = self.list.domain(host.as_bytes())?;
        let full = registrable.as_bytes();
        let suffix_len = registrable.suffix().as_bytes().len();

        // full is "<name>.<suffix>"
        let name_len = full.len().checked_sub(suffix_len + 1)?;
        let name = std::str::from_utf8(&full[..name_len]).ok()?;

        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Registrable name of a URL's host
    pub fn site_name(&self, url: &Url) -> Option<String> {
        extract_domain(url).and_then(|host| self.registrable_name(&host))
    }
}

/// Parses a resolved website into an absolute http(s) URL
///
/// Bare domains are given an `https://` scheme.
///
/// ```
/// use company_enricher::url::parse_site_url;
///
/// assert_eq!(parse_site_url("acme.io").unwrap().as_str(), "https://acme.io/");
/// assert!(parse_site_url("ftp://acme.io").is_err());
/// ```
pub fn parse_site_url(website: &str) -> Result<Url, UrlError> {
    let trimmed = website.trim();
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if extract_domain(&url).is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
