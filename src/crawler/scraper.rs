//! Per-website email discovery
//!
//! # Strategy
//!
//! 1. No website: stop without touching the network
//! 2. Fetch the homepage; a transport failure ends the scrape
//! 3. Extract candidates from the homepage, anchored to its final URL
//! 4. With no candidates, follow the best contact-like link once
//! 5. Verify the first candidate's domain has MX records

use super::emails::EmailExtractor;
use super::fetcher::{FetchResult, PageFetcher};
use super::links::find_contact_link;
use crate::config::ScraperConfig;
use crate::dns::MxCheck;
use crate::pipeline::EmailFinder;
use crate::state::{EmailSource, ScrapeOutcome};
use crate::url::parse_site_url;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Scrapes one company website for a verified contact email
pub struct SiteScraper<F, M> {
    fetcher: F,
    mx: M,
    extractor: EmailExtractor,
    homepage_timeout: Duration,
    secondary_timeout: Duration,
}

impl<F: PageFetcher, M: MxCheck> SiteScraper<F, M> {
    pub fn new(fetcher: F, mx: M, extractor: EmailExtractor, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            mx,
            extractor,
            homepage_timeout: config.homepage_timeout(),
            secondary_timeout: config.secondary_timeout(),
        }
    }

    /// Runs the strategy for one website
    pub async fn scrape(&self, website: Option<&str>) -> ScrapeOutcome {
        let website = match website.map(str::trim) {
            Some(w) if !w.is_empty() => w,
            _ => return ScrapeOutcome::NoWebsite,
        };

        let start_url = match parse_site_url(website) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Unusable website {:?}: {}", website, e);
                return ScrapeOutcome::Unreachable {
                    error: e.to_string(),
                };
            }
        };

        // Homepage
        let (final_url, homepage) = match self
            .fetcher
            .fetch(start_url.as_str(), self.homepage_timeout)
            .await
        {
            FetchResult::Page {
                final_url, body, ..
            } => (Url::parse(&final_url).unwrap_or_else(|_| start_url.clone()), body),
            FetchResult::NetworkError { error, kind } => {
                tracing::debug!("Homepage {} unreachable ({:?}): {}", start_url, kind, error);
                tracing::info!("No email for {}", website);
                return ScrapeOutcome::Unreachable { error };
            }
        };

        let mut source = EmailSource::Homepage;
        let mut candidates = self.extractor.extract(&homepage, &final_url);

        // Secondary page
        if candidates.is_empty() {
            let Some(link) = find_contact_link(&homepage, &final_url) else {
                tracing::debug!("No contact-like link on {}", final_url);
                tracing::info!("No email for {}", website);
                return ScrapeOutcome::NoSecondaryLink;
            };

            tracing::debug!("Following {} for {}", link, website);
            match self.fetcher.fetch(link.as_str(), self.secondary_timeout).await {
                FetchResult::Page { body, .. } => {
                    source = EmailSource::SecondaryPage;
                    candidates = self.extractor.extract(&body, &final_url);
                }
                FetchResult::NetworkError { error, .. } => {
                    tracing::debug!("Secondary page {} failed: {}", link, error);
                }
            }
        }

        let Some(email) = candidates.into_iter().next() else {
            tracing::info!("No email for {}", website);
            return ScrapeOutcome::NoCandidates;
        };

        if self.mx.has_mx(&email).await {
            tracing::info!("Found and verified {} on {}", email, website);
            ScrapeOutcome::Verified { email, source }
        } else {
            tracing::info!("Skipped {} (bad MX)", email);
            ScrapeOutcome::BadMx { email }
        }
    }
}

#[async_trait]
impl<F: PageFetcher, M: MxCheck> EmailFinder for SiteScraper<F, M> {
    async fn find_email(&self, website: Option<&str>) -> ScrapeOutcome {
        self.scrape(website).await
    }
}
