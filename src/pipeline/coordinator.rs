//! Pipeline coordinator - two-stage batch orchestration
//!
//! Stage 1 resolves a website for every record under the lookup limit. Only when the
//! whole batch is resolved does stage 2 start scraping, under the scrape limit. The
//! outcomes of both stages are zipped back together by input index.

use super::scheduler::run_bounded;
use super::{CompanyRecord, EmailFinder, EnrichedRecord, SiteResolver};
use crate::config::Config;
use crate::crawler::{EmailExtractor, HttpFetcher, SiteScraper};
use crate::dns::MxValidator;
use crate::state::{LookupOutcome, ScrapeOutcome};
use crate::suggest::SuggestionClient;
use crate::url::SuffixList;
use crate::EnricherError;
use std::sync::Arc;

/// Result of one pipeline run
///
/// All three vectors have one entry per input record, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub records: Vec<EnrichedRecord>,
    pub lookups: Vec<LookupOutcome>,
    pub scrapes: Vec<ScrapeOutcome>,
}

/// Main pipeline structure
pub struct Pipeline {
    resolver: Arc<dyn SiteResolver>,
    finder: Arc<dyn EmailFinder>,
    lookup_limit: usize,
    scrape_limit: usize,
}

impl Pipeline {
    /// Creates a pipeline from its two stages, with the default limits of 50 lookups
    /// and 10 scrapes in flight
    pub fn new(resolver: Arc<dyn SiteResolver>, finder: Arc<dyn EmailFinder>) -> Self {
        Self {
            resolver,
            finder,
            lookup_limit: 50,
            scrape_limit: 10,
        }
    }

    /// Overrides the concurrency limits
    pub fn with_limits(mut self, lookup_limit: usize, scrape_limit: usize) -> Self {
        self.lookup_limit = lookup_limit;
        self.scrape_limit = scrape_limit;
        self
    }

    /// Builds the production pipeline described by `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Pipeline)` - Both HTTP clients were created
    /// * `Err(EnricherError)` - An HTTP client or the endpoint URL could not be set up
    pub fn from_config(config: &Config, suffixes: Arc<SuffixList>) -> Result<Self, EnricherError> {
        let resolver = SuggestionClient::new(config)?;

        let extractor = EmailExtractor::new(suffixes, config.scraper.max_email_length);
        let scraper = SiteScraper::new(
            HttpFetcher::new(config)?,
            MxValidator::new(&config.dns),
            extractor,
            &config.scraper,
        );

        Ok(Self::new(Arc::new(resolver), Arc::new(scraper)).with_limits(
            config.suggestion.max_concurrent_lookups,
            config.scraper.max_concurrent_scrapes,
        ))
    }

    /// Enriches a batch of records
    ///
    /// Never fails: a record whose lookup or scrape cannot complete keeps blank
    /// fields, and the report always has one entry per input.
    pub async fn run(&self, records: &[CompanyRecord]) -> BatchReport {
        tracing::info!(
            "Resolving websites for {} companies ({} at a time)",
            records.len(),
            self.lookup_limit
        );
        let lookups = self.resolve_all(records).await;

        let matched = lookups.iter().filter(|l| l.is_matched()).count();
        tracing::info!(
            "Resolved {}/{} websites, scraping ({} at a time)",
            matched,
            records.len(),
            self.scrape_limit
        );
        let scrapes = self.scrape_all(&lookups).await;

        let records = records
            .iter()
            .zip(lookups.iter().zip(scrapes.iter()))
            .map(|(record, (lookup, scrape))| EnrichedRecord {
                name: record.name.clone(),
                url: lookup.url().map(str::to_string),
                email: scrape.email().map(str::to_string),
            })
            .collect();

        BatchReport {
            records,
            lookups,
            scrapes,
        }
    }

    async fn resolve_all(&self, records: &[CompanyRecord]) -> Vec<LookupOutcome> {
        let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let resolver = self.resolver.clone();

        run_bounded(names, self.lookup_limit, move |name| {
            let resolver = resolver.clone();
            async move { resolver.resolve(&name).await }
        })
        .await
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| LookupOutcome::Unavailable {
                reason: "lookup task failed".to_string(),
            })
        })
        .collect()
    }

    async fn scrape_all(&self, lookups: &[LookupOutcome]) -> Vec<ScrapeOutcome> {
        let websites: Vec<Option<String>> = lookups
            .iter()
            .map(|l| l.url().map(str::to_string))
            .collect();
        let finder = self.finder.clone();

        run_bounded(websites, self.scrape_limit, move |website| {
            let finder = finder.clone();
            async move { finder.find_email(website.as_deref()).await }
        })
        .await
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| ScrapeOutcome::Unreachable {
                error: "scrape task failed".to_string(),
            })
        })
        .collect()
    }
}
