use super::matcher::{match_candidates, normalize_company_name, SuggestionCandidate};
use crate::config::{Config, SuggestionConfig};
use crate::crawler::{build_api_client, send_with_retry};
use crate::pipeline::SiteResolver;
use crate::state::{LookupOutcome, MatchRule};
use crate::EnricherError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Resolves company names to websites through the suggestion API
///
/// One client is shared by every lookup of a batch so connections are pooled.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
    max_candidates: usize,
}

impl SuggestionClient {
    /// Creates a client with its own pooled API connection
    pub fn new(config: &Config) -> Result<Self, EnricherError> {
        Self::with_client(build_api_client(config)?, &config.suggestion)
    }

    /// Creates a client around an existing `reqwest` client
    pub fn with_client(client: Client, config: &SuggestionConfig) -> Result<Self, EnricherError> {
        Ok(Self {
            client,
            endpoint: Url::parse(&config.endpoint)?,
            timeout: config.timeout(),
            retries: config.connect_retries,
            backoff: config.backoff_base(),
            max_candidates: config.max_candidates,
        })
    }

    /// Looks up the website of one company
    ///
    /// Names that normalize to nothing are answered without a request. Every other
    /// failure (transport error, non-200 status, unparseable body) comes back as
    /// [`LookupOutcome::Unavailable`].
    pub async fn lookup(&self, company_name: &str) -> LookupOutcome {
        if normalize_company_name(company_name).is_empty() {
            tracing::debug!("Skipping lookup for empty name {:?}", company_name);
            return LookupOutcome::EmptyName;
        }

        let candidates = match self.fetch_candidates(company_name).await {
            Ok(candidates) => candidates,
            Err(reason) => {
                tracing::debug!("Suggestion lookup for {:?} failed: {}", company_name, reason);
                return LookupOutcome::Unavailable { reason };
            }
        };

        if candidates.is_empty() {
            tracing::debug!("No suggestions for {:?}", company_name);
            return LookupOutcome::NoMatch;
        }

        let considered = &candidates[..candidates.len().min(self.max_candidates)];
        match match_candidates(company_name, considered) {
            Some(matched) => {
                let url = matched.url();
                match matched.rule {
                    MatchRule::Domain => tracing::info!("API match: {} -> {}", company_name, url),
                    MatchRule::Name => {
                        tracing::info!("API name match: {} -> {}", company_name, url)
                    }
                }
                LookupOutcome::Matched {
                    url,
                    rule: matched.rule,
                }
            }
            None => {
                tracing::debug!(
                    "None of {} suggestions match {:?}",
                    considered.len(),
                    company_name
                );
                LookupOutcome::NoMatch
            }
        }
    }

    async fn fetch_candidates(&self, company_name: &str) -> Result<Vec<SuggestionCandidate>, String> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("query", company_name)])
            .timeout(self.timeout);

        let response = send_with_retry(request, self.retries, self.backoff)
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response
            .json::<Vec<SuggestionCandidate>>()
            .await
            .map_err(|e| format!("invalid response body: {}", e))
    }
}

#[async_trait]
impl SiteResolver for SuggestionClient {
    async fn resolve(&self, company_name: &str) -> LookupOutcome {
        self.lookup(company_name).await
    }
}
