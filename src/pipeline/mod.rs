//! Batch pipeline
//!
//! # Components
//!
//! - `SiteResolver` / `EmailFinder`: the two per-record stages, injected as trait objects
//! - `run_bounded`: runs one stage over the batch under a concurrency limit
//! - `Pipeline`: resolves every website first, then scrapes every website

mod coordinator;
mod scheduler;

pub use coordinator::{BatchReport, Pipeline};
pub use scheduler::run_bounded;

use crate::state::{LookupOutcome, ScrapeOutcome};
use async_trait::async_trait;

/// Resolves a company name to its website
#[async_trait]
pub trait SiteResolver: Send + Sync {
    async fn resolve(&self, company_name: &str) -> LookupOutcome;
}

/// Finds a verified contact email on a website
#[async_trait]
pub trait EmailFinder: Send + Sync {
    /// `None` or a blank website means there is nothing to scrape
    async fn find_email(&self, website: Option<&str>) -> ScrapeOutcome;
}

/// One input row to enrich
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One output row: the input name with whatever could be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub name: String,
    pub url: Option<String>,
    pub email: Option<String>,
}
