//! Company Enricher: resolves company names to websites and verified contact emails
//!
//! This crate implements a two-stage enrichment pipeline. Company names are first
//! matched to a website through a suggestion API, then each website is scraped for a
//! contact email that is filtered against the site's own domain and gated on the
//! presence of DNS MX records.

pub mod config;
pub mod crawler;
pub mod dns;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod suggest;
pub mod url;

use thiserror::Error;

/// Main error type for Company Enricher operations
///
/// Only construction and I/O failures are reported through this type. Failures that
/// concern a single company are folded into [`state::LookupOutcome`] and
/// [`state::ScrapeOutcome`] instead.
#[derive(Debug, Error)]
pub enum EnricherError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Public suffix list error: {0}")]
    SuffixList(String),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Column '{0}' not found in input")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Company Enricher operations
pub type Result<T> = std::result::Result<T, EnricherError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{CompanyRecord, EnrichedRecord, Pipeline};
pub use state::{LookupOutcome, ScrapeOutcome};
pub use url::{parse_site_url, SuffixList};
