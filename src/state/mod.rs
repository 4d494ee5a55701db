//! State module for per-record pipeline outcomes
//!
//! # Components
//!
//! - `LookupOutcome`: how a company name was (or was not) resolved to a website
//! - `ScrapeOutcome`: how a website was (or was not) turned into a verified email

mod lookup_outcome;
mod scrape_outcome;

// Re-export main types
pub use lookup_outcome::{LookupOutcome, MatchRule};
pub use scrape_outcome::{EmailSource, ScrapeOutcome};
