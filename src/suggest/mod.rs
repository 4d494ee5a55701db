//! Company name to website resolution
//!
//! The suggestion client asks an autocomplete API for candidate companies and the
//! matcher decides which candidate, if any, is the company that was asked for.

mod client;
mod matcher;

pub use client::SuggestionClient;
pub use matcher::{match_candidates, normalize_company_name, CandidateMatch, SuggestionCandidate};
