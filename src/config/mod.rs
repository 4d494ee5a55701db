//! Configuration module for Company Enricher
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; `Config::default()` reproduces the built-in pipeline settings.
//!
//! # Example
//!
//! ```no_run
//! use company_enricher::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("enricher.toml")).unwrap();
//! println!("Lookups in flight: {}", config.suggestion.max_concurrent_lookups);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DnsConfig, DomainsConfig, HttpConfig, InputConfig, OutputConfig, ScraperConfig,
    SuggestionConfig, DEFAULT_ACCEPT, DEFAULT_SUGGESTION_ENDPOINT, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
