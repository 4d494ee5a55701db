//! Crawler module for company website scraping
//!
//! This module contains the per-website logic, including:
//! - HTTP clients and fetching with connection-level retry
//! - Email candidate extraction and domain filtering
//! - Contact link selection
//! - The site scraping strategy that ties them together

mod emails;
mod fetcher;
mod links;
mod scraper;

pub use emails::EmailExtractor;
pub use fetcher::{
    build_api_client, build_site_client, fetch_url, send_with_retry, FetchResult, HttpFetcher,
    NetworkErrorKind, PageFetcher,
};
pub use links::find_contact_link;
pub use scraper::SiteScraper;
