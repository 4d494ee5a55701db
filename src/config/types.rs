use serde::Deserialize;
use std::time::Duration;

/// Default endpoint of the company suggestion API
pub const DEFAULT_SUGGESTION_ENDPOINT: &str =
    "https://autocomplete.clearbit.com/v1/companies/suggest";

/// Browser-like user agent sent to the suggestion API and to scraped sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Browser-like Accept header
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Main configuration structure for Company Enricher
///
/// Every section is optional; missing sections and keys fall back to the
/// pipeline's built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub suggestion: SuggestionConfig,
    pub scraper: ScraperConfig,
    pub dns: DnsConfig,
    pub http: HttpConfig,
    pub domains: DomainsConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Suggestion API client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// URL of the suggestion endpoint; the company name is sent as `query`
    pub endpoint: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Number of extra attempts after a failed connection
    #[serde(rename = "connect-retries")]
    pub connect_retries: u32,

    /// First backoff delay between connection attempts (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// How many suggestions are considered for matching
    #[serde(rename = "max-candidates")]
    pub max_candidates: usize,

    /// Maximum number of simultaneous suggestion lookups
    #[serde(rename = "max-concurrent-lookups")]
    pub max_concurrent_lookups: usize,
}

impl SuggestionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUGGESTION_ENDPOINT.to_string(),
            timeout_secs: 3,
            connect_retries: 2,
            backoff_base_ms: 500,
            max_candidates: 3,
            max_concurrent_lookups: 50,
        }
    }
}

/// Site scraping configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Timeout for the homepage fetch (seconds)
    #[serde(rename = "homepage-timeout-secs")]
    pub homepage_timeout_secs: u64,

    /// Timeout for the secondary (contact-like) page fetch (seconds)
    #[serde(rename = "secondary-timeout-secs")]
    pub secondary_timeout_secs: u64,

    /// Maximum number of simultaneous site scrapes
    #[serde(rename = "max-concurrent-scrapes")]
    pub max_concurrent_scrapes: usize,

    /// Skip TLS certificate validation when fetching company sites
    #[serde(rename = "accept-invalid-certs")]
    pub accept_invalid_certs: bool,

    /// Candidates longer than this are discarded
    #[serde(rename = "max-email-length")]
    pub max_email_length: usize,
}

impl ScraperConfig {
    pub fn homepage_timeout(&self) -> Duration {
        Duration::from_secs(self.homepage_timeout_secs)
    }

    pub fn secondary_timeout(&self) -> Duration {
        Duration::from_secs(self.secondary_timeout_secs)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            homepage_timeout_secs: 10,
            secondary_timeout_secs: 12,
            max_concurrent_scrapes: 10,
            accept_invalid_certs: true,
            max_email_length: 50,
        }
    }
}

/// DNS lookup configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Upper bound on one MX lookup (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl DnsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Headers and pooling shared by both HTTP clients
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Idle keep-alive connections kept per host
    #[serde(rename = "pool-max-idle-per-host")]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            pool_max_idle_per_host: 100,
        }
    }
}

/// Public suffix list source
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DomainsConfig {
    /// Path to a full public_suffix_list.dat; the embedded list is used when unset
    #[serde(rename = "suffix-list-path")]
    pub suffix_list_path: Option<String>,
}

/// Input table configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header of the column holding company names
    #[serde(rename = "name-column")]
    pub name_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            name_column: "Company Name".to_string(),
        }
    }
}

/// Output table configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Header of the appended website column
    #[serde(rename = "website-column")]
    pub website_column: String,

    /// Header of the appended email column
    #[serde(rename = "email-column")]
    pub email_column: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            website_column: "Website".to_string(),
            email_column: "Email".to_string(),
        }
    }
}
