use crate::config::DnsConfig;
use crate::url::email_domain;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;

/// Answers whether an email's domain can receive mail
#[async_trait]
pub trait MxCheck: Send + Sync {
    /// Returns true if the domain after the `@` has at least one MX record
    ///
    /// Never fails: lookup errors and timeouts read as `false`.
    async fn has_mx(&self, email: &str) -> bool;
}

/// [`MxCheck`] backed by an async system resolver
pub struct MxValidator {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl MxValidator {
    /// Creates a validator using the system resolver configuration
    ///
    /// Falls back to the library's default upstreams when the system configuration
    /// cannot be read or names no servers, so construction always succeeds.
    pub fn new(config: &DnsConfig) -> Self {
        let timeout = config.timeout();

        let (mut resolver_config, mut opts) = match read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!("Cannot read system DNS config ({}), using defaults", e);
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        if resolver_config.name_servers().is_empty() {
            tracing::warn!("System DNS config lists no name servers, using defaults");
            resolver_config = ResolverConfig::default();
        }
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            timeout,
        }
    }

    async fn lookup(&self, domain: &str) -> bool {
        match tokio::time::timeout(self.timeout, self.resolver.mx_lookup(domain)).await {
            Ok(Ok(records)) => records.iter().next().is_some(),
            Ok(Err(e)) => {
                tracing::debug!("MX lookup for {} failed: {}", domain, e);
                false
            }
            Err(_) => {
                tracing::debug!("MX lookup for {} timed out", domain);
                false
            }
        }
    }
}

#[async_trait]
impl MxCheck for MxValidator {
    async fn has_mx(&self, email: &str) -> bool {
        let Some(domain) = email_domain(email) else {
            return false;
        };
        // Fully qualified, so search domains are not appended
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        self.lookup(&fqdn).await
    }
}
