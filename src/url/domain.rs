use url::Url;

/// Extracts the host from a URL, lowercased and without a trailing dot
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use company_enricher::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://sub.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_end_matches('.').to_lowercase())
        .filter(|h| !h.is_empty())
}

/// Returns the part of an email address after the first `@`
///
/// Further `@` signs end the domain, so `a@b@c` yields `b`.
///
/// ```
/// use company_enricher::url::email_domain;
///
/// assert_eq!(email_domain("jane@acme.io"), Some("acme.io"));
/// assert_eq!(email_domain("not-an-email"), None);
/// ```
pub fn email_domain(email: &str) -> Option<&str> {
    email.split('@').nth(1).filter(|d| !d.is_empty())
}

/// Returns true if the host is an IPv4 or IPv6 literal
pub(crate) fn is_ip_literal(host: &str) -> bool {
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<std::net::IpAddr>()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port_and_path() {
        let url = Url::parse("https://example.com:8080/path/to/page?query=value").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case_and_trailing_dot() {
        let url = Url::parse("https://Example.COM./").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_ip_host() {
        let url = Url::parse("http://127.0.0.1:3000/").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("jane@acme.io"), Some("acme.io"));
        assert_eq!(email_domain("a@b@c"), Some("b"));
        assert_eq!(email_domain("jane@"), None);
        assert_eq!(email_domain("jane"), None);
    }

    #[test]
    fn test_is_ip_literal() {
        assert!(is_ip_literal("127.0.0.1"));
        assert!(is_ip_literal("[::1]"));
        assert!(!is_ip_literal("acme.io"));
    }
}
