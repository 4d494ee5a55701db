//! Company name normalization and suggestion matching

use crate::state::MatchRule;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Legal-entity tokens removed as whole words before matching
static LEGAL_SUFFIXES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(inc|llc|ltd|corp|limited|company|co)\b").unwrap());

/// One entry of the suggestion API response
///
/// Fields the API omits or sends as `null` read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SuggestionCandidate {
    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl SuggestionCandidate {
    pub fn new(domain: &str, name: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            name: Some(name.to_string()),
        }
    }

    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or("").trim()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A suggestion accepted by [`match_candidates`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// The accepted domain, e.g. `acme.io`
    pub domain: String,

    /// Rule that accepted it
    pub rule: MatchRule,
}

impl CandidateMatch {
    /// Website URL for the matched domain
    pub fn url(&self) -> String {
        format!("https://{}", self.domain)
    }
}

/// Normalizes a company name for fuzzy comparison
///
/// Lowercases, removes legal-entity suffix words (`inc`, `llc`, `ltd`, `corp`,
/// `limited`, `company`, `co`) and then drops everything that is not an ASCII
/// lowercase letter or digit.
///
/// # Examples
///
/// ```
/// use company_enricher::suggest::normalize_company_name;
///
/// assert_eq!(normalize_company_name("Acme Corp"), "acme");
/// assert_eq!(normalize_company_name("Smith & Co."), "smith");
/// assert_eq!(normalize_company_name("Coca-Cola Company"), "cocacola");
/// ```
pub fn normalize_company_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = LEGAL_SUFFIXES.replace_all(&lowered, "");
    stripped
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Picks the first suggestion that matches the company name
///
/// Candidates are scanned in order. For each one the domain rule is tried before the
/// name rule, and the first candidate satisfying either wins:
///
/// 1. the normalized name is a substring of the domain with its dots removed
/// 2. the normalized name is a substring of the candidate's normalized name, or the
///    other way round
///
/// An empty normalized name never matches. Candidates without a domain are skipped,
/// and rule 2 ignores candidates whose name normalizes to nothing.
pub fn match_candidates(
    company_name: &str,
    candidates: &[SuggestionCandidate],
) -> Option<CandidateMatch> {
    let query = normalize_company_name(company_name);
    if query.is_empty() {
        return None;
    }

    for candidate in candidates {
        let domain = candidate.domain();
        if domain.is_empty() {
            continue;
        }

        let domain_compact = domain.to_lowercase().replace('.', "");
        if domain_compact.contains(&query) {
            return Some(CandidateMatch {
                domain: domain.to_string(),
                rule: MatchRule::Domain,
            });
        }

        let candidate_name = normalize_company_name(candidate.name());
        if !candidate_name.is_empty()
            && (candidate_name.contains(&query) || query.contains(&candidate_name))
        {
            return Some(CandidateMatch {
                domain: domain.to_string(),
                rule: MatchRule::Name,
            });
        }
    }

    None
}
