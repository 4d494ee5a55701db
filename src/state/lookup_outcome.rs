//! Outcome of resolving one company name to a website
//!
//! Every failure of the suggestion stage ends up here instead of in an error, so the
//! batch can always produce one row per input.
use std::fmt;

/// Which matching rule accepted a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// The normalized name appears in the candidate's domain (dots removed)
    Domain,

    /// The normalized name and the candidate's normalized display name contain one another
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A suggestion matched; `url` is `https://<domain>`
    Matched { url: String, rule: MatchRule },

    /// Suggestions were returned but none matched
    NoMatch,

    /// The name normalized to an empty string; no request was made
    EmptyName,

    /// The API could not be used (transport error, non-200 status, unparseable body)
    Unavailable { reason: String },
}

impl LookupOutcome {
    /// The resolved website, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Matched { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Short label used in logs and batch statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Matched {
                rule: MatchRule::Domain,
                ..
            } => "matched_domain",
            Self::Matched {
                rule: MatchRule::Name,
                ..
            } => "matched_name",
            Self::NoMatch => "no_match",
            Self::EmptyName => "empty_name",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

impl fmt::Display for LookupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched { url, .. } => write!(f, "{} ({})", self.label(), url),
            Self::Unavailable { reason } => write!(f, "{} ({})", self.label(), reason),
            _ => write!(f, "{}", self.label()),
        }
    }
}
