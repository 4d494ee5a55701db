//! Outcome of scraping one website for a contact email
//!
//! The scraper is a small state machine with these terminal states. Only `Verified`
//! carries an email into the output record; the others explain why it is blank.
use std::fmt;

/// Page on which the verified email was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailSource {
    Homepage,
    SecondaryPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    // ===== Success =====
    /// A candidate survived filtering and its domain has MX records
    Verified { email: String, source: EmailSource },

    // ===== No network activity =====
    /// No website was resolved for this record
    NoWebsite,

    // ===== Terminal misses =====
    /// The homepage could not be fetched
    Unreachable { error: String },

    /// The homepage had no candidates and no contact-like link
    NoSecondaryLink,

    /// Neither page yielded a candidate (includes a failed secondary fetch)
    NoCandidates,

    /// The first candidate's domain has no MX records
    BadMx { email: String },
}

impl ScrapeOutcome {
    /// The verified email, if any
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Verified { email, .. } => Some(email),
            _ => None,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Returns true if at least one page was requested
    pub fn touched_network(&self) -> bool {
        !matches!(self, Self::NoWebsite)
    }

    /// Short label used in logs and batch statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "verified",
            Self::NoWebsite => "no_website",
            Self::Unreachable { .. } => "unreachable",
            Self::NoSecondaryLink => "no_secondary_link",
            Self::NoCandidates => "no_candidates",
            Self::BadMx { .. } => "bad_mx",
        }
    }
}

impl fmt::Display for ScrapeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified { email, .. } | Self::BadMx { email } => {
                write!(f, "{} ({})", self.label(), email)
            }
            Self::Unreachable { error } => write!(f, "{} ({})", self.label(), error),
            _ => write!(f, "{}", self.label()),
        }
    }
}
