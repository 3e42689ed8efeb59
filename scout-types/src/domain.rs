use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// A normalized company web domain.
///
/// Construction via [`Domain::parse`] canonicalizes the input: lowercase,
/// scheme/path/port stripped, leading `www.` removed. Two records describing
/// the same company therefore compare equal on their domain regardless of how
/// the source provider formatted the URL. Normalization is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

/// Country-code suffixes that occupy two labels, so the registrable domain
/// spans three labels (e.g. `acme.co.uk`).
const TWO_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.nz", "co.jp",
    "com.br", "co.in", "com.mx", "com.sg", "co.kr", "com.cn", "co.za",
];

impl Domain {
    /// Parse and normalize a raw host or URL into a canonical domain.
    ///
    /// # Errors
    /// Returns [`ScoutError::InvalidArg`] when the input contains no usable
    /// hostname (empty, no dot, or illegal characters).
    pub fn parse(input: &str) -> Result<Self, ScoutError> {
        let mut s = input.trim().to_ascii_lowercase();
        if let Some(idx) = s.find("://") {
            s = s[idx + 3..].to_string();
        }
        if let Some(idx) = s.find(['/', '?', '#']) {
            s.truncate(idx);
        }
        if let Some(idx) = s.rfind(':') {
            if s[idx + 1..].chars().all(|c| c.is_ascii_digit()) {
                s.truncate(idx);
            }
        }
        if let Some(rest) = s.strip_prefix("www.") {
            s = rest.to_string();
        }
        if s.is_empty() || !s.contains('.') {
            return Err(ScoutError::invalid_arg(format!(
                "'{input}' is not a valid domain"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(ScoutError::invalid_arg(format!(
                "'{input}' contains characters not allowed in a hostname"
            )));
        }
        Ok(Self(s))
    }

    /// The normalized domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The registrable (root) domain: `blog.acme.com` -> `acme.com`,
    /// `shop.acme.co.uk` -> `acme.co.uk`.
    ///
    /// Cross-provider de-duplication keys on this value so that subdomain
    /// variants of the same company collapse together.
    #[must_use]
    pub fn root(&self) -> &str {
        let labels: Vec<&str> = self.0.split('.').collect();
        if labels.len() <= 2 {
            return &self.0;
        }
        let last_two = format!("{}.{}", labels[labels.len() - 2], labels[labels.len() - 1]);
        let keep = if TWO_LABEL_SUFFIXES.contains(&last_two.as_str()) && labels.len() >= 3 {
            3
        } else {
            2
        };
        let dropped: usize = labels[..labels.len() - keep]
            .iter()
            .map(|l| l.len() + 1)
            .sum();
        &self.0[dropped..]
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Domain {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
