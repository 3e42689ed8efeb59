use serde::{Deserialize, Serialize};

/// Stable identifier for a registered engine connector.
///
/// Routing policies reference engines by key rather than by object identity,
/// so a policy can be serialized, stored, and applied to a freshly built
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorKey(String);

impl ConnectorKey {
    /// Create a key from an engine name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectorKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConnectorKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ConnectorKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConnectorKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
