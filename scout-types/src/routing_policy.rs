use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::connector::ConnectorKey;

/// Per-capability engine preference order.
///
/// A policy is advice, not a filter: engines absent from a capability's list
/// are still eligible, ranked after every listed engine in registration
/// order. Health and budget always take precedence over policy order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    /// Preference lists per capability. Earlier means preferred.
    pub preferences: BTreeMap<Capability, Vec<ConnectorKey>>,
}

impl RoutingPolicy {
    /// Empty policy: registration order everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preference list for a capability, replacing any previous list.
    #[must_use]
    pub fn prefer<I, K>(mut self, capability: Capability, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ConnectorKey>,
    {
        self.preferences
            .insert(capability, keys.into_iter().map(Into::into).collect());
        self
    }

    /// The rank of `engine` for `capability`: `Some(0)` is most preferred,
    /// `None` means the engine is unlisted.
    #[must_use]
    pub fn rank(&self, capability: Capability, engine: &str) -> Option<usize> {
        self.preferences
            .get(&capability)?
            .iter()
            .position(|k| k == engine)
    }

    /// Drop keys that do not name any registered engine, returning the
    /// removed keys so callers can surface them.
    pub fn retain_known(&mut self, known: &[&str]) -> Vec<ConnectorKey> {
        let mut dropped = Vec::new();
        for keys in self.preferences.values_mut() {
            keys.retain(|k| {
                let keep = known.contains(&k.as_str());
                if !keep {
                    dropped.push(k.clone());
                }
                keep
            });
        }
        dropped
    }
}
