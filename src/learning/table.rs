//! Action-value table keyed by symmetry-resolved state/action keys

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::key::{StateActionKey, canonical_key};
use crate::tictactoe::BoardState;

/// Running estimate stored for one key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    /// Mean return estimate
    pub value: f64,
    /// Number of updates applied
    pub visits: u64,
}

/// Table-access capability used by the policy selector
pub trait ActionValues {
    /// Estimated value of taking `action` in `state`
    fn value(&self, state: &BoardState, action: usize) -> f64;
}

/// Tabular action-value function.
///
/// Entries are created lazily by the update methods and never removed.
/// Reads of unseen keys return the configured default without inserting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionValueTable {
    entries: HashMap<StateActionKey, ValueEntry>,
    default_value: f64,
}

impl ActionValueTable {
    /// Create an empty table
    pub fn new(default_value: f64) -> Self {
        Self {
            entries: HashMap::new(),
            default_value,
        }
    }

    /// Key to use for `(state, action)` given the keys written so far
    pub fn resolve_key(&self, state: &BoardState, action: usize) -> StateActionKey {
        canonical_key(|key| self.entries.contains_key(key), state, action)
    }

    /// Stored value, or the default for unseen keys
    pub fn get(&self, key: &StateActionKey) -> f64 {
        self.entries
            .get(key)
            .map_or(self.default_value, |entry| entry.value)
    }

    /// Whether the key has been written
    pub fn contains(&self, key: &StateActionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of updates recorded for a key
    pub fn visits(&self, key: &StateActionKey) -> u64 {
        self.entries.get(key).map_or(0, |entry| entry.visits)
    }

    /// Fold a sampled return into the incremental mean.
    ///
    /// Q ← Q·n/(n+1) + G/(n+1), n ← n+1
    pub fn record_return(&mut self, key: StateActionKey, sample: f64) -> f64 {
        let entry = self.entries.entry(key).or_insert(ValueEntry {
            value: 0.0,
            visits: 0,
        });
        let n = entry.visits as f64;
        entry.value = entry.value * n / (n + 1.0) + sample / (n + 1.0);
        entry.visits += 1;
        entry.value
    }

    /// Move the estimate a fixed fraction toward a target.
    ///
    /// Q ← Q + α(target − Q), starting from the default for unseen keys
    pub fn nudge_toward(&mut self, key: StateActionKey, target: f64, alpha: f64) -> f64 {
        let default_value = self.default_value;
        let entry = self.entries.entry(key).or_insert(ValueEntry {
            value: default_value,
            visits: 0,
        });
        entry.value += alpha * (target - entry.value);
        entry.visits += 1;
        entry.value
    }

    /// Value returned for unseen keys
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Iterate over written entries
    pub fn iter(&self) -> impl Iterator<Item = (&StateActionKey, &ValueEntry)> {
        self.entries.iter()
    }

    /// Get total number of keys stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been learned yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionValueTable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl ActionValues for ActionValueTable {
    fn value(&self, state: &BoardState, action: usize) -> f64 {
        self.get(&self.resolve_key(state, action))
    }
}
