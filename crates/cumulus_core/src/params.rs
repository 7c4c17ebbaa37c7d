//! Unique-keyed parameter sequence with idempotent upsert.

use cumulus_client::Parameter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ordered sequence of template parameters with unique keys.
///
/// Mutation goes through `&mut self`; there is no mutate-and-return aliasing.
/// Not safe for concurrent mutation; callers synchronize externally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the value for `key` in place, or append a new entry.
    ///
    /// When the underlying sequence carries duplicate keys (possible only if
    /// it was built from a raw vector), the first occurrence wins.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        for entry in &mut self.entries {
            if entry.key == key {
                debug!("Updated parameter: {} = {}", key, value);
                entry.value = value;
                return;
            }
        }

        debug!("Added new parameter: {} = {}", key, value);
        self.entries.push(Parameter::new(key, value));
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|p| p.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Parameter> {
        self.entries
    }
}

impl From<Vec<Parameter>> for ParameterSet {
    fn from(entries: Vec<Parameter>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, String)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.upsert(key, value);
        }
        set
    }
}

impl IntoIterator for ParameterSet {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
