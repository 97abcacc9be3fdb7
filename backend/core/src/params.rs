//! Named string parameters handed to command handlers.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};

/// Key-ordered bag of request parameters.
///
/// Built from query/form pairs. When a key repeats, the first value is kept,
/// matching what form decoders return for a single-value lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Overlay `self` on top of `base`; values in `self` win on collision.
    pub fn merged_over(&self, base: &Params) -> Params {
        let mut merged = base.clone();
        for (k, v) in &self.0 {
            merged.0.insert(k.clone(), v.clone());
        }
        merged
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        for (k, v) in iter {
            map.entry(k.into()).or_insert_with(|| v.into());
        }
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_wins_for_repeated_keys() {
        let params: Params = [("text", "first"), ("text", "second")].into_iter().collect();
        assert_eq!(params.get("text"), Some("first"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn overlay_wins_on_collision() {
        let base: Params = [("env", "prod"), ("region", "eu")].into_iter().collect();
        let request: Params = [("env", "staging"), ("text", "go")].into_iter().collect();

        let merged = request.merged_over(&base);
        assert_eq!(merged.get("env"), Some("staging"));
        assert_eq!(merged.get("region"), Some("eu"));
        assert_eq!(merged.get("text"), Some("go"));
        // Inputs untouched.
        assert_eq!(base.get("env"), Some("prod"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let params: Params = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(serde_json::to_string(&params).unwrap(), r#"{"a":"1","b":"2"}"#);
    }
}
