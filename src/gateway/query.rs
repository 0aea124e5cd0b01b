// src/gateway/query.rs
// Insertion-ordered query parameter set with unique keys.

use url::form_urlencoded;

/// An ordered-by-first-occurrence mapping from parameter name to value.
///
/// Wire-format query strings may repeat a key; this set keeps at most one
/// value per key, last value wins, while the position of the first
/// occurrence is retained. Serialization is therefore deterministic for a
/// given parse/insert history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    pairs: Vec<(String, String)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse the raw query component of a URI. Percent-decoding follows
    /// standard application/x-www-form-urlencoded rules. Parsing is
    /// best-effort and never fails: pairs that do not decode simply do not
    /// appear, and pairs with an empty key are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            if key.is_empty() {
                continue;
            }
            map.insert(&key, &value);
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`. An existing entry is replaced in place so the
    /// key keeps its original position; a new key is appended.
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize back to a query string, percent-encoding every key and
    /// value. An empty set serializes to an empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}
