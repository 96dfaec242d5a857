//! Captured path variables and lookup results.

use std::collections::HashMap;

use serde::Serialize;

use crate::split::encode_component;

/// Path variables captured during a lookup.
///
/// Keys are the variable names as bound by the template, including the
/// modifier prefix for optional (`"/p"`) and rest (`"+p"`) variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams {
    params: HashMap<String, String>,
}

impl PathParams {
    /// Creates new empty path params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Appends a segment to a rest capture, re-encoding it and joining it
    /// to any earlier value with `/`.
    pub(crate) fn append(&mut self, key: &str, segment: &str) {
        let encoded = encode_component(segment);
        match self.params.get_mut(key) {
            Some(value) => {
                value.push('/');
                value.push_str(&encoded);
            }
            None => {
                self.params.insert(key.to_string(), encoded.into_owned());
            }
        }
    }

    /// Gets a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a parameter as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns the number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` when nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the params, returning the underlying map.
    #[must_use]
    pub fn into_inner(self) -> HashMap<String, String> {
        self.params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A successful lookup: the payload of the matching template, the template
/// itself, and the variables captured from the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMatch<'a, T> {
    /// Captured path variables.
    pub params: PathParams,
    /// Payload registered for the template.
    pub value: &'a T,
    /// The template that matched.
    pub pattern: &'a str,
}

impl<T> PathMatch<'_, T> {
    /// Get a parameter value by name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}
