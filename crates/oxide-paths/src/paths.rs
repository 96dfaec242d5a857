//! The template index and its lookup engine.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

use crate::builder::PathsBuilder;
use crate::error::{json_kind, PathsError, Result};
use crate::node::{Step, Trie, ROOT};
use crate::params::{PathMatch, PathParams};
use crate::split::split;

/// A registered template and its payload.
#[derive(Debug)]
pub(crate) struct Entry<T> {
    pub pattern: String,
    pub value: T,
}

/// An immutable index of URI templates.
///
/// Lookups walk a prefix tree one path segment at a time, so their cost
/// depends on the length of the path, not on the number of templates.
/// At each step a literal segment is preferred over a `{variable}`, which
/// is preferred over a `{+rest}` capture. There is no backtracking.
///
/// # Example
///
/// ```
/// use oxide_paths::Paths;
///
/// let paths = Paths::new([
///     ("/page/{title}", "page"),
///     ("/page/{title}/html{/revision}", "html"),
///     ("/files/{+path}", "files"),
/// ])
/// .unwrap();
///
/// let found = paths.lookup("/page/Main_Page/html/42").unwrap();
/// assert_eq!(*found.value, "html");
/// assert_eq!(found.params.get("title"), Some("Main_Page"));
/// assert_eq!(found.params.get("/revision"), Some("42"));
///
/// let found = paths.lookup("/files/a/b%2Fc").unwrap();
/// assert_eq!(found.params.get("+path"), Some("a/b%2Fc"));
///
/// assert!(paths.lookup("/page").is_none());
/// ```
pub struct Paths<T> {
    trie: Trie,
    entries: Vec<Entry<T>>,
}

impl<T> Paths<T> {
    /// Builds an index from a mapping of templates to payloads.
    ///
    /// # Errors
    ///
    /// See [`PathsBuilder::build`].
    pub fn new<I, K>(templates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        PathsBuilder::new().extend(templates).build()
    }

    /// Returns a builder for configuring the index.
    #[must_use]
    pub const fn builder() -> PathsBuilder<T> {
        PathsBuilder::new()
    }

    pub(crate) const fn from_parts(trie: Trie, entries: Vec<Entry<T>>) -> Self {
        Self { trie, entries }
    }

    /// Looks up a request path.
    ///
    /// Returns the payload of the matching template with the captured
    /// variables, or `None` when no template matches. A path that only
    /// reaches an intermediate position of the tree does not match.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<PathMatch<'_, T>> {
        let mut segments = split(path);
        if segments.is_empty() {
            // The root template `/` sits behind a single empty segment.
            segments.push(Cow::Borrowed(""));
        }

        let mut params = PathParams::new();
        let mut node = ROOT;
        for segment in &segments {
            // A failed step leaves nothing to report, a trailing empty
            // segment included.
            let Some(next) = self.trie.child(node, Step::Query(segment), &mut params) else {
                trace!(path, "No template matched");
                return None;
            };
            node = next;
        }

        let Some(entry) = self.trie.node(node).entry.map(|id| &self.entries[id]) else {
            trace!(path, "Path ended on an intermediate node");
            return None;
        };
        trace!(path, pattern = %entry.pattern, "Template matched");
        Some(PathMatch {
            params,
            value: &entry.value,
            pattern: &entry.pattern,
        })
    }

    /// Looks up a path given as JSON.
    ///
    /// `null` is a deliberate "no path" and never matches.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::NotAString`] for anything other than a string
    /// or `null`.
    pub fn lookup_value(&self, path: &Value) -> Result<Option<PathMatch<'_, T>>> {
        match path {
            Value::Null => Ok(None),
            Value::String(path) => Ok(self.lookup(path)),
            other => Err(PathsError::NotAString(json_kind(other))),
        }
    }

    /// Returns the registered templates in sorted order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.pattern.as_str())
    }

    /// Returns the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no template is registered. A built index always
    /// holds at least one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.trie.len()
    }
}

impl Paths<Value> {
    /// Builds an index from a JSON object of templates to payloads.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::NotAnObject`] when `templates` is not an
    /// object, and otherwise fails like [`PathsBuilder::build`].
    pub fn from_json(templates: Value) -> Result<Self> {
        match templates {
            Value::Object(map) => Self::new(map),
            Value::Null => Err(PathsError::NoPaths),
            other => Err(PathsError::NotAnObject(json_kind(&other))),
        }
    }
}

impl<T> fmt::Debug for Paths<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paths")
            .field("patterns", &self.patterns().collect::<Vec<_>>())
            .field("nodes", &self.trie.len())
            .finish()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Paths<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let templates = BTreeMap::<String, T>::deserialize(deserializer)?;
        Self::new(templates).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fixture() -> Paths<&'static str> {
        Paths::new([
            ("/x", "fixed"),
            ("/y/{p}", "required"),
            ("/z{/p}", "optional"),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_literal() {
        let paths = fixture();
        let found = paths.lookup("/x").unwrap();
        assert_eq!(*found.value, "fixed");
        assert_eq!(found.pattern, "/x");
        assert!(found.params.is_empty());
    }

    #[test]
    fn test_trailing_slash_on_literal_does_not_match() {
        let paths = fixture();
        assert!(paths.lookup("/x/").is_none());
        assert!(paths.lookup("/x/w").is_none());
    }

    #[test]
    fn test_intermediate_node_does_not_match() {
        assert!(fixture().lookup("/y").is_none());
    }

    #[test]
    fn test_lookup_value_null_and_string() {
        let paths = fixture();
        assert!(paths.lookup_value(&Value::Null).unwrap().is_none());
        let found = paths.lookup_value(&json!("/y/w")).unwrap().unwrap();
        assert_eq!(found.params.get("p"), Some("w"));
    }

    #[test]
    fn test_lookup_value_rejects_non_strings() {
        let paths = fixture();
        assert_eq!(
            paths.lookup_value(&json!(123)).err(),
            Some(PathsError::NotAString("number"))
        );
        assert_eq!(
            paths.lookup_value(&json!(["/x"])).err(),
            Some(PathsError::NotAString("array"))
        );
    }

    #[test]
    fn test_patterns_are_sorted() {
        let paths = Paths::new([("/b", 1), ("/a/{x}", 2), ("/a", 3)]).unwrap();
        assert_eq!(paths.patterns().collect::<Vec<_>>(), ["/a", "/a/{x}", "/b"]);
        assert_eq!(paths.len(), 3);
        assert!(!paths.is_empty());
    }

    #[test]
    fn test_from_json() {
        let paths = Paths::from_json(json!({ "/": { "handler": "root" } })).unwrap();
        let found = paths.lookup("/").unwrap();
        assert_eq!(found.value, &json!({ "handler": "root" }));
    }

    #[test]
    fn test_from_json_rejects_bad_shapes() {
        assert_eq!(
            Paths::from_json(json!("foo")).err(),
            Some(PathsError::NotAnObject("string"))
        );
        assert_eq!(Paths::from_json(Value::Null).err(), Some(PathsError::NoPaths));
        assert_eq!(Paths::from_json(json!({})).err(), Some(PathsError::NoPaths));
        assert_eq!(
            Paths::from_json(json!({ "": "empty" })).err(),
            Some(PathsError::EmptyPattern(String::new()))
        );
    }

    #[test]
    fn test_deserialize() {
        let paths: Paths<u32> = serde_json::from_str(r#"{ "/a/{b}": 7 }"#).unwrap();
        assert_eq!(paths.lookup("/a/c").map(|m| *m.value), Some(7));

        let err = serde_json::from_str::<Paths<u32>>("{}").unwrap_err();
        assert!(err.to_string().contains("constructed without paths"));
    }

    #[test]
    fn test_debug_lists_patterns() {
        let rendered = format!("{:?}", fixture());
        assert!(rendered.contains("/z{/p}"));
    }
}
