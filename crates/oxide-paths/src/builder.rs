//! Index construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PathsError, Result};
use crate::node::{NodeId, Step, Trie, ROOT};
use crate::params::PathParams;
use crate::paths::{Entry, Paths};
use crate::pattern::{parse, Segment};

/// What to do when two templates claim the same position in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Fail the build with a diagnostic.
    #[default]
    Reject,
    /// The template that sorts last wins the position.
    Replace,
}

/// Collects templates and builds a [`Paths`] index.
///
/// # Example
///
/// ```
/// use oxide_paths::{ConflictPolicy, Paths};
///
/// let paths = Paths::builder()
///     .insert("/page/{title}", "page")
///     .insert("/page/{title}/html", "html")
///     .on_conflict(ConflictPolicy::Reject)
///     .build()
///     .unwrap();
///
/// let found = paths.lookup("/page/Foo/html").unwrap();
/// assert_eq!(*found.value, "html");
/// assert_eq!(found.params.get("title"), Some("Foo"));
/// ```
#[derive(Debug, Clone)]
pub struct PathsBuilder<T> {
    templates: BTreeMap<String, T>,
    policy: ConflictPolicy,
}

impl<T> Default for PathsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PathsBuilder<T> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            policy: ConflictPolicy::Reject,
        }
    }

    /// Registers a template. A template registered twice keeps the later
    /// payload.
    #[must_use]
    pub fn insert(mut self, template: impl Into<String>, value: T) -> Self {
        self.templates.insert(template.into(), value);
        self
    }

    /// Registers every template of a mapping.
    #[must_use]
    pub fn extend<I, K>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        self.templates
            .extend(templates.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Sets the conflict policy.
    #[must_use]
    pub const fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the index.
    ///
    /// Templates are grafted in sorted order. Each one reuses the deepest
    /// existing prefix of the tree and adds a fresh chain for the rest.
    ///
    /// # Errors
    ///
    /// Fails with [`PathsError::NoPaths`] when no template was registered,
    /// [`PathsError::EmptyPattern`] for a template without segments,
    /// [`PathsError::InvalidEncoding`] for a literal that is not UTF-8, and,
    /// under [`ConflictPolicy::Reject`], with
    /// [`PathsError::ConflictingParameter`] or
    /// [`PathsError::ConflictingValue`] when templates collide.
    pub fn build(self) -> Result<Paths<T>> {
        if self.templates.is_empty() {
            return Err(PathsError::NoPaths);
        }

        let mut grafter = Grafter {
            trie: Trie::new(),
            entries: Vec::with_capacity(self.templates.len()),
            policy: self.policy,
        };
        for (pattern, value) in self.templates {
            grafter.extend(pattern, value)?;
        }

        debug!(
            templates = grafter.entries.len(),
            nodes = grafter.trie.len(),
            "Built path index"
        );
        Ok(Paths::from_parts(grafter.trie, grafter.entries))
    }
}

struct Grafter<T> {
    trie: Trie,
    entries: Vec<Entry<T>>,
    policy: ConflictPolicy,
}

impl<T> Grafter<T> {
    fn extend(&mut self, pattern: String, value: T) -> Result<()> {
        let mut segments = parse(&pattern)?;
        if segments.is_empty() {
            return Err(PathsError::EmptyPattern(pattern));
        }
        // Nothing follows a rest variable.
        if let Some(rest) = segments.iter().position(Segment::is_rest) {
            segments.truncate(rest + 1);
        }

        debug!(pattern = %pattern, segments = segments.len(), "Grafting template");
        let entry = self.entries.len();
        self.entries.push(Entry { pattern, value });

        let mut scratch = PathParams::new();
        let mut node = ROOT;
        for (depth, segment) in segments.iter().enumerate() {
            match self.trie.child(node, Step::Probe(segment), &mut scratch) {
                Some(next) => {
                    self.check_binding(next, segment, entry)?;
                    node = next;
                }
                None => return self.graft(node, &segments[depth..], entry),
            }
        }
        self.bind(node, entry)
    }

    /// Builds a linear chain for `segments` below `parent`.
    fn graft(&mut self, parent: NodeId, segments: &[Segment], entry: usize) -> Result<()> {
        if let Some(first) = segments.first() {
            if let Some(occupant) = self.trie.occupant(parent, first) {
                self.check_binding(occupant, first, entry)?;
            }
        }

        let mut node = parent;
        for segment in segments {
            let child = self.trie.push();
            if segment.is_rest() {
                self.trie.set_child(child, segment, child);
                self.trie.set_child(node, segment, child);
                return self.bind(child, entry);
            }

            self.trie.set_child(node, segment, child);
            if segment.is_optional() {
                // Absent and present both terminate here.
                self.bind(node, entry)?;
                self.bind(child, entry)?;
            }
            node = child;
        }
        self.bind(node, entry)
    }

    /// Checks that an existing node binds the variable `segment` asks for.
    fn check_binding(&self, existing: NodeId, segment: &Segment, entry: usize) -> Result<()> {
        let bound = self.trie.node(existing).param_name.as_deref();
        let wanted = segment.param_key();
        if bound == wanted.as_deref() {
            return Ok(());
        }

        let pattern = &self.entries[entry].pattern;
        let existing = bound.map_or_else(|| slot_text(segment), str::to_string);
        let found = wanted.unwrap_or_else(|| slot_text(segment));
        match self.policy {
            ConflictPolicy::Reject => Err(PathsError::ConflictingParameter {
                pattern: pattern.clone(),
                existing,
                found,
            }),
            ConflictPolicy::Replace => {
                warn!(
                    pattern = %pattern,
                    existing = %existing,
                    found = %found,
                    "Template overrides an existing binding"
                );
                Ok(())
            }
        }
    }

    /// Assigns the payload of `entry` to `id`.
    fn bind(&mut self, id: NodeId, entry: usize) -> Result<()> {
        let node = self.trie.node_mut(id);
        if let Some(existing) = node.entry.filter(|&bound| bound != entry) {
            let pattern = &self.entries[entry].pattern;
            let existing = &self.entries[existing].pattern;
            if self.policy == ConflictPolicy::Reject {
                return Err(PathsError::ConflictingValue {
                    pattern: pattern.clone(),
                    existing: existing.clone(),
                });
            }
            warn!(
                pattern = %pattern,
                existing = %existing,
                "Template replaces the payload of another"
            );
        }
        node.entry = Some(entry);
        Ok(())
    }
}

/// The literal text a segment occupies in its parent, for diagnostics.
fn slot_text(segment: &Segment) -> String {
    match segment {
        Segment::Literal(text) => text.clone(),
        Segment::Variable(var) => var
            .constraint
            .clone()
            .unwrap_or_else(|| segment.to_string()),
    }
}
