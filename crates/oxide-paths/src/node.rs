//! Trie nodes and single-step child resolution.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`], which lets
//! a rest node name itself as its own rest child.

use std::collections::HashMap;

use crate::params::PathParams;
use crate::pattern::{Modifier, Segment, Variable};

/// Index of a node in the [`Trie`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The entry point of every trie.
pub(crate) const ROOT: NodeId = NodeId(0);

/// One position in the matching tree.
#[derive(Debug, Default)]
pub(crate) struct Node {
    /// Index of the template entry terminating here.
    pub entry: Option<usize>,
    /// Variable bound when this node is entered.
    pub param_name: Option<String>,
    literal_children: HashMap<String, NodeId>,
    wildcard_child: Option<NodeId>,
    rest_child: Option<NodeId>,
}

/// What a child is resolved against.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step<'a> {
    /// A decoded request segment; literal, then wildcard, then rest.
    Query(&'a str),
    /// A template segment while building; only an identical slot matches.
    Probe(&'a Segment),
}

/// Arena of nodes rooted at [`ROOT`].
#[derive(Debug)]
pub(crate) struct Trie {
    nodes: Vec<Node>,
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Allocates a detached node.
    pub fn push(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        NodeId(self.nodes.len() - 1)
    }

    /// Registers `child` in the slot of `parent` that `segment` selects,
    /// binding the segment's variable on the child.
    pub fn set_child(&mut self, parent: NodeId, segment: &Segment, child: NodeId) {
        match segment {
            Segment::Literal(text) => {
                self.node_mut(parent)
                    .literal_children
                    .insert(text.clone(), child);
            }
            Segment::Variable(var) => {
                self.node_mut(child).param_name = Some(var.key());
                let node = self.node_mut(parent);
                match var {
                    Variable {
                        modifier: Modifier::Rest,
                        ..
                    } => node.rest_child = Some(child),
                    Variable {
                        constraint: Some(constraint),
                        ..
                    } => {
                        node.literal_children.insert(constraint.clone(), child);
                    }
                    _ => node.wildcard_child = Some(child),
                }
            }
        }
    }

    /// Returns whatever currently fills the slot `segment` would occupy.
    pub fn occupant(&self, parent: NodeId, segment: &Segment) -> Option<NodeId> {
        let node = self.node(parent);
        match segment {
            Segment::Literal(text) => node.literal_children.get(text).copied(),
            Segment::Variable(var) => match var {
                Variable {
                    modifier: Modifier::Rest,
                    ..
                } => node.rest_child,
                Variable {
                    constraint: Some(constraint),
                    ..
                } => node.literal_children.get(constraint).copied(),
                _ => node.wildcard_child,
            },
        }
    }

    /// Resolves one step from `parent`.
    ///
    /// Queries never backtrack: a literal child wins over the wildcard
    /// child, which wins over the rest child. Captured variables are written
    /// to `params`; empty segments are matched but never captured.
    ///
    /// Probes are exact: a literal or constrained segment finds the literal
    /// child with that text, a variable finds the wildcard or rest child only
    /// when it binds the same name.
    pub fn child(&self, parent: NodeId, step: Step<'_>, params: &mut PathParams) -> Option<NodeId> {
        let node = self.node(parent);
        match step {
            Step::Query(segment) => {
                if let Some(&id) = node.literal_children.get(segment) {
                    self.capture(id, segment, params);
                    return Some(id);
                }
                if let Some(id) = node.wildcard_child {
                    self.capture(id, segment, params);
                    return Some(id);
                }
                let id = node.rest_child?;
                if !segment.is_empty() {
                    if let Some(name) = &self.node(id).param_name {
                        params.append(name, segment);
                    }
                }
                Some(id)
            }
            Step::Probe(segment) => match segment {
                Segment::Literal(text) => node.literal_children.get(text).copied(),
                Segment::Variable(Variable {
                    modifier,
                    constraint: Some(constraint),
                    ..
                }) if *modifier != Modifier::Rest => {
                    node.literal_children.get(constraint).copied()
                }
                Segment::Variable(var) => {
                    let slot = if var.modifier == Modifier::Rest {
                        node.rest_child
                    } else {
                        node.wildcard_child
                    };
                    slot.filter(|&id| {
                        self.node(id).param_name.as_deref() == Some(var.key().as_str())
                    })
                }
            },
        }
    }

    fn capture(&self, id: NodeId, segment: &str, params: &mut PathParams) {
        if segment.is_empty() {
            return;
        }
        if let Some(name) = &self.node(id).param_name {
            params.insert(name.as_str(), segment);
        }
    }
}
