//! The [`Node`] tree that parsed script files turn into, and the [`NodeArena`]
//! that owns it.
//!
//! Nodes do not point at each other directly; they hold [`NodeId`]s into the
//! arena they were parsed into. Ids are handed out in parse order and never
//! reused, so a parent group always has a lower id than its children.

use std::ops::Index;

use thiserror::Error;

use crate::token::{Loc, Token};

/// Index of a [`Node`] in its [`NodeArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

/// One statement from a script file. Most nodes are a `label = value` or
/// `label = { ... }` pair, but lists produce anonymous nodes with no label or
/// operator at all.
#[derive(Clone, Debug)]
pub struct Node {
    label: Option<Token>,
    operator: Option<Token>,
    payload: NodePayload,
}

#[derive(Clone, Debug)]
pub enum NodePayload {
    /// A single value, for `label = value` nodes and loose list entries.
    Value(Token),
    /// A brace-delimited group, holding the ids of its members.
    Group(Vec<NodeId>),
}

impl Node {
    pub fn label(&self) -> Option<&Token> {
        self.label.as_ref()
    }

    pub fn operator(&self) -> Option<&Token> {
        self.operator.as_ref()
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn value(&self) -> Option<&Token> {
        match &self.payload {
            NodePayload::Value(token) => Some(token),
            NodePayload::Group(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.payload {
            NodePayload::Value(_) => None,
            NodePayload::Group(children) => Some(children),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.payload, NodePayload::Group(_))
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.label.as_ref().is_some_and(|token| token.is(name))
    }

    /// The best location to point at when reporting about this node.
    pub fn loc(&self) -> Option<&Loc> {
        if let Some(label) = &self.label {
            return Some(&label.loc);
        }
        match &self.payload {
            NodePayload::Value(token) => Some(&token.loc),
            NodePayload::Group(_) => None,
        }
    }
}

/// Result of a [`NodeArena::lookup`] by label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Found {
    None,
    One(NodeId),
    Many(Vec<NodeId>),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("`{node}` is a single value but was queried for children")]
    NotAGroup { node: String },
    #[error("required field `{name}` is missing in `{node}`")]
    MissingField { name: String, node: String },
    #[error("duplicate `{name}` values in `{node}`: {values}")]
    DuplicateField { name: String, node: String, values: String },
}

/// Owns every node parsed into it. Queries go through the arena because the
/// nodes only hold ids.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn alloc(
        &mut self,
        label: Option<Token>,
        operator: Option<Token>,
        payload: NodePayload,
    ) -> NodeId {
        self.nodes.push(Node { label, operator, payload });
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id.0].payload = NodePayload::Group(children);
    }

    /// The node allocated right after this one, if any. Useful for the
    /// `color = hsv { ... }` pattern, where the group ends up as the next
    /// node after the `color = hsv` part.
    pub fn following(&self, id: NodeId) -> Option<NodeId> {
        let next = NodeId(id.0 + 1);
        (next.0 < self.nodes.len()).then_some(next)
    }

    /// All children of `id` whose label is `name`.
    pub fn find(&self, id: NodeId, name: &str) -> Result<Vec<NodeId>, QueryError> {
        let Some(children) = self[id].children() else {
            return Err(QueryError::NotAGroup { node: self.name(id) });
        };
        Ok(children.iter().copied().filter(|&child| self[child].has_label(name)).collect())
    }

    /// Like [`NodeArena::find`], but classifies the outcome instead of
    /// leaving the caller to inspect a vector.
    pub fn lookup(&self, id: NodeId, name: &str) -> Result<Found, QueryError> {
        let matches = self.find(id, name)?;
        Ok(match matches.len() {
            0 => Found::None,
            1 => Found::One(matches[0]),
            _ => Found::Many(matches),
        })
    }

    /// Look up a field that must be present exactly once. Both absence and
    /// duplicates are hard errors here.
    pub fn expect_one(&self, id: NodeId, name: &str) -> Result<NodeId, QueryError> {
        match self.lookup(id, name)? {
            Found::None => {
                Err(QueryError::MissingField { name: name.to_string(), node: self.name(id) })
            }
            Found::One(found) => Ok(found),
            Found::Many(found) => {
                let values =
                    found.iter().map(|&f| self.describe(f)).collect::<Vec<_>>().join("; ");
                Err(QueryError::DuplicateField {
                    name: name.to_string(),
                    node: self.name(id),
                    values,
                })
            }
        }
    }

    /// A short name for a node, for error messages. Anonymous nodes are named
    /// after their id.
    pub fn name(&self, id: NodeId) -> String {
        match &self[id].label {
            Some(token) => token.as_str().to_string(),
            None => format!("OBJ{}", id.0),
        }
    }

    /// Render a node back to script form, all on one line. The output parses
    /// back to an equivalent node for trees that came from assignments.
    pub fn describe(&self, id: NodeId) -> String {
        let node = &self[id];
        let mut out = String::new();
        if let Some(label) = &node.label {
            out.push_str(label.as_str());
            if let Some(op) = &node.operator {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            } else {
                out.push_str(" = ");
            }
        }
        match &node.payload {
            NodePayload::Value(token) => out.push_str(token.as_str()),
            NodePayload::Group(children) => {
                out.push_str("{ ");
                for &child in children {
                    out.push_str(&self.describe(child));
                    out.push(' ');
                }
                out.push('}');
            }
        }
        out
    }

    /// Compare two nodes structurally, ignoring ids and locations. The other
    /// node may come from a different arena.
    pub fn equivalent(&self, id: NodeId, other: &NodeArena, other_id: NodeId) -> bool {
        let a = &self[id];
        let b = &other[other_id];
        if a.label != b.label || a.operator != b.operator {
            return false;
        }
        match (&a.payload, &b.payload) {
            (NodePayload::Value(x), NodePayload::Value(y)) => x == y,
            (NodePayload::Group(xs), NodePayload::Group(ys)) => {
                xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(&x, &y)| self.equivalent(x, other, y))
            }
            _ => false,
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    /// Ids are only ever handed out by the arena that owns the nodes, so an
    /// out of range id means the caller mixed up arenas. That panics.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
