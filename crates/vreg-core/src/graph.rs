#![forbid(unsafe_code)]

//! Node/connection model.
//!
//! A [`Graph`] is a flat, insertion-ordered list of nodes plus a list of
//! directed connections between node ids. Insertion order is meaningful: the
//! linearizer resolves its start node by scanning `nodes` front to back, and
//! hit testing treats later nodes as drawn on top.
//!
//! # Connection contract
//!
//! [`Graph::connect`] keeps at most one outgoing connection per source by
//! replacing any prior edge from the same node. Nothing else is validated:
//! self-loops, several incoming edges into one target, and dangling ids
//! pushed directly into `connections` are all representable. Consumers
//! (notably the linearizer) must tolerate them.

use thiserror::Error;

use crate::geometry::{Point, Rect};
use crate::token::{Rgba, TokenKind};

/// Fixed node width in canvas units.
pub const NODE_WIDTH: f32 = 140.0;
/// Fixed node height in canvas units.
pub const NODE_HEIGHT: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node ids exhausted: next id {next_id}, {requested} requested")]
    IdsExhausted { next_id: u32, requested: usize },
}

/// Session-unique node identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed token instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: TokenKind,
    /// Regex sub-string this node contributes.
    pub fragment: String,
    /// Display title; mirrors `fragment` for custom-text nodes.
    pub label: String,
    /// Top-left corner in canvas space.
    pub position: Point,
    pub color: Rgba,
    pub selected: bool,
    pub editing: bool,
}

impl Node {
    /// Build a node of `kind` with the kind's default fields.
    #[must_use]
    pub fn new(id: NodeId, kind: TokenKind, position: Point) -> Self {
        let desc = kind.descriptor();
        Self {
            id,
            kind,
            fragment: desc.fragment.to_owned(),
            label: desc.label.to_owned(),
            position,
            color: desc.category.rgba(),
            selected: false,
            editing: false,
        }
    }

    /// Canvas-space bounds.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, NODE_WIDTH, NODE_HEIGHT)
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    #[inline]
    pub const fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    #[inline]
    #[must_use]
    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }
}

/// The complete editable document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    /// Next id handed out by [`Graph::add_node`].
    pub next_id: u32,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that `count` more ids can be handed out.
    ///
    /// `u32::MAX` is never handed out, so `next_id` always stays
    /// representable.
    pub fn ensure_room_for(&self, count: usize) -> Result<(), GraphError> {
        u32::try_from(count)
            .ok()
            .and_then(|c| self.next_id.checked_add(c))
            .map(|_| ())
            .ok_or(GraphError::IdsExhausted {
                next_id: self.next_id,
                requested: count,
            })
    }

    /// Reserve a fresh id.
    pub fn allocate_id(&mut self) -> Result<NodeId, GraphError> {
        self.ensure_room_for(1)?;
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Ok(id)
    }

    /// Instantiate a node of `kind` at `position` and append it.
    pub fn add_node(&mut self, kind: TokenKind, position: Point) -> Result<NodeId, GraphError> {
        let id = self.allocate_id()?;
        self.nodes.push(Node::new(id, kind, position));
        Ok(id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// First connection (in stored order) leaving `id`.
    #[must_use]
    pub fn outgoing(&self, id: NodeId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.from == id)
    }

    #[must_use]
    pub fn has_incoming(&self, id: NodeId) -> bool {
        self.connections.iter().any(|c| c.to == id)
    }

    /// Replace any existing edge from `from`, then append `from -> to`.
    ///
    /// Endpoints are not checked.
    pub fn connect(&mut self, from: NodeId, to: NodeId) {
        self.connections.retain(|c| c.from != from);
        self.connections.push(Connection::new(from, to));
    }

    /// Remove every node matching `pred` together with every connection
    /// touching a removed node. Returns the number of nodes removed.
    pub fn remove_nodes_where(&mut self, mut pred: impl FnMut(&Node) -> bool) -> usize {
        let removed: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| pred(n))
            .map(|n| n.id)
            .collect();
        if removed.is_empty() {
            return 0;
        }
        self.nodes.retain(|n| !removed.contains(&n.id));
        self.connections
            .retain(|c| !removed.iter().any(|id| c.touches(*id)));
        removed.len()
    }

    /// Topmost node whose bounds contain `point`.
    #[must_use]
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.bounds().contains(point))
            .map(|n| n.id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.selected)
    }

    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selected().count()
    }
}
