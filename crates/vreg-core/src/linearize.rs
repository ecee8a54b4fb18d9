#![forbid(unsafe_code)]

//! Graph → regex linearization.
//!
//! The graph is read as a single chain: resolve a start node, then keep
//! following the first outgoing connection of the current node, appending
//! each visited node's fragment with no separators. Branches that exist in
//! the data are never explored; only one path is ever emitted.
//!
//! Start-node resolution, in order:
//!
//! 1. the first node in stored order whose kind is
//!    [`TokenKind::StartAnchor`];
//! 2. otherwise the first node in stored order with no incoming connection;
//! 3. otherwise nothing (empty graph, or every node has an input).
//!
//! Traversal stops when the current node has no outgoing connection, when a
//! connection points at an id that is not a node, or after `limit` hops. The
//! hop bound is what guarantees termination on cyclic data.

use crate::graph::{Graph, NodeId};
use crate::token::TokenKind;

/// Smallest accepted hop bound.
pub const MIN_TRAVERSAL_LIMIT: usize = 100;
/// Default hop bound.
pub const DEFAULT_TRAVERSAL_LIMIT: usize = 1000;

/// The visited chain and its concatenated pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chain {
    /// Visited node ids in traversal order (may repeat on cyclic data).
    pub nodes: Vec<NodeId>,
    pub pattern: String,
    /// Set when traversal stopped on the hop bound rather than at a chain end.
    pub truncated: bool,
}

/// Bounded chain walker.
#[derive(Debug, Clone, Copy)]
pub struct Linearizer {
    limit: usize,
}

impl Default for Linearizer {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TRAVERSAL_LIMIT,
        }
    }
}

impl Linearizer {
    /// Create a walker with the given hop bound, clamped to at least
    /// [`MIN_TRAVERSAL_LIMIT`].
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(MIN_TRAVERSAL_LIMIT),
        }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Walk the chain from the resolved start node.
    #[must_use]
    pub fn chain(&self, graph: &Graph) -> Chain {
        let mut chain = Chain::default();
        let Some(start) = start_node(graph) else {
            return chain;
        };
        let Some(node) = graph.node(start) else {
            return chain;
        };
        chain.nodes.push(start);
        chain.pattern.push_str(&node.fragment);

        let mut current = start;
        let mut hops = 0;
        while let Some(conn) = graph.outgoing(current) {
            if hops == self.limit {
                chain.truncated = true;
                tracing::warn!(limit = self.limit, "chain traversal hit hop bound");
                break;
            }
            hops += 1;
            let Some(next) = graph.node(conn.to) else {
                break;
            };
            chain.nodes.push(next.id);
            chain.pattern.push_str(&next.fragment);
            current = next.id;
        }
        chain
    }

    /// Concatenated pattern of the chain; empty for an empty graph.
    #[must_use]
    pub fn generate(&self, graph: &Graph) -> String {
        self.chain(graph).pattern
    }
}

/// Resolve the chain's start node.
#[must_use]
pub fn start_node(graph: &Graph) -> Option<NodeId> {
    graph
        .nodes
        .iter()
        .find(|n| n.kind == TokenKind::StartAnchor)
        .or_else(|| graph.nodes.iter().find(|n| !graph.has_incoming(n.id)))
        .map(|n| n.id)
}

/// [`Linearizer::generate`] with the default hop bound.
#[must_use]
pub fn generate(graph: &Graph) -> String {
    Linearizer::default().generate(graph)
}
