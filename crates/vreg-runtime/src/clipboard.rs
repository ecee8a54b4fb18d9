#![forbid(unsafe_code)]

//! Subgraph clipboard and the system text clipboard seam.

use std::collections::HashMap;

use vreg_core::{Connection, Graph, GraphError, Node, NodeId, Point};

/// Detached copy of a selected subgraph.
///
/// Holds the selected nodes and the connections whose endpoints are both
/// selected. Ids are the originals; [`ClipboardBuffer::paste_into`] remaps
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipboardBuffer {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl ClipboardBuffer {
    /// Capture the current selection of `graph`.
    #[must_use]
    pub fn capture(graph: &Graph) -> Self {
        let nodes: Vec<Node> = graph.selected().cloned().collect();
        let inside = |id: NodeId| nodes.iter().any(|n| n.id == id);
        let connections = graph
            .connections
            .iter()
            .filter(|c| inside(c.from) && inside(c.to))
            .copied()
            .collect();
        Self { nodes, connections }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mean of the stored node positions.
    #[must_use]
    pub fn centroid(&self) -> Point {
        if self.nodes.is_empty() {
            return Point::ZERO;
        }
        let n = self.nodes.len() as f32;
        let sum = self
            .nodes
            .iter()
            .fold(Point::ZERO, |acc, node| acc + node.position);
        Point::new(sum.x / n, sum.y / n)
    }

    /// Clone the buffer into `graph` with fresh ids, centred on `at`.
    ///
    /// Pasted nodes come out selected with editing cleared. Returns the new
    /// ids in clipboard order. Fails without touching `graph` when the id
    /// space cannot hold every buffered node.
    pub fn paste_into(&self, graph: &mut Graph, at: Point) -> Result<Vec<NodeId>, GraphError> {
        graph.ensure_room_for(self.nodes.len())?;
        let centroid = self.centroid();
        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(self.nodes.len());
        let mut pasted = Vec::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let id = graph.allocate_id()?;
            remap.insert(node.id, id);
            graph.nodes.push(Node {
                id,
                position: at + (node.position - centroid),
                selected: true,
                editing: false,
                ..node.clone()
            });
            pasted.push(id);
        }

        graph.connections.extend(self.connections.iter().filter_map(|c| {
            Some(Connection::new(*remap.get(&c.from)?, *remap.get(&c.to)?))
        }));
        Ok(pasted)
    }
}

/// Text clipboard provided by the host platform.
pub trait SystemClipboard {
    fn set_text(&mut self, text: &str);
    fn get_text(&self) -> Option<String>;
}

/// Process-local clipboard, used when no platform clipboard is wired in.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl SystemClipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }

    fn get_text(&self) -> Option<String> {
        self.text.clone()
    }
}
