#![forbid(unsafe_code)]

//! `.vreg` project format.
//!
//! A whitespace-separated text encoding with length-prefixed strings:
//!
//! ```text
//! VREG_PROJECT_V1
//! <node count>
//! <id> <type ordinal> <x> <y> <r> <g> <b> <a> <len>:<label> <len>:<fragment>
//! ...
//! <connection count>
//! <from id> <to id>
//! ...
//! <next id>
//! ```
//!
//! `<len>` is the UTF-8 byte length of the string that follows the colon,
//! so labels and fragments may contain spaces and newlines. The header is
//! compared exactly; there is no other versioning and no checksum.
//!
//! Node geometry other than the position is fixed and therefore not stored.
//! The transient `selected` / `editing` flags are not stored either and come
//! back cleared.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::Point;
use crate::graph::{Connection, Graph, Node, NodeId};
use crate::token::{Rgba, TokenKind};

/// Header line of every project file.
pub const PROJECT_HEADER: &str = "VREG_PROJECT_V1";
/// Conventional file extension, without the dot.
pub const PROJECT_EXTENSION: &str = "vreg";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("invalid project format: {message}")]
    InvalidFormat { message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProjectError {
    fn format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// Encode a graph.
#[must_use]
pub fn serialize(graph: &Graph) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{PROJECT_HEADER}");
    let _ = writeln!(out, "{}", graph.nodes.len());
    for node in &graph.nodes {
        let Rgba { r, g, b, a } = node.color;
        let _ = writeln!(
            out,
            "{} {} {} {} {r} {g} {b} {a} {}:{} {}:{}",
            node.id.0,
            node.kind.ordinal(),
            node.position.x,
            node.position.y,
            node.label.len(),
            node.label,
            node.fragment.len(),
            node.fragment,
        );
    }
    let _ = writeln!(out, "{}", graph.connections.len());
    for conn in &graph.connections {
        let _ = writeln!(out, "{} {}", conn.from.0, conn.to.0);
    }
    let _ = writeln!(out, "{}", graph.next_id);
    out
}

/// Decode a graph from raw bytes.
pub fn deserialize(bytes: &[u8]) -> Result<Graph> {
    let text =
        std::str::from_utf8(bytes).map_err(|e| ProjectError::format(format!("not UTF-8: {e}")))?;
    let mut reader = Reader::new(text);

    let header = reader.token("header")?;
    if header != PROJECT_HEADER {
        return Err(ProjectError::format(format!(
            "expected header {PROJECT_HEADER:?}, found {header:?}"
        )));
    }

    let node_count: usize = reader.parse("node count")?;
    let mut nodes = Vec::with_capacity(node_count.min(4096));
    let mut seen = HashSet::new();
    for index in 0..node_count {
        let node = read_node(&mut reader)
            .map_err(|e| ProjectError::format(format!("node {index}: {e}")))?;
        if !seen.insert(node.id) {
            return Err(ProjectError::format(format!("duplicate node id {}", node.id.0)));
        }
        nodes.push(node);
    }

    let conn_count: usize = reader.parse("connection count")?;
    let mut connections = Vec::with_capacity(conn_count.min(4096));
    for _ in 0..conn_count {
        let from = NodeId(reader.parse("connection source")?);
        let to = NodeId(reader.parse("connection target")?);
        connections.push(Connection::new(from, to));
    }

    let mut next_id: u32 = reader.parse("next id")?;
    let max_id = nodes.iter().map(|n| n.id.0).max();
    if let Some(max) = max_id.filter(|max| next_id <= *max) {
        tracing::warn!(next_id, max, "next id behind stored ids; advancing");
        next_id = max
            .checked_add(1)
            .ok_or_else(|| ProjectError::format(format!("node id {max} leaves no room for new ids")))?;
    }
    if next_id == u32::MAX {
        return Err(ProjectError::format("next id leaves no room for new ids"));
    }

    Ok(Graph {
        nodes,
        connections,
        next_id,
    })
}

fn read_node(reader: &mut Reader<'_>) -> Result<Node> {
    let id = NodeId(reader.parse("id")?);
    let ordinal: u8 = reader.parse("type")?;
    let kind = TokenKind::from_ordinal(ordinal)
        .ok_or_else(|| ProjectError::format(format!("unknown type ordinal {ordinal}")))?;
    let x: f32 = reader.parse("x")?;
    let y: f32 = reader.parse("y")?;
    let color = Rgba::new(
        reader.parse("red")?,
        reader.parse("green")?,
        reader.parse("blue")?,
        reader.parse("alpha")?,
    );
    let label = reader.prefixed("label")?.to_owned();
    let fragment = reader.prefixed("fragment")?.to_owned();
    Ok(Node {
        id,
        kind,
        fragment,
        label,
        position: Point::new(x, y),
        color,
        selected: false,
        editing: false,
    })
}

/// Write a graph to `path`.
pub fn save(graph: &Graph, path: &Path) -> Result<()> {
    std::fs::write(path, serialize(graph))?;
    tracing::info!(path = %path.display(), nodes = graph.nodes.len(), "project saved");
    Ok(())
}

/// Read a graph from `path`.
pub fn load(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(ProjectError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path)?;
    let graph = deserialize(&bytes)?;
    tracing::info!(path = %path.display(), nodes = graph.nodes.len(), "project loaded");
    Ok(graph)
}

/// Cursor over the encoded text.
struct Reader<'a> {
    rest: &'a str,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn token(&mut self, what: &str) -> Result<&'a str> {
        self.skip_whitespace();
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(ProjectError::format(format!("unexpected end of input reading {what}")));
        }
        let (tok, rest) = self.rest.split_at(end);
        self.rest = rest;
        Ok(tok)
    }

    fn parse<T: std::str::FromStr>(&mut self, what: &str) -> Result<T> {
        let tok = self.token(what)?;
        tok.parse()
            .map_err(|_| ProjectError::format(format!("bad {what}: {tok:?}")))
    }

    fn prefixed(&mut self, what: &str) -> Result<&'a str> {
        self.skip_whitespace();
        let colon = self
            .rest
            .find(':')
            .ok_or_else(|| ProjectError::format(format!("missing length prefix for {what}")))?;
        let len: usize = self.rest[..colon]
            .parse()
            .map_err(|_| ProjectError::format(format!("bad length prefix for {what}")))?;
        let body = &self.rest[colon + 1..];
        let value = body
            .get(..len)
            .ok_or_else(|| ProjectError::format(format!("{what} truncated")))?;
        self.rest = &body[len..];
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut g = Graph::new();
        let s = g.add_node(TokenKind::StartAnchor, Point::new(10.0, 20.5)).unwrap();
        let c = g.add_node(TokenKind::CustomText, Point::new(-30.25, 7.0)).unwrap();
        let p = g.add_node(TokenKind::OneOrMore, Point::new(400.0, 0.0)).unwrap();
        if let Some(node) = g.node_mut(c) {
            node.fragment = "a b:\nc".to_owned();
            node.label = node.fragment.clone();
        }
        g.connect(s, c);
        g.connect(c, p);
        g
    }

    #[test]
    fn round_trip_preserves_graph() {
        let g = sample();
        let back = deserialize(serialize(&g).as_bytes()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn transient_flags_are_reset() {
        let mut g = sample();
        g.nodes[0].selected = true;
        g.nodes[1].editing = true;
        let back = deserialize(serialize(&g).as_bytes()).unwrap();
        assert!(back.nodes.iter().all(|n| !n.selected && !n.editing));
    }

    #[test]
    fn header_mismatch_is_invalid_format() {
        let text = serialize(&sample()).replacen(PROJECT_HEADER, "VREG_PROJECT_V0", 1);
        let err = deserialize(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidFormat { .. }));
    }

    #[test]
    fn truncated_input_is_invalid_format() {
        let text = serialize(&sample());
        let cut = &text[..text.len() / 2];
        assert!(matches!(
            deserialize(cut.as_bytes()),
            Err(ProjectError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn unknown_type_ordinal_is_rejected() {
        let text = format!("{PROJECT_HEADER}\n1\n0 99 0 0 0 0 0 0 1:x 1:x\n0\n1\n");
        let err = deserialize(text.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown type ordinal"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let text = format!("{PROJECT_HEADER}\n2\n0 3 0 0 0 0 0 0 1:x 1:x\n0 3 0 0 0 0 0 0 1:x 1:x\n0\n1\n");
        assert!(matches!(
            deserialize(text.as_bytes()),
            Err(ProjectError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn stale_next_id_is_advanced() {
        let text = format!("{PROJECT_HEADER}\n1\n5 3 0 0 0 0 0 0 1:x 1:x\n0\n2\n");
        let g = deserialize(text.as_bytes()).unwrap();
        assert_eq!(g.next_id, 6);
    }

    #[test]
    fn exhausted_id_space_is_invalid_format() {
        let at_max = format!("{PROJECT_HEADER}\n1\n4294967295 3 0 0 0 0 0 0 2:\\d 2:\\d\n0\n4294967295\n");
        let err = deserialize(at_max.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no room"), "{err}");

        let below_max = format!("{PROJECT_HEADER}\n1\n4294967294 3 0 0 0 0 0 0 2:\\d 2:\\d\n0\n1\n");
        assert!(matches!(
            deserialize(below_max.as_bytes()),
            Err(ProjectError::InvalidFormat { .. })
        ));

        let next_at_max = format!("{PROJECT_HEADER}\n0\n0\n4294967295\n");
        assert!(matches!(
            deserialize(next_at_max.as_bytes()),
            Err(ProjectError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn highest_usable_next_id_loads() {
        let text = format!("{PROJECT_HEADER}\n1\n4294967293 3 0 0 0 0 0 0 1:x 1:x\n0\n1\n");
        let mut g = deserialize(text.as_bytes()).unwrap();
        assert_eq!(g.next_id, u32::MAX - 1);
        assert_eq!(g.add_node(TokenKind::Digit, Point::ZERO).unwrap(), NodeId(u32::MAX - 1));
        assert!(g.add_node(TokenKind::Digit, Point::ZERO).is_err());
    }

    #[test]
    fn empty_graph_round_trips() {
        let g = Graph::new();
        assert_eq!(deserialize(serialize(&g).as_bytes()).unwrap(), g);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.vreg")).unwrap_err();
        assert!(matches!(err, ProjectError::FileNotFound { .. }));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.vreg");
        let g = sample();
        save(&g, &path).unwrap();
        assert_eq!(load(&path).unwrap(), g);
    }
}
