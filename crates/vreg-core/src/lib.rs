#![forbid(unsafe_code)]

//! Core data model for the visual regex builder.
//!
//! - [`token`]: the closed set of token kinds and their default fields
//! - [`graph`]: nodes, connections and the [`Graph`] document
//! - [`linearize`]: graph → pattern traversal
//! - [`project`]: the `.vreg` on-disk format
//! - [`template`]: canned node chains
//! - [`export`]: pattern → source snippet formatting

pub mod export;
pub mod geometry;
pub mod graph;
pub mod linearize;
pub mod project;
pub mod template;
pub mod token;

pub use export::{ExportTarget, export};
pub use geometry::{Point, Rect};
pub use graph::{Connection, Graph, GraphError, NODE_HEIGHT, NODE_WIDTH, Node, NodeId};
pub use linearize::{Chain, Linearizer, generate};
pub use project::{ProjectError, deserialize, serialize};
pub use template::{TemplateKind, expand_into};
pub use token::{ColorCategory, Rgba, TOKENS, TokenDescriptor, TokenKind};
