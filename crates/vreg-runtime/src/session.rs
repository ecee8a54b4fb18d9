#![forbid(unsafe_code)]

//! The editing session.
//!
//! [`EditorSession`] owns the live [`Graph`], its undo history, the subgraph
//! clipboard and the debugger's match cursor. Every operation runs to
//! completion on the caller's thread.
//!
//! # History discipline
//!
//! Structural edits (anything that changes nodes, connections or the id
//! counter) record a snapshot of the graph *before* changing it, so a
//! following [`undo`](EditorSession::undo) restores the exact pre-edit
//! state. Selection changes and drag motion do not record anything; a drag
//! records once, in [`begin_drag`](EditorSession::begin_drag).
//!
//! Operations that turn out to change nothing (deleting with an empty
//! selection, pasting an empty clipboard) return early without recording.

use std::path::Path;

use tracing::{debug, info, warn};

use vreg_core::linearize::Chain;
use vreg_core::project::{self, ProjectError};
use vreg_core::template::{self, TemplateKind};
use vreg_core::{ExportTarget, Graph, GraphError, Linearizer, NodeId, Point, Rect, TokenKind};

use crate::clipboard::{ClipboardBuffer, SystemClipboard};
use crate::config::SessionConfig;
use crate::eval::{self, DebugCursor, EvalError, MatchSet};
use crate::scan::{ScanReport, Scanner};
use crate::undo::{SnapshotConfig, SnapshotStore};

/// One independent editing session.
#[derive(Debug)]
pub struct EditorSession {
    graph: Graph,
    history: SnapshotStore<Graph>,
    clipboard: ClipboardBuffer,
    debug: DebugCursor,
    linearizer: Linearizer,
    config: SessionConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            graph: Graph::new(),
            history: SnapshotStore::new(SnapshotConfig::new(config.history_depth)),
            clipboard: ClipboardBuffer::default(),
            debug: DebugCursor::default(),
            linearizer: Linearizer::new(config.traversal_limit),
            config,
        }
    }

    /// Start a session on an existing graph with empty history.
    #[must_use]
    pub fn from_graph(graph: Graph, config: SessionConfig) -> Self {
        let mut session = Self::with_config(config);
        session.graph = graph;
        session
    }

    // ====================================================================
    // Read access
    // ====================================================================

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn clipboard(&self) -> &ClipboardBuffer {
        &self.clipboard
    }

    #[must_use]
    pub fn debug_cursor(&self) -> &DebugCursor {
        &self.debug
    }

    pub fn debug_cursor_mut(&mut self) -> &mut DebugCursor {
        &mut self.debug
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Current pattern; empty when there is nothing to linearize.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.linearizer.generate(&self.graph)
    }

    /// Current chain with the visited node ids.
    #[must_use]
    pub fn chain(&self) -> Chain {
        self.linearizer.chain(&self.graph)
    }

    #[must_use]
    pub fn export(&self, target: ExportTarget) -> String {
        vreg_core::export(&self.pattern(), target)
    }

    // ====================================================================
    // History
    // ====================================================================

    /// Record the current graph for undo and clear the redo stack.
    pub fn snapshot(&mut self) {
        self.history.push(self.graph.clone());
    }

    /// Restore the most recent snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.graph.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.graph = std::sync::Arc::unwrap_or_clone(previous);
                debug!(undo_depth = self.history.undo_depth(), "undo");
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone state. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.graph.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.graph = std::sync::Arc::unwrap_or_clone(next);
                debug!(redo_depth = self.history.redo_depth(), "redo");
                true
            }
            None => false,
        }
    }

    // ====================================================================
    // Structural edits
    // ====================================================================

    /// Place a new node of `kind` at `position`.
    ///
    /// Records nothing when the id space is exhausted.
    pub fn add_node(&mut self, kind: TokenKind, position: Point) -> Result<NodeId, GraphError> {
        self.graph.ensure_room_for(1)?;
        self.snapshot();
        let id = self.graph.add_node(kind, position)?;
        debug!(%id, kind = kind.name(), "node added");
        Ok(id)
    }

    /// Remove every selected node and the connections touching them.
    ///
    /// Returns the number of nodes removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.graph.selection_count() == 0 {
            return 0;
        }
        self.snapshot();
        let removed = self.graph.remove_nodes_where(|n| n.selected);
        debug!(removed, "selection deleted");
        removed
    }

    /// Connect `from -> to`, replacing any existing outgoing edge of `from`.
    ///
    /// Endpoints are not validated: self-loops, fan-in and unknown ids are
    /// accepted as given.
    pub fn connect(&mut self, from: NodeId, to: NodeId) {
        self.snapshot();
        self.graph.connect(from, to);
        debug!(%from, %to, "connected");
    }

    /// Replace the fragment (and label) of a custom-text node.
    ///
    /// Returns `false`, recording nothing, when `id` is not a custom-text
    /// node.
    pub fn edit_custom_text(&mut self, id: NodeId, text: &str) -> bool {
        let editable = self
            .graph
            .node(id)
            .is_some_and(|n| n.kind.is_editable());
        if !editable {
            warn!(%id, "refusing to edit a non-custom node");
            return false;
        }
        self.snapshot();
        if let Some(node) = self.graph.node_mut(id) {
            node.fragment = text.to_owned();
            node.label = text.to_owned();
            node.editing = false;
        }
        true
    }

    /// Record the pre-drag state. Call once when a drag starts.
    pub fn begin_drag(&mut self) {
        self.snapshot();
    }

    /// Translate every selected node by `delta`. Records nothing.
    pub fn move_selected(&mut self, delta: Point) {
        for node in self.graph.nodes.iter_mut().filter(|n| n.selected) {
            node.position += delta;
        }
    }

    /// Append a canned chain starting at `anchor`.
    pub fn expand_template(
        &mut self,
        template: TemplateKind,
        anchor: Point,
    ) -> Result<Vec<NodeId>, GraphError> {
        self.graph.ensure_room_for(template.steps().len())?;
        self.snapshot();
        let ids = template::expand_into(&mut self.graph, template, anchor, self.config.template_step)?;
        info!(template = template.name(), nodes = ids.len(), "template expanded");
        Ok(ids)
    }

    // ====================================================================
    // Clipboard
    // ====================================================================

    /// Copy the selected subgraph. Returns the number of nodes copied.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = ClipboardBuffer::capture(&self.graph);
        self.clipboard.nodes.len()
    }

    /// Copy, then delete, the selected subgraph.
    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        self.delete_selected();
        copied
    }

    /// Paste the clipboard centred on `at`; the pasted nodes become the
    /// selection.
    pub fn paste(&mut self, at: Point) -> Result<Vec<NodeId>, GraphError> {
        if self.clipboard.is_empty() {
            return Ok(Vec::new());
        }
        self.graph.ensure_room_for(self.clipboard.nodes.len())?;
        self.snapshot();
        self.clear_selection();
        let ids = self.clipboard.paste_into(&mut self.graph, at)?;
        debug!(nodes = ids.len(), "pasted");
        Ok(ids)
    }

    /// Put the current pattern on the system clipboard. Returns `false` when
    /// the pattern is empty.
    pub fn copy_pattern(&self, clipboard: &mut impl SystemClipboard) -> bool {
        let pattern = self.pattern();
        if pattern.is_empty() {
            return false;
        }
        clipboard.set_text(&pattern);
        true
    }

    // ====================================================================
    // Selection (never recorded)
    // ====================================================================

    /// Select exactly the nodes whose bounds intersect `rect`.
    pub fn select_by_rect(&mut self, rect: Rect) -> usize {
        let mut count = 0;
        for node in &mut self.graph.nodes {
            node.selected = node.bounds().intersects(&rect);
            count += usize::from(node.selected);
        }
        count
    }

    /// Flip the selection flag of `id`. Returns the new state.
    pub fn toggle_select(&mut self, id: NodeId) -> Option<bool> {
        let node = self.graph.node_mut(id)?;
        node.selected = !node.selected;
        Some(node.selected)
    }

    /// Select `id` alone.
    pub fn select_only(&mut self, id: NodeId) {
        for node in &mut self.graph.nodes {
            node.selected = node.id == id;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in &mut self.graph.nodes {
            node.selected = false;
        }
    }

    // ====================================================================
    // Persistence
    // ====================================================================

    /// Replace the graph wholesale and reset history.
    pub fn load(&mut self, graph: Graph) {
        self.graph = graph;
        self.history.clear();
        self.debug = DebugCursor::default();
    }

    /// Load a project file. On failure the session is left untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ProjectError> {
        let graph = project::load(path).inspect_err(|e| warn!(error = %e, "load failed"))?;
        self.load(graph);
        Ok(())
    }

    pub fn save_file(&self, path: &Path) -> Result<(), ProjectError> {
        project::save(&self.graph, path)
    }

    // ====================================================================
    // Evaluation
    // ====================================================================

    /// Evaluate the current pattern against `text`.
    pub fn evaluate(&self, text: &str) -> Result<MatchSet, EvalError> {
        eval::evaluate(&self.pattern(), text)
            .inspect_err(|e| warn!(error = %e, "evaluation failed"))
    }

    /// Recompute the debugger's matches for `text`. On failure the cursor is
    /// emptied and the error returned.
    pub fn refresh_debug(&mut self, text: &str) -> Result<usize, EvalError> {
        match self.evaluate(text) {
            Ok(set) => {
                let count = set.len();
                self.debug = DebugCursor::new(set);
                Ok(count)
            }
            Err(e) => {
                self.debug = DebugCursor::default();
                Err(e)
            }
        }
    }

    /// Scan a file or directory with the current pattern.
    pub fn scan(&self, path: &Path) -> Result<ScanReport, EvalError> {
        let scanner = Scanner::new(&self.pattern())?.with_max_bytes(self.config.max_scan_bytes);
        scanner.scan_path(path)
    }
}
