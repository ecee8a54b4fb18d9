#![forbid(unsafe_code)]

//! Snapshot-based undo/redo store.
//!
//! [`SnapshotStore`] keeps whole copies of the document. The caller pushes
//! the *pre-mutation* state before every structural edit; undo hands the
//! live state over and gets the most recent snapshot back, redo does the
//! reverse.
//!
//! # Architecture
//!
//! ```text
//! push(s0); edit → s1; push(s1); edit → s2
//! ┌──────────────────────────────────────────────────┐
//! │ Undo Stack:  [Arc(s0), Arc(s1)]                  │
//! │ Redo Stack:  []                                  │
//! │ Live:        s2                                  │
//! └──────────────────────────────────────────────────┘
//!
//! undo(s2)
//! ┌──────────────────────────────────────────────────┐
//! │ Undo Stack:  [Arc(s0)]                           │
//! │ Redo Stack:  [Arc(s2)]                           │
//! │ Live:        s1                                  │
//! └──────────────────────────────────────────────────┘
//!
//! push(s1); edit → s3   (new branch, clears redo)
//! ┌──────────────────────────────────────────────────┐
//! │ Undo Stack:  [Arc(s0), Arc(s1)]                  │
//! │ Redo Stack:  []                                  │
//! │ Live:        s3                                  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Snapshots are held as [`Arc`]s so the live state handed back by
//! [`undo`](SnapshotStore::undo) is only cloned when the caller needs to own
//! it.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Default undo depth.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Configuration for the snapshot store.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Maximum number of snapshots to retain in the undo stack.
    /// Oldest snapshots are evicted when this limit is exceeded.
    pub max_depth: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SnapshotConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Two-stack undo/redo history of whole-state snapshots.
///
/// # Invariants
///
/// 1. `undo_stack.len() <= config.max_depth` after any operation.
/// 2. The redo stack is cleared on every `push`.
/// 3. `undo` and `redo` on an empty stack leave both stacks untouched.
pub struct SnapshotStore<T> {
    /// Pre-mutation snapshots, most recent at the back.
    undo_stack: VecDeque<Arc<T>>,
    /// States undone away from, most recent at the back.
    redo_stack: Vec<Arc<T>>,
    config: SnapshotConfig,
}

impl<T: fmt::Debug> fmt::Debug for SnapshotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for SnapshotStore<T> {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl<T> SnapshotStore<T> {
    /// Create a new snapshot store with the given configuration.
    #[must_use]
    pub fn new(config: SnapshotConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Create a new snapshot store with default configuration.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(SnapshotConfig::default())
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Record a pre-mutation state, clearing the redo stack (new branch).
    ///
    /// If the undo stack exceeds `max_depth`, the oldest snapshot is evicted.
    pub fn push(&mut self, state: T) {
        self.redo_stack.clear();
        self.undo_stack.push_back(Arc::new(state));
        self.enforce_depth();
    }

    /// Undo: park `current` on the redo stack and return the most recent
    /// snapshot.
    ///
    /// Returns `None`, and drops nothing, when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<Arc<T>> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(Arc::new(current));
        Some(previous)
    }

    /// Redo: park `current` on the undo stack and return the most recently
    /// undone state.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: T) -> Option<Arc<T>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(Arc::new(current));
        self.enforce_depth();
        Some(next)
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Clear all snapshots.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Enforce the depth limit by evicting the oldest snapshots.
    fn enforce_depth(&mut self) {
        while self.undo_stack.len() > self.config.max_depth {
            self.undo_stack.pop_front();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
