#![forbid(unsafe_code)]

//! Undo/redo history for the editing session.
//!
//! The session snapshots the whole [`Graph`](vreg_core::Graph) before each
//! structural edit and swaps snapshots in and out on undo/redo. Selection
//! changes and per-frame drag motion are never recorded on their own.
//!
//! # Module Structure
//!
//! - [`snapshot_store`]: the generic two-stack [`SnapshotStore`]

pub mod snapshot_store;

pub use snapshot_store::{DEFAULT_MAX_DEPTH, SnapshotConfig, SnapshotStore};
