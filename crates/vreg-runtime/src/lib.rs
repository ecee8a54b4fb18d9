#![forbid(unsafe_code)]

//! Editing session for the visual regex builder.
//!
//! Wraps a [`vreg_core::Graph`] with snapshot undo/redo, a subgraph
//! clipboard, match evaluation and file scanning.
//!
//! # Example
//!
//! ```
//! use vreg_core::{Point, TokenKind};
//! use vreg_runtime::EditorSession;
//!
//! # fn main() -> Result<(), vreg_core::GraphError> {
//! let mut session = EditorSession::new();
//! let start = session.add_node(TokenKind::StartAnchor, Point::new(0.0, 0.0))?;
//! let digit = session.add_node(TokenKind::Digit, Point::new(200.0, 0.0))?;
//! session.connect(start, digit);
//! assert_eq!(session.pattern(), r"^\d");
//!
//! session.undo();
//! assert_eq!(session.pattern(), "^");
//! # Ok(())
//! # }
//! ```

pub mod clipboard;
pub mod config;
pub mod eval;
pub mod scan;
pub mod session;
pub mod undo;

pub use clipboard::{ClipboardBuffer, MemoryClipboard, SystemClipboard};
pub use config::{ConfigError, SessionConfig};
pub use eval::{DebugCursor, DebugGroup, DebugMatch, EvalError, HighlightSpan, MatchSet, SpanKind};
pub use scan::{FileReport, ScanReport, Scanner, SkipReason, SkippedFile};
pub use session::EditorSession;
pub use undo::{SnapshotConfig, SnapshotStore};
