//! # treetext
//!
//! Mutable syntax trees with lossless, lexical-preserving printing.
//!
//! A parser (not part of this crate) produces a positioned tree; the
//! [`printer::LexicalPreservingPrinter`] derives a per-node text recipe
//! from the original source, keeps the recipes consistent while the tree
//! is edited through the mutation entry points, and prints any node back
//! to text. Regions untouched by an edit come back byte-for-byte.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! printer   → NodeText recipes, insertion policies, lexical-preserving printing
//!   ↓
//! tree      → arena storage, node kinds, ownership, mutation + observation
//!   ↓
//! base      → Position, Span, LineIndex (line/column ↔ byte offsets)
//! ```

/// Foundation types: Position, Span, LineIndex
pub mod base;

/// Error taxonomy for registration and edit propagation
pub mod error;

/// Mutable syntax tree: arena, ownership, observation protocol
pub mod tree;

/// Lexical-preserving printer: NodeText recipes and insertion policies
pub mod printer;

// Re-export foundation types
pub use base::{LineIndex, Position, Span};
pub use error::EditError;
pub use printer::{
    Anchor, InsertionPolicyTable, InsertionRule, LexicalPreservingPrinter, NodeText, TextElement,
};
pub use tree::{
    ListChange, ListField, NodeId, NodeKind, Parent, Property, PropertyValue, RegistrationMode,
    Role, Tree, TreeObserver,
};
