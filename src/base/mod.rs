//! Foundation types for treetext.
//!
//! This module provides the source-coordinate primitives used everywhere
//! else in the crate:
//! - [`Position`], [`Span`] - line/column positions for tree nodes
//! - [`LineIndex`] - line/column to byte-offset conversion
//!
//! This module has NO dependencies on other treetext modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
