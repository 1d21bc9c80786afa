//! Error types for text registration and edit propagation.

use thiserror::Error;

use crate::tree::NodeId;

/// Errors raised synchronously at the offending call site.
///
/// A failed operation never partially applies to the printer: the text
/// recipes are left exactly as they were before the call. There is no
/// global recovery channel; callers decide whether to abort, skip, or
/// surface the error upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Text registration on a node whose span is the unknown sentinel.
    #[error("node {node:?} has no known source span")]
    UnknownSpan { node: NodeId },

    /// A node's children overlap or are out of order relative to its span.
    #[error("children of {parent:?} have malformed positions: {detail}")]
    MalformedPositions { parent: NodeId, detail: String },

    /// An edit the printer cannot splice into existing text.
    #[error("unsupported edit: {detail}")]
    UnsupportedEdit { detail: String },
}

impl EditError {
    /// Create a malformed-positions error.
    pub fn malformed(parent: NodeId, detail: impl Into<String>) -> Self {
        Self::MalformedPositions {
            parent,
            detail: detail.into(),
        }
    }

    /// Create an unsupported-edit error.
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedEdit {
            detail: detail.into(),
        }
    }
}
