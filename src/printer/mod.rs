//! Lexical-preserving printing.
//!
//! The printer turns "original text + edits" into output: untouched
//! regions come back byte-for-byte, inserted or replaced content is
//! formatted deterministically by the insertion policy table.

mod lexical;
mod node_text;
mod policy;

pub use lexical::LexicalPreservingPrinter;
pub use node_text::{NodeText, TextElement};
pub use policy::{Anchor, InsertionPolicyTable, InsertionRule};
