//! The insertion policy table.
//!
//! Splicing a newly added child into existing text needs per-construct
//! knowledge: positions alone cannot recover where commas and braces
//! belong. Each rule is keyed by the owning node's kind and the list slot
//! being extended, and the whole table is passed into the printer rather
//! than hard-wired into its traversal.

use indexmap::IndexMap;

use crate::tree::{ListField, NodeKind, Property};

/// Where the new child's text is anchored inside the owner's recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Split the first literal containing the marker, right after the
    /// marker, and place the child there.
    AfterLiteral(&'static str),
    /// Place the child after the one in the given single-child slot,
    /// preceded by the separator. An empty slot prepends instead.
    AfterProperty {
        property: Property,
        separator: &'static str,
    },
    /// Place the child after the last pre-existing element of the list,
    /// preceded by the separator.
    AfterLastSibling { separator: &'static str },
}

/// One insertion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionRule {
    pub anchor: Anchor,
    /// Structural marker in the owner's own text used when the list has no
    /// pre-existing element and the anchor needs one (e.g. `"("`).
    pub when_empty: Option<&'static str>,
}

/// Lookup table from (owner kind, list slot) to insertion rule.
#[derive(Debug, Clone, Default)]
pub struct InsertionPolicyTable {
    rules: IndexMap<(NodeKind, ListField), InsertionRule>,
}

impl InsertionPolicyTable {
    /// A table with no rules: every list insertion is rejected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rules for the Java-like construct set.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            NodeKind::ClassDecl,
            ListField::Members,
            InsertionRule {
                anchor: Anchor::AfterLiteral("{"),
                when_empty: None,
            },
        );
        table.insert(
            NodeKind::FieldDecl,
            ListField::Variables,
            InsertionRule {
                anchor: Anchor::AfterProperty {
                    property: Property::ElementType,
                    separator: " ",
                },
                when_empty: None,
            },
        );
        table.insert(
            NodeKind::MethodDecl,
            ListField::Parameters,
            InsertionRule {
                anchor: Anchor::AfterLastSibling { separator: ", " },
                when_empty: Some("("),
            },
        );
        table
    }

    pub fn insert(&mut self, kind: NodeKind, field: ListField, rule: InsertionRule) {
        self.rules.insert((kind, field), rule);
    }

    pub fn rule(&self, kind: NodeKind, field: ListField) -> Option<InsertionRule> {
        self.rules.get(&(kind, field)).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
