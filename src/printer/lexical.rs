//! The lexical-preserving printer.
//!
//! Registration walks a positioned tree once, deriving a [`NodeText`]
//! recipe per node from the original source. Edits arriving through the
//! observation protocol patch the affected recipes in place; printing
//! expands the recipes recursively. A recipe is never rebuilt by
//! re-scanning the (by then stale) original source.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{LineIndex, Position};
use crate::error::EditError;
use crate::tree::{
    ListChange, ListField, NodeId, NodeKind, Property, PropertyValue, Role, Tree, TreeObserver,
};

use super::node_text::{NodeText, TextElement};
use super::policy::{Anchor, InsertionPolicyTable};

/// Prints possibly-edited trees while reproducing every untouched region
/// of the original source byte-for-byte.
pub struct LexicalPreservingPrinter {
    texts: FxHashMap<NodeId, NodeText>,
    policies: InsertionPolicyTable,
}

/// Resolved location for splicing a new child into a recipe.
enum Splice {
    Prepend,
    AtElement {
        index: usize,
        separator: Option<&'static str>,
    },
    SplitLiteral {
        element: usize,
        at: usize,
    },
}

impl Default for LexicalPreservingPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalPreservingPrinter {
    /// A printer with the built-in insertion policies.
    pub fn new() -> Self {
        Self::with_policies(InsertionPolicyTable::builtin())
    }

    pub fn with_policies(policies: InsertionPolicyTable) -> Self {
        Self {
            texts: FxHashMap::default(),
            policies,
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Derive the recipe for one node from the original source.
    ///
    /// Each node's recipe is independent, so registration order across
    /// nodes does not matter.
    pub fn register_text(
        &mut self,
        tree: &Tree,
        node: NodeId,
        source: &str,
    ) -> Result<(), EditError> {
        let index = LineIndex::new(source);
        let recipe = build_recipe(tree, node, source, &index)?;
        self.texts.insert(node, recipe);
        Ok(())
    }

    /// Register every node of `root`'s subtree against `source`.
    ///
    /// All-or-nothing: a failure anywhere in the subtree leaves the
    /// printer's recipes exactly as they were.
    pub fn register_subtree(
        &mut self,
        tree: &Tree,
        root: NodeId,
        source: &str,
    ) -> Result<(), EditError> {
        let index = LineIndex::new(source);
        let nodes = tree.descendants(root);
        let mut recipes = FxHashMap::default();
        for node in &nodes {
            recipes.insert(*node, build_recipe(tree, *node, source, &index)?);
        }
        self.texts.extend(recipes);
        debug!(?root, nodes = nodes.len(), "registered subtree");
        Ok(())
    }

    /// The registered recipe for a node, if any. Exposed for white-box
    /// assertions in tests and tooling.
    pub fn text_for(&self, node: NodeId) -> Option<&NodeText> {
        self.texts.get(&node)
    }

    // ========================================================================
    // Printing
    // ========================================================================

    /// Expand a node back to text.
    ///
    /// Registered nodes expand their recipe; nodes created purely by an
    /// edit fall back to a fixed default rendering.
    pub fn print(&self, tree: &Tree, node: NodeId) -> String {
        let mut out = String::new();
        self.print_into(tree, node, &mut out);
        out
    }

    fn print_into(&self, tree: &Tree, node: NodeId, out: &mut String) {
        match self.texts.get(&node) {
            Some(text) => {
                for element in text.elements() {
                    match element {
                        TextElement::Literal(text) => out.push_str(text),
                        TextElement::Child(child) => self.print_into(tree, *child, out),
                    }
                }
            }
            None => self.render_default(tree, node, out),
        }
    }

    fn render_default(&self, tree: &Tree, node: NodeId, out: &mut String) {
        match tree.kind(node) {
            NodeKind::Name | NodeKind::TypeRef => {
                out.push_str(tree.token(node).unwrap_or(""));
            }
            NodeKind::Block => out.push_str("{}"),
            NodeKind::VariableDeclarator => {
                self.print_slot(tree, node, Property::Name, out);
            }
            NodeKind::Parameter => {
                if self.print_slot(tree, node, Property::ElementType, out) {
                    out.push(' ');
                }
                self.print_slot(tree, node, Property::Name, out);
            }
            NodeKind::FieldDecl => {
                if self.print_slot(tree, node, Property::ElementType, out) {
                    out.push(' ');
                }
                self.print_joined(tree, tree.list(node, ListField::Variables), ", ", out);
                out.push(';');
            }
            NodeKind::MethodDecl => {
                if self.print_slot(tree, node, Property::ReturnType, out) {
                    out.push(' ');
                }
                self.print_slot(tree, node, Property::Name, out);
                out.push('(');
                self.print_joined(tree, tree.list(node, ListField::Parameters), ", ", out);
                out.push(')');
                if tree.property(node, Property::Body).is_some() {
                    out.push(' ');
                    self.print_slot(tree, node, Property::Body, out);
                }
            }
            NodeKind::ClassDecl => {
                out.push_str("class ");
                self.print_slot(tree, node, Property::Name, out);
                out.push_str(" {");
                let members = tree.list(node, ListField::Members);
                if members.is_empty() {
                    out.push('}');
                } else {
                    for member in members {
                        out.push(' ');
                        self.print_into(tree, *member, out);
                    }
                    out.push_str(" }");
                }
            }
            NodeKind::CompilationUnit => {
                for child in tree.list(node, ListField::Types) {
                    self.print_into(tree, *child, out);
                }
            }
        }
    }

    fn print_slot(&self, tree: &Tree, node: NodeId, property: Property, out: &mut String) -> bool {
        match tree.property(node, property) {
            Some(child) => {
                self.print_into(tree, child, out);
                true
            }
            None => false,
        }
    }

    fn print_joined(&self, tree: &Tree, children: &[NodeId], separator: &str, out: &mut String) {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.print_into(tree, *child, out);
        }
    }

    // ========================================================================
    // Edit propagation
    // ========================================================================

    fn splice_added_child(
        &mut self,
        tree: &Tree,
        owner: NodeId,
        field: ListField,
        index: usize,
        child: NodeId,
    ) -> Result<(), EditError> {
        if index != 0 {
            return Err(EditError::unsupported(format!(
                "list insertion is only supported at the head, not at index {index}"
            )));
        }
        let kind = tree.kind(owner);
        let rule = self.policies.rule(kind, field).ok_or_else(|| {
            EditError::unsupported(format!("no insertion policy for {kind:?} {field:?}"))
        })?;

        // An owner without registered text falls back to default rendering,
        // which already reflects the post-edit tree.
        let Some(text) = self.texts.get(&owner) else {
            return Ok(());
        };

        let splice = match rule.anchor {
            Anchor::AfterLiteral(marker) => split_at_marker(text, owner, marker)?,
            Anchor::AfterProperty {
                property,
                separator,
            } => match tree.property(owner, property) {
                None => Splice::Prepend,
                Some(anchor) => after_child(text, owner, anchor, separator)?,
            },
            Anchor::AfterLastSibling { separator } => {
                let siblings = tree.list(owner, field);
                // the new child already sits at index 0; anything after it
                // existed before the edit
                match siblings.last().copied().filter(|last| *last != child) {
                    Some(anchor) => after_child(text, owner, anchor, separator)?,
                    None => {
                        let marker = rule.when_empty.ok_or_else(|| {
                            EditError::unsupported(format!(
                                "{kind:?} {field:?} has no anchor for an empty list"
                            ))
                        })?;
                        split_at_marker(text, owner, marker)?
                    }
                }
            }
        };

        if let Some(text) = self.texts.get_mut(&owner) {
            apply_splice(text, splice, child);
        }
        debug!(?owner, ?field, ?child, "spliced inserted child");
        Ok(())
    }
}

impl TreeObserver for LexicalPreservingPrinter {
    fn property_replaced(
        &mut self,
        _tree: &Tree,
        node: NodeId,
        role: Role,
        old: Option<&PropertyValue>,
        new: &PropertyValue,
    ) -> Result<(), EditError> {
        let Some(text) = self.texts.get_mut(&node) else {
            return Ok(());
        };
        let (Some(PropertyValue::Node(old)), PropertyValue::Node(new)) = (old, new) else {
            return Err(EditError::unsupported(format!(
                "only child-for-child replacement of {role:?} can be spliced"
            )));
        };
        let position = text.position_of_child(*old).ok_or_else(|| {
            EditError::unsupported(format!(
                "previous child {old:?} does not appear in the text of {node:?}"
            ))
        })?;
        text.replace(position, TextElement::Child(*new));
        debug!(?node, ?old, ?new, "replaced child reference");
        Ok(())
    }

    fn list_changed(
        &mut self,
        tree: &Tree,
        owner: NodeId,
        field: ListField,
        change: ListChange,
        index: usize,
        node: NodeId,
    ) -> Result<(), EditError> {
        match change {
            ListChange::Remove => {
                if let Some(text) = self.texts.get_mut(&owner) {
                    text.remove_child(node);
                }
                Ok(())
            }
            ListChange::Add => self.splice_added_child(tree, owner, field, index, node),
        }
    }
}

/// Derive one node's recipe from the source: alternating gap literals and
/// child references, children consumed in span order under a byte caret.
fn build_recipe(
    tree: &Tree,
    node: NodeId,
    source: &str,
    index: &LineIndex,
) -> Result<NodeText, EditError> {
    let span = tree.span(node);
    if span.is_unknown() {
        return Err(EditError::UnknownSpan { node });
    }
    let start = byte_offset(index, node, span.begin)?;
    let end = byte_offset(index, node, span.end)? + 1;
    if end > source.len() {
        return Err(EditError::malformed(
            node,
            format!("span ends at byte {end}, past the {} byte source", source.len()),
        ));
    }

    let mut recipe = NodeText::new();
    let mut caret = start;
    for child in tree.child_nodes(node) {
        let child_span = tree.span(child);
        if child_span.is_unknown() {
            return Err(EditError::UnknownSpan { node: child });
        }
        let child_start = byte_offset(index, child, child_span.begin)?;
        let child_end = byte_offset(index, child, child_span.end)? + 1;
        if child_start < caret || child_end > end {
            return Err(EditError::malformed(
                node,
                format!(
                    "child {child:?} covers bytes {child_start}..{child_end}, \
                     outside the unconsumed parent bytes {caret}..{end}"
                ),
            ));
        }
        if child_start > caret {
            recipe.push_literal(&source[caret..child_start]);
        }
        recipe.push_child(child);
        caret = child_end;
    }
    if caret < end {
        recipe.push_literal(&source[caret..end]);
    }

    trace!(?node, elements = recipe.len(), "built node text");
    Ok(recipe)
}

fn byte_offset(index: &LineIndex, node: NodeId, position: Position) -> Result<usize, EditError> {
    index.offset(position).map(usize::from).ok_or_else(|| {
        EditError::malformed(node, format!("position {position:?} is outside the source"))
    })
}

/// First literal containing `marker`, split just after it.
fn split_at_marker(text: &NodeText, owner: NodeId, marker: &str) -> Result<Splice, EditError> {
    text.elements()
        .iter()
        .enumerate()
        .find_map(|(element, e)| {
            e.as_literal()
                .and_then(|t| t.find(marker))
                .map(|at| Splice::SplitLiteral {
                    element,
                    at: at + marker.len(),
                })
        })
        .ok_or_else(|| {
            EditError::unsupported(format!(
                "no literal of {owner:?} contains the marker {marker:?}"
            ))
        })
}

fn after_child(
    text: &NodeText,
    owner: NodeId,
    anchor: NodeId,
    separator: &'static str,
) -> Result<Splice, EditError> {
    let position = text.position_of_child(anchor).ok_or_else(|| {
        EditError::unsupported(format!(
            "anchor child {anchor:?} does not appear in the text of {owner:?}"
        ))
    })?;
    Ok(Splice::AtElement {
        index: position + 1,
        separator: Some(separator),
    })
}

fn apply_splice(text: &mut NodeText, splice: Splice, child: NodeId) {
    match splice {
        Splice::Prepend => text.insert(0, TextElement::Child(child)),
        Splice::AtElement { index, separator } => {
            let mut at = index;
            if let Some(sep) = separator {
                text.insert(at, TextElement::Literal(SmolStr::new_static(sep)));
                at += 1;
            }
            text.insert(at, TextElement::Child(child));
        }
        Splice::SplitLiteral { element, at } => {
            let Some(literal) = text.element(element).as_literal() else {
                return;
            };
            let before = SmolStr::new(&literal[..at]);
            let after = SmolStr::new(&literal[at..]);
            if after.is_empty() {
                text.insert(element + 1, TextElement::Child(child));
            } else {
                text.replace(element, TextElement::Literal(before));
                text.insert(element + 1, TextElement::Child(child));
                text.insert(element + 2, TextElement::Literal(after));
            }
        }
    }
}
