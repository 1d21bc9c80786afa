//! Per-node text reconstruction recipes.

use smol_str::SmolStr;

use crate::tree::NodeId;

/// One element of a node's text recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextElement {
    /// A verbatim slice of the original source.
    Literal(SmolStr),
    /// A reference to a child node, expanded recursively at print time.
    Child(NodeId),
}

impl TextElement {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            TextElement::Literal(text) => Some(text),
            TextElement::Child(_) => None,
        }
    }

    pub fn as_child(&self) -> Option<NodeId> {
        match self {
            TextElement::Literal(_) => None,
            TextElement::Child(child) => Some(*child),
        }
    }
}

/// Ordered recipe for reconstructing one node's text.
///
/// Invariant: for a subtree untouched since registration, expanding the
/// elements in order yields exactly the source substring covered by the
/// node's span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeText {
    elements: Vec<TextElement>,
}

impl NodeText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> &TextElement {
        &self.elements[index]
    }

    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    pub fn push_literal(&mut self, text: &str) {
        self.elements.push(TextElement::Literal(SmolStr::new(text)));
    }

    pub fn push_child(&mut self, child: NodeId) {
        self.elements.push(TextElement::Child(child));
    }

    pub fn insert(&mut self, index: usize, element: TextElement) {
        self.elements.insert(index, element);
    }

    pub fn replace(&mut self, index: usize, element: TextElement) {
        self.elements[index] = element;
    }

    /// Position of the element referencing `child`, if any.
    pub fn position_of_child(&self, child: NodeId) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.as_child() == Some(child))
    }

    /// Delete the element referencing `child`, then prune one adjacent
    /// comma separator: a leading comma in the following literal, or
    /// failing that a trailing comma in the preceding one. Other
    /// surrounding literals stay byte-identical.
    pub(crate) fn remove_child(&mut self, child: NodeId) {
        let Some(index) = self.position_of_child(child) else {
            return;
        };
        self.elements.remove(index);
        // `index` now addresses the element that followed the child
        if let Some(TextElement::Literal(text)) = self.elements.get(index) {
            if let Some(trimmed) = trim_leading_separator(text) {
                if trimmed.is_empty() {
                    self.elements.remove(index);
                } else {
                    self.elements[index] = TextElement::Literal(trimmed);
                }
                return;
            }
        }
        if index == 0 {
            return;
        }
        if let Some(TextElement::Literal(text)) = self.elements.get(index - 1) {
            if let Some(trimmed) = trim_trailing_separator(text) {
                if trimmed.is_empty() {
                    self.elements.remove(index - 1);
                } else {
                    self.elements[index - 1] = TextElement::Literal(trimmed);
                }
            }
        }
    }
}

/// Strip an initial comma (allowing whitespace around it); `None` when the
/// literal does not start with a separator.
fn trim_leading_separator(text: &str) -> Option<SmolStr> {
    let rest = text
        .trim_start_matches([' ', '\t'])
        .strip_prefix(',')?
        .trim_start_matches([' ', '\t']);
    Some(SmolStr::new(rest))
}

/// Truncate at a final comma (one followed only by whitespace); `None`
/// when there is no such comma.
fn trim_trailing_separator(text: &str) -> Option<SmolStr> {
    let index = text.rfind(',')?;
    if !text[index + 1..].chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }
    Some(SmolStr::new(text[..index].trim_end_matches([' ', '\t'])))
}
