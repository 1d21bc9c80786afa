//! Node kinds and slot tags.
//!
//! Every child-bearing slot is statically tagged at construction:
//! single-child slots by [`Property`], list slots by [`ListField`]. The
//! tags serve three jobs at once: they name the slot in a child's owner
//! reference, they identify the slot in mutation notifications, and they
//! key the insertion policy table.

/// The construct a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    ClassDecl,
    FieldDecl,
    MethodDecl,
    Parameter,
    VariableDeclarator,
    TypeRef,
    Name,
    Block,
}

impl NodeKind {
    /// Single-child slots this kind declares, in source order.
    pub fn properties(self) -> &'static [Property] {
        match self {
            NodeKind::ClassDecl => &[Property::Name],
            NodeKind::FieldDecl => &[Property::ElementType],
            NodeKind::MethodDecl => &[Property::ReturnType, Property::Name, Property::Body],
            NodeKind::Parameter => &[Property::ElementType, Property::Name],
            NodeKind::VariableDeclarator => &[Property::Name],
            NodeKind::CompilationUnit
            | NodeKind::TypeRef
            | NodeKind::Name
            | NodeKind::Block => &[],
        }
    }

    /// List slots this kind declares.
    pub fn list_fields(self) -> &'static [ListField] {
        match self {
            NodeKind::CompilationUnit => &[ListField::Types],
            NodeKind::ClassDecl => &[ListField::Members],
            NodeKind::FieldDecl => &[ListField::Variables],
            NodeKind::MethodDecl => &[ListField::Parameters],
            NodeKind::Parameter
            | NodeKind::VariableDeclarator
            | NodeKind::TypeRef
            | NodeKind::Name
            | NodeKind::Block => &[],
        }
    }

    /// Whether nodes of this kind carry leaf token text.
    pub fn has_token(self) -> bool {
        matches!(self, NodeKind::TypeRef | NodeKind::Name)
    }
}

/// Tag of a single-child (or primitive) slot on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Name,
    ElementType,
    ReturnType,
    Body,
    /// The leaf token text of a `TypeRef`/`Name`. Never a child slot; only
    /// appears as the replaced property in token-change notifications.
    Token,
}

/// Tag of a list slot on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Types,
    Members,
    Variables,
    Parameters,
}

/// The slot a child occupies on its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Property(Property),
    ListEntry(ListField),
}
