//! Arena-backed tree storage, ownership, and mutation entry points.
//!
//! All nodes of one tree live in a single [`Tree`] arena and are addressed
//! by [`NodeId`] handles assigned at creation and stable for the tree's
//! lifetime. A node is owned by at most one slot at a time; attaching an
//! already-owned node without an explicit detach is a programming error
//! and panics rather than silently reparenting.

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;
use tracing::trace;

use crate::base::Span;
use crate::error::EditError;

use super::kind::{ListField, NodeKind, Property, Role};
use super::observer::{
    ListChange, PropertyValue, RegistrationMode, Subscription, TreeObserver,
};

/// Stable handle to a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child's owner reference: the owning node and the slot it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent {
    pub node: NodeId,
    pub role: Role,
}

struct NodeData {
    kind: NodeKind,
    span: Span,
    token: Option<SmolStr>,
    parent: Option<Parent>,
    properties: Vec<(Property, Option<NodeId>)>,
    lists: Vec<(ListField, Vec<NodeId>)>,
}

/// Arena holding the nodes of one syntax tree, plus its event channel.
#[derive(Default)]
pub struct Tree {
    nodes: Vec<NodeData>,
    subscriptions: Vec<Subscription>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Construction (never notifies: building a fresh tree is not an edit)
    // ========================================================================

    /// Allocate a node of `kind` with the slots the kind declares, all empty.
    pub fn new_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            span,
            token: None,
            parent: None,
            properties: kind.properties().iter().map(|p| (*p, None)).collect(),
            lists: kind.list_fields().iter().map(|f| (*f, Vec::new())).collect(),
        });
        NodeId(self.nodes.len() as u32 - 1)
    }

    pub fn new_name(&mut self, text: &str, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::Name, span);
        self.nodes[node.index()].token = Some(SmolStr::new(text));
        node
    }

    pub fn new_type(&mut self, text: &str, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::TypeRef, span);
        self.nodes[node.index()].token = Some(SmolStr::new(text));
        node
    }

    pub fn new_block(&mut self, span: Span) -> NodeId {
        self.new_node(NodeKind::Block, span)
    }

    pub fn new_compilation_unit(&mut self, types: Vec<NodeId>, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::CompilationUnit, span);
        self.init_list(node, ListField::Types, types);
        node
    }

    pub fn new_class(&mut self, name: NodeId, members: Vec<NodeId>, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::ClassDecl, span);
        self.init_property(node, Property::Name, name);
        self.init_list(node, ListField::Members, members);
        node
    }

    pub fn new_field(
        &mut self,
        element_type: NodeId,
        variables: Vec<NodeId>,
        span: Span,
    ) -> NodeId {
        let node = self.new_node(NodeKind::FieldDecl, span);
        self.init_property(node, Property::ElementType, element_type);
        self.init_list(node, ListField::Variables, variables);
        node
    }

    pub fn new_variable(&mut self, name: NodeId, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::VariableDeclarator, span);
        self.init_property(node, Property::Name, name);
        node
    }

    pub fn new_method(
        &mut self,
        return_type: NodeId,
        name: NodeId,
        parameters: Vec<NodeId>,
        body: Option<NodeId>,
        span: Span,
    ) -> NodeId {
        let node = self.new_node(NodeKind::MethodDecl, span);
        self.init_property(node, Property::ReturnType, return_type);
        self.init_property(node, Property::Name, name);
        if let Some(body) = body {
            self.init_property(node, Property::Body, body);
        }
        self.init_list(node, ListField::Parameters, parameters);
        node
    }

    pub fn new_parameter(&mut self, element_type: NodeId, name: NodeId, span: Span) -> NodeId {
        let node = self.new_node(NodeKind::Parameter, span);
        self.init_property(node, Property::ElementType, element_type);
        self.init_property(node, Property::Name, name);
        node
    }

    fn init_property(&mut self, node: NodeId, property: Property, child: NodeId) {
        self.attach(
            child,
            Parent {
                node,
                role: Role::Property(property),
            },
        );
        let slot = self.property_slot(node, property);
        self.nodes[node.index()].properties[slot].1 = Some(child);
    }

    fn init_list(&mut self, node: NodeId, field: ListField, children: Vec<NodeId>) {
        for child in &children {
            self.attach(
                *child,
                Parent {
                    node,
                    role: Role::ListEntry(field),
                },
            );
        }
        let slot = self.list_slot(node, field);
        self.nodes[node.index()].lists[slot].1 = children;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.index()].kind
    }

    pub fn span(&self, node: NodeId) -> Span {
        self.nodes[node.index()].span
    }

    /// Leaf token text, for kinds that carry one.
    pub fn token(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.index()].token.as_deref()
    }

    pub fn parent(&self, node: NodeId) -> Option<Parent> {
        self.nodes[node.index()].parent
    }

    /// The child in a single-child slot, or `None` when the slot is empty.
    ///
    /// Panics when the node's kind does not declare the slot.
    pub fn property(&self, node: NodeId, property: Property) -> Option<NodeId> {
        let slot = self.property_slot(node, property);
        self.nodes[node.index()].properties[slot].1
    }

    /// The current members of a list slot, in list order.
    ///
    /// Panics when the node's kind does not declare the slot.
    pub fn list(&self, node: NodeId, field: ListField) -> &[NodeId] {
        let slot = self.list_slot(node, field);
        &self.nodes[node.index()].lists[slot].1
    }

    /// All immediate children, ordered by span begin-position.
    ///
    /// For a well-formed freshly-parsed tree this is left-to-right source
    /// order.
    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let data = &self.nodes[node.index()];
        let mut children: Vec<NodeId> = data
            .properties
            .iter()
            .filter_map(|(_, child)| *child)
            .chain(data.lists.iter().flat_map(|(_, list)| list.iter().copied()))
            .collect();
        children.sort_by_key(|child| {
            let span = self.span(*child);
            (span.begin, span.end)
        });
        children
    }

    /// The node and all its descendants, preorder.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            let mut children = self.child_nodes(node);
            children.reverse();
            stack.append(&mut children);
        }
        out
    }

    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent.node,
                None => return false,
            }
        }
    }

    // ========================================================================
    // Mutation entry points (each successful call emits one notification)
    // ========================================================================

    /// Replace the child in a single-child slot, returning the previous one.
    ///
    /// The previous child is detached; `new` must be unowned.
    pub fn set_property(
        &mut self,
        node: NodeId,
        property: Property,
        new: NodeId,
    ) -> Result<Option<NodeId>, EditError> {
        let slot = self.property_slot(node, property);
        let old = self.nodes[node.index()].properties[slot].1.take();
        if let Some(old) = old {
            self.detach(old);
        }
        self.attach(
            new,
            Parent {
                node,
                role: Role::Property(property),
            },
        );
        self.nodes[node.index()].properties[slot].1 = Some(new);
        trace!(?node, ?property, ?old, ?new, "property replaced");
        let old_value = old.map(PropertyValue::Node);
        self.notify_property(
            node,
            Role::Property(property),
            old_value.as_ref(),
            &PropertyValue::Node(new),
        )?;
        Ok(old)
    }

    /// Replace the leaf token text of a `TypeRef`/`Name`.
    pub fn set_token(&mut self, node: NodeId, text: &str) -> Result<SmolStr, EditError> {
        let data = &mut self.nodes[node.index()];
        assert!(
            data.kind.has_token(),
            "{:?} nodes carry no token text",
            data.kind
        );
        let old = data
            .token
            .replace(SmolStr::new(text))
            .unwrap_or_else(|| SmolStr::new(""));
        trace!(?node, %old, new = %text, "token replaced");
        let old_value = PropertyValue::Token(old.clone());
        self.notify_property(
            node,
            Role::Property(Property::Token),
            Some(&old_value),
            &PropertyValue::Token(SmolStr::new(text)),
        )?;
        Ok(old)
    }

    /// Insert `child` into a list slot at `index`.
    pub fn list_insert(
        &mut self,
        owner: NodeId,
        field: ListField,
        index: usize,
        child: NodeId,
    ) -> Result<(), EditError> {
        self.attach(
            child,
            Parent {
                node: owner,
                role: Role::ListEntry(field),
            },
        );
        let slot = self.list_slot(owner, field);
        self.nodes[owner.index()].lists[slot].1.insert(index, child);
        trace!(?owner, ?field, index, ?child, "list insert");
        self.notify_list(owner, field, ListChange::Add, index, child)
    }

    /// Remove and detach the list member at `index`, returning it.
    pub fn list_remove(
        &mut self,
        owner: NodeId,
        field: ListField,
        index: usize,
    ) -> Result<NodeId, EditError> {
        let slot = self.list_slot(owner, field);
        let child = self.nodes[owner.index()].lists[slot].1.remove(index);
        self.detach(child);
        trace!(?owner, ?field, index, ?child, "list remove");
        self.notify_list(owner, field, ListChange::Remove, index, child)?;
        Ok(child)
    }

    /// Replace the list member at `index` in place, returning the old one.
    ///
    /// Reported to observers as a single property replace tagged with the
    /// list slot, not as a remove/add pair.
    pub fn list_set(
        &mut self,
        owner: NodeId,
        field: ListField,
        index: usize,
        new: NodeId,
    ) -> Result<NodeId, EditError> {
        self.attach(
            new,
            Parent {
                node: owner,
                role: Role::ListEntry(field),
            },
        );
        let slot = self.list_slot(owner, field);
        let old = std::mem::replace(&mut self.nodes[owner.index()].lists[slot].1[index], new);
        self.detach(old);
        trace!(?owner, ?field, index, ?old, ?new, "list entry replaced");
        let old_value = PropertyValue::Node(old);
        self.notify_property(
            owner,
            Role::ListEntry(field),
            Some(&old_value),
            &PropertyValue::Node(new),
        )?;
        Ok(old)
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Attach an observer to the tree's event channel.
    ///
    /// The registration lives as long as the tree. `Plain` subscriptions
    /// see only mutations owned by `root` itself; `SelfPropagating` ones
    /// see every mutation in `root`'s subtree, including on nodes inserted
    /// after registration.
    pub fn observe(
        &mut self,
        root: NodeId,
        mode: RegistrationMode,
        observer: Rc<RefCell<dyn TreeObserver>>,
    ) {
        self.subscriptions.push(Subscription {
            root,
            mode,
            observer,
        });
    }

    fn receivers(&self, owner: NodeId) -> Vec<Rc<RefCell<dyn TreeObserver>>> {
        self.subscriptions
            .iter()
            .filter(|s| match s.mode {
                RegistrationMode::Plain => s.root == owner,
                RegistrationMode::SelfPropagating => self.is_ancestor_or_self(s.root, owner),
            })
            .map(|s| Rc::clone(&s.observer))
            .collect()
    }

    fn notify_property(
        &self,
        node: NodeId,
        role: Role,
        old: Option<&PropertyValue>,
        new: &PropertyValue,
    ) -> Result<(), EditError> {
        for observer in self.receivers(node) {
            observer
                .borrow_mut()
                .property_replaced(self, node, role, old, new)?;
        }
        Ok(())
    }

    fn notify_list(
        &self,
        owner: NodeId,
        field: ListField,
        change: ListChange,
        index: usize,
        node: NodeId,
    ) -> Result<(), EditError> {
        for observer in self.receivers(owner) {
            observer
                .borrow_mut()
                .list_changed(self, owner, field, change, index, node)?;
        }
        Ok(())
    }

    // ========================================================================
    // Ownership internals
    // ========================================================================

    fn attach(&mut self, child: NodeId, parent: Parent) {
        let data = &mut self.nodes[child.index()];
        if let Some(existing) = data.parent {
            panic!("node {child:?} is already owned by {existing:?}; detach it first");
        }
        data.parent = Some(parent);
    }

    fn detach(&mut self, child: NodeId) {
        self.nodes[child.index()].parent = None;
    }

    fn property_slot(&self, node: NodeId, property: Property) -> usize {
        let data = &self.nodes[node.index()];
        data.properties
            .iter()
            .position(|(p, _)| *p == property)
            .unwrap_or_else(|| {
                panic!("{:?} nodes have no {property:?} slot", data.kind)
            })
    }

    fn list_slot(&self, node: NodeId, field: ListField) -> usize {
        let data = &self.nodes[node.index()];
        data.lists
            .iter()
            .position(|(f, _)| *f == field)
            .unwrap_or_else(|| panic!("{:?} nodes have no {field:?} list", data.kind))
    }
}
