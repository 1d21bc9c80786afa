//! The mutation observation protocol.
//!
//! Every successful mutating call on a [`Tree`] emits exactly one
//! notification, delivered strictly after the structural change has taken
//! effect: an observer reading back into the tree sees post-mutation
//! state. Construction of a tree produces no notifications at all.
//!
//! Instead of a web of per-node forwarding listeners, each tree carries a
//! single event channel with one subscriber list; delivery is filtered by
//! each subscription's registration mode.

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::error::EditError;

use super::arena::{NodeId, Tree};
use super::kind::{ListField, Role};

/// Whether a list mutation added or removed a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Add,
    Remove,
}

/// Old/new value carried by a property-replace notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Node(NodeId),
    Token(SmolStr),
}

/// How far an observer registration reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// Only mutations whose owning node is the registered node itself.
    Plain,
    /// Every mutation anywhere in the registered node's subtree, including
    /// on nodes inserted after registration.
    SelfPropagating,
}

/// Subscriber to tree mutations.
///
/// An error returned from a callback propagates to the mutating caller;
/// the tree keeps the already-applied structural change.
pub trait TreeObserver {
    /// A single-child or primitive slot of `node` was replaced.
    ///
    /// `old` is `None` when the slot was previously empty.
    fn property_replaced(
        &mut self,
        tree: &Tree,
        node: NodeId,
        role: Role,
        old: Option<&PropertyValue>,
        new: &PropertyValue,
    ) -> Result<(), EditError>;

    /// A node was added to or removed from a list slot of `owner`.
    fn list_changed(
        &mut self,
        tree: &Tree,
        owner: NodeId,
        field: ListField,
        change: ListChange,
        index: usize,
        node: NodeId,
    ) -> Result<(), EditError>;
}

/// One active registration on a tree's event channel.
pub(super) struct Subscription {
    pub(super) root: NodeId,
    pub(super) mode: RegistrationMode,
    pub(super) observer: Rc<RefCell<dyn TreeObserver>>,
}
