//! Mutable syntax tree: arena storage, ownership, mutation observation.
//!
//! The tree is the unit of editing. All mutations go through the entry
//! points on [`Tree`] so that observers fire; an editing layer that
//! reaches around them breaks the printer's consistency guarantee.

mod arena;
mod kind;
mod observer;

pub use arena::{NodeId, Parent, Tree};
pub use kind::{ListField, NodeKind, Property, Role};
pub use observer::{ListChange, PropertyValue, RegistrationMode, TreeObserver};
