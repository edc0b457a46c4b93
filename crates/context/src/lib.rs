//! Named, parent-linked scopes that carry per-traversal state to visitors.
//!
//! Scopes live in a [`Contexts`] arena and are addressed by [`ContextId`]
//! handles. A root scope is its own parent and its own root; a child scope
//! shares the root of the scope that created it. Scopes are never freed
//! individually, they go away with the arena.

pub mod error;
mod scope;

pub use error::ContextError;
pub use scope::{Breadcrumb, Context, ContextId, Contexts, RESERVED_KEYS};
