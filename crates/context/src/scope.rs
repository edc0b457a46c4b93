//! The scope arena and the mutable handle given to visitors.
use crate::error::ContextError;
use itertools::Itertools;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Binding names that callers may never write.
pub const RESERVED_KEYS: [&str; 3] = ["_parent", "_child", "_root"];

const DEFAULT_NAME: &str = "root";

/// A handle to a scope inside a [`Contexts`] arena.
///
/// Handles are only meaningful for the arena that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(usize);

#[derive(Debug)]
struct Scope {
    name: String,
    parent: ContextId,
    root: ContextId,
    bindings: HashMap<String, Value>,
}

/// Arena owning every scope created during one or more evaluations.
#[derive(Debug, Default)]
pub struct Contexts {
    scopes: Vec<Scope>,
}

impl Contexts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a root scope. Its parent and root are itself.
    pub fn create(&mut self, name: Option<&str>) -> ContextId {
        let id = ContextId(self.scopes.len());
        self.scopes.push(Scope {
            name: name.unwrap_or(DEFAULT_NAME).to_string(),
            parent: id,
            root: id,
            bindings: HashMap::new(),
        });
        id
    }

    /// Creates a child of `parent`. The child inherits the parent's root handle.
    pub fn create_sub_context(&mut self, parent: ContextId, name: &str) -> ContextId {
        let id = ContextId(self.scopes.len());
        let root = self.scope(parent).root;
        self.scopes.push(Scope {
            name: name.to_string(),
            parent,
            root,
            bindings: HashMap::new(),
        });
        id
    }

    pub fn name(&self, id: ContextId) -> &str {
        &self.scope(id).name
    }

    pub fn parent(&self, id: ContextId) -> ContextId {
        self.scope(id).parent
    }

    pub fn is_root(&self, id: ContextId) -> bool {
        self.scope(id).parent == id
    }

    pub fn root(&self, id: ContextId) -> ContextId {
        self.scope(id).root
    }

    /// Walks from `id` up the parent chain, yielding `id` first and the root last.
    pub fn ancestors(&self, id: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        std::iter::successors(Some(id), move |&current| {
            let parent = self.parent(current);
            (parent != current).then_some(parent)
        })
    }

    pub fn get(&self, id: ContextId, key: &str) -> Option<&Value> {
        self.scope(id).bindings.get(key)
    }

    /// Binds `key` in the scope, returning the previous value.
    pub fn set(
        &mut self,
        id: ContextId,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, ContextError> {
        if RESERVED_KEYS.contains(&key) {
            return Err(ContextError::ReservedKey(key.to_string()));
        }
        Ok(self
            .scope_mut(id)
            .bindings
            .insert(key.to_string(), value.into()))
    }

    /// Renders the names from `id` up to, but excluding, the root.
    pub fn breadcrumb(&self, id: ContextId) -> Breadcrumb<'_> {
        Breadcrumb { contexts: self, id }
    }

    /// A mutable view of one scope, as handed to visitors.
    pub fn handle(&mut self, id: ContextId) -> Context<'_> {
        Context { contexts: self, id }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn scope(&self, id: ContextId) -> &Scope {
        &self.scopes[id.0]
    }

    fn scope_mut(&mut self, id: ContextId) -> &mut Scope {
        &mut self.scopes[id.0]
    }
}

/// `Display` adapter for a scope's breadcrumb trail, e.g. ` >> name >> orgVdcs`.
pub struct Breadcrumb<'a> {
    contexts: &'a Contexts,
    id: ContextId,
}

impl fmt::Display for Breadcrumb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trail = self
            .contexts
            .ancestors(self.id)
            .filter(|&id| !self.contexts.is_root(id))
            .map(|id| self.contexts.name(id))
            .join(" >> ");
        if trail.is_empty() {
            Ok(())
        } else {
            write!(f, " >> {}", trail)
        }
    }
}

/// A mutable view of a single scope.
pub struct Context<'a> {
    contexts: &'a mut Contexts,
    id: ContextId,
}

impl<'a> Context<'a> {
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.contexts.name(self.id)
    }

    pub fn is_root(&self) -> bool {
        self.contexts.is_root(self.id)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.contexts.get(self.id, key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<Option<Value>, ContextError> {
        self.contexts.set(self.id, key, value)
    }

    pub fn parent(self) -> Context<'a> {
        let id = self.contexts.parent(self.id);
        Context { contexts: self.contexts, id }
    }

    pub fn root(self) -> Context<'a> {
        let id = self.contexts.root(self.id);
        Context { contexts: self.contexts, id }
    }

    pub fn create_sub_context(&mut self, name: &str) -> ContextId {
        self.contexts.create_sub_context(self.id, name)
    }

    pub fn breadcrumb(&self) -> Breadcrumb<'_> {
        self.contexts.breadcrumb(self.id)
    }

    /// Shortens the borrow so the handle can be passed on and used again.
    pub fn reborrow(&mut self) -> Context<'_> {
        Context {
            contexts: self.contexts,
            id: self.id,
        }
    }
}

impl fmt::Display for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.breadcrumb().fmt(f)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}
