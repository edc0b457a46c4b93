//! Owned addresses of nodes inside a JSON tree.
use serde_json::Value;
use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Key(String),
    Index(usize),
}

impl Slot {
    pub fn get<'a>(&self, container: &'a Value) -> Option<&'a Value> {
        match (self, container) {
            (Slot::Key(key), Value::Object(map)) => map.get(key),
            (Slot::Index(i), Value::Array(items)) => items.get(*i),
            _ => None,
        }
    }

    pub fn get_mut<'a>(&self, container: &'a mut Value) -> Option<&'a mut Value> {
        match (self, container) {
            (Slot::Key(key), Value::Object(map)) => map.get_mut(key),
            (Slot::Index(i), Value::Array(items)) => items.get_mut(*i),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Slot::Key(key) => Some(key),
            Slot::Index(_) => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Key(key) => write!(f, "/{}", key),
            Slot::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// The slots leading from the tree root to a node. The empty location is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Location(Vec<Slot>);

impl Location {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.0
    }

    pub fn child(&self, slot: Slot) -> Self {
        let mut slots = self.0.clone();
        slots.push(slot);
        Self(slots)
    }

    /// Splits off the last slot, giving the parent's location and the slot.
    pub fn split_last(&self) -> Option<(Location, &Slot)> {
        self.0
            .split_last()
            .map(|(last, parent)| (Location(parent.to_vec()), last))
    }

    pub fn resolve<'a>(&self, tree: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(tree, |node, slot| slot.get(node))
    }

    pub fn resolve_mut<'a>(&self, tree: &'a mut Value) -> Option<&'a mut Value> {
        self.0.iter().try_fold(tree, |node, slot| slot.get_mut(node))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        self.0.iter().try_for_each(|slot| slot.fmt(f))
    }
}

impl FromIterator<Slot> for Location {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
