//! Predicate store with multi-key lookup
//!
//! Every stored predicate is reachable through each of its
//! [`PredicateRef`] keys. No two predicates may share a key unless they are
//! the same predicate (same spec and same name). Inserts are atomic: a batch
//! with any conflict leaves the store untouched.

use crate::error::{Result, TableauError};
use crate::lexicals::{Predicate, PredicateRef};
use indexmap::{IndexMap, IndexSet};
use std::sync::OnceLock;

fn system_predicates() -> &'static [Predicate; 2] {
    static SYSTEM: OnceLock<[Predicate; 2]> = OnceLock::new();
    SYSTEM.get_or_init(Predicate::system)
}

fn same_predicate(a: &Predicate, b: &Predicate) -> bool {
    a == b && a.name() == b.name()
}

/// Insertion-ordered predicate collection.
#[derive(Debug, Clone, Default)]
pub struct Predicates {
    items: IndexSet<Predicate>,
    index: IndexMap<PredicateRef, Predicate>,
}

impl Predicates {
    pub fn new() -> Self {
        Predicates::default()
    }

    /// Insert one predicate. Re-adding a stored predicate is a no-op.
    pub fn add(&mut self, predicate: Predicate) -> Result<()> {
        self.add_all([predicate])
    }

    /// Insert a batch of predicates, all or nothing.
    pub fn add_all(&mut self, predicates: impl IntoIterator<Item = Predicate>) -> Result<()> {
        let mut pending: IndexMap<PredicateRef, Predicate> = IndexMap::new();
        for incoming in predicates {
            for key in incoming.refs() {
                let existing = self
                    .lookup(&key)
                    .or_else(|| pending.get(&key))
                    .filter(|existing| !same_predicate(existing, &incoming));
                if let Some(existing) = existing {
                    return Err(TableauError::PredicateConflict {
                        key: key.to_string(),
                        existing: existing.clone(),
                        incoming,
                    });
                }
            }
            for key in incoming.refs() {
                pending.insert(key, incoming.clone());
            }
        }
        for (key, predicate) in pending {
            if predicate.is_system() {
                continue;
            }
            self.items.insert(predicate.clone());
            self.index.insert(key, predicate);
        }
        Ok(())
    }

    fn lookup(&self, key: &PredicateRef) -> Option<&Predicate> {
        self.index.get(key).or_else(|| {
            system_predicates()
                .iter()
                .find(|p| p.refs().contains(key))
        })
    }

    /// Look up by any reference key, falling back to the system predicates.
    pub fn get(&self, key: &PredicateRef) -> Option<&Predicate> {
        self.lookup(key)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Predicate> {
        self.lookup(&PredicateRef::Name(name.to_string()))
    }

    pub fn get_by_coords(&self, index: i32, subscript: u32) -> Option<&Predicate> {
        self.lookup(&PredicateRef::Coords(index, subscript))
    }

    /// Whether the predicate is stored (system predicates always are).
    pub fn contains(&self, predicate: &Predicate) -> bool {
        predicate.is_system() || self.items.contains(predicate)
    }

    /// Remove the predicate reachable by `key` and all of its keys.
    pub fn remove(&mut self, key: &PredicateRef) -> Option<Predicate> {
        let predicate = self.index.get(key)?.clone();
        self.items.shift_remove(&predicate);
        for key in predicate.refs() {
            self.index.shift_remove(&key);
        }
        Some(predicate)
    }

    /// Number of user predicates stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// User predicates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Predicates {
    type Item = &'a Predicate;
    type IntoIter = indexmap::set::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
