//! The selected set: the action ids currently granted to an access group.
//!
//! Ownership of a `SelectedSet` stays with the caller. Resolver operations
//! take one by reference and hand back a new one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ActionId;

/// An ordered set of granted action ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedSet {
    inner: BTreeSet<ActionId>,
}

impl SelectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ActionId) -> bool {
        self.inner.contains(id)
    }

    /// Insert `id`, returning true if it was not already present.
    pub fn insert(&mut self, id: ActionId) -> bool {
        self.inner.insert(id)
    }

    /// Remove `id`, returning true if it was present.
    pub fn remove(&mut self, id: &ActionId) -> bool {
        self.inner.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionId> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Return true if every id yielded by `ids` is selected.
    pub fn contains_all<'a>(&self, mut ids: impl Iterator<Item = &'a ActionId>) -> bool {
        ids.all(|id| self.inner.contains(id))
    }
}

impl FromIterator<ActionId> for SelectedSet {
    fn from_iter<I: IntoIterator<Item = ActionId>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}

impl Extend<ActionId> for SelectedSet {
    fn extend<I: IntoIterator<Item = ActionId>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SelectedSet {
    type Item = &'a ActionId;
    type IntoIter = std::collections::btree_set::Iter<'a, ActionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
