// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{ActorId, INVALID};
use super::store::ActorStore;

/// An iterator over the direct children of an actor.
///
/// Created by [`ActorStore::children`]. Iteration order is sibling order,
/// which is also paint/traversal order.
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a ActorStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a ActorStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ActorId;

    fn next(&mut self) -> Option<ActorId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(self.store.id_at(idx))
    }
}

impl ActorStore {
    /// Returns an iterator over the direct children of an actor.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn children(&self, id: ActorId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the toplevel that owns an actor, if its root is a toplevel.
    ///
    /// This walks the parent chain on every call; the result is not cached,
    /// so it stays correct across reparenting. O(tree depth).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn toplevel_of(&self, id: ActorId) -> Option<ActorId> {
        self.validate(id);
        self.toplevel_idx_of(id.idx).map(|idx| self.id_at(idx))
    }

    /// Raw-index variant of [`toplevel_of`](Self::toplevel_of).
    pub(crate) fn toplevel_idx_of(&self, idx: u32) -> Option<u32> {
        let mut cur = idx;
        while self.parent[cur as usize] != INVALID {
            cur = self.parent[cur as usize];
        }
        if self.state[cur as usize].is_toplevel {
            Some(cur)
        } else {
            None
        }
    }

    /// Returns whether `anc` is `idx` itself or one of its ancestors.
    ///
    /// Used by the attach operations to reject links that would close a
    /// cycle in the tree.
    pub(crate) fn is_self_or_ancestor(&self, anc: u32, idx: u32) -> bool {
        let mut cur = idx;
        loop {
            if cur == anc {
                return true;
            }
            cur = self.parent[cur as usize];
            if cur == INVALID {
                return false;
            }
        }
    }
}
