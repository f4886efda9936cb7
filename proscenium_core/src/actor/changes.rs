// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle change flushing.
//!
//! Lifecycle transitions mark per-actor dirty channels as they happen (see
//! [`dirty`](crate::dirty)). [`ActorStore::flush_changes`] drains every
//! channel into a [`LifecycleChanges`] batch that backends consume to apply
//! incremental updates, and rebuilds the depth-first traversal order if the
//! topology changed.
//!
//! [`LifecycleChanges`] uses raw slot indices (`u32`) rather than
//! [`ActorId`](super::ActorId) handles so that backends can index directly
//! into the store's SoA arrays via accessors like
//! [`flags_at`](super::ActorStore::flags_at) without paying for generation
//! checks on every access. Removed slots are already recycled by the time
//! they appear in `removed`; their indices identify which native objects to
//! drop, not live actors.

use alloc::vec::Vec;

use crate::dirty;

use super::id::INVALID;
use super::store::ActorStore;

/// The set of changes produced by a single [`ActorStore::flush_changes`]
/// call.
///
/// Each field contains the raw slot indices of actors that changed in the
/// corresponding category since the previous flush.
#[derive(Clone, Debug, Default)]
pub struct LifecycleChanges {
    /// Actors whose mapped flag flipped.
    pub mapped: Vec<u32>,
    /// Actors whose realized flag flipped.
    pub realized: Vec<u32>,
    /// Actors whose visible flag flipped.
    pub visibility: Vec<u32>,
    /// Actors added since the last flush.
    pub added: Vec<u32>,
    /// Actors removed since the last flush.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl LifecycleChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.mapped.clear();
        self.realized.clear();
        self.visibility.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }
}

impl ActorStore {
    /// Drains all dirty channels and returns the accumulated changes.
    ///
    /// This rebuilds the traversal order first if topology changed.
    pub fn flush_changes(&mut self) -> LifecycleChanges {
        let mut changes = LifecycleChanges::default();
        self.flush_changes_into(&mut changes);
        changes
    }

    /// Like [`flush_changes`](Self::flush_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn flush_changes_into(&mut self, changes: &mut LifecycleChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        changes.mapped = self
            .dirty
            .drain(dirty::MAPPED)
            .deterministic()
            .run()
            .collect();

        changes.realized = self
            .dirty
            .drain(dirty::REALIZED)
            .deterministic()
            .run()
            .collect();

        changes.visibility = self
            .dirty
            .drain(dirty::VISIBILITY)
            .deterministic()
            .run()
            .collect();

        // Drain TOPOLOGY (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`flush_changes`](Self::flush_changes) has been
    /// called at least once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Rebuilds the depth-first pre-order traversal of all live actors.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        // Start from roots.
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::DirectRealizer;
    use crate::sink::NoopSink;

    use super::*;

    #[test]
    fn flush_reports_visibility_and_map_transitions() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let top = store.create_toplevel();
        let child = store.create_actor();
        store.show(top, &mut realizer, &mut sink);
        store.set_toplevel_mapped(top, true, &mut realizer, &mut sink);
        store.add_child(top, child, &mut realizer, &mut sink);
        let _ = store.flush_changes();

        store.show(child, &mut realizer, &mut sink);
        let changes = store.flush_changes();

        assert!(changes.visibility.contains(&child.idx));
        assert!(changes.mapped.contains(&child.idx));
        assert!(changes.realized.contains(&child.idx));
        assert!(!changes.topology_changed);
    }

    #[test]
    fn no_change_flush_returns_empty() {
        let mut store = ActorStore::new();
        let _root = store.create_actor();

        // First flush processes initial creation.
        let _ = store.flush_changes();

        let changes = store.flush_changes();
        assert!(changes.mapped.is_empty());
        assert!(changes.realized.is_empty());
        assert!(changes.visibility.is_empty());
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
        assert!(!changes.topology_changed);
    }

    #[test]
    fn traversal_order_is_depth_first() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let a = store.create_actor();
        let b = store.create_actor();
        let c = store.create_actor();
        let d = store.create_actor();

        // Tree: a -> [b -> [d], c]
        store.add_child(a, b, &mut realizer, &mut sink);
        store.add_child(a, c, &mut realizer, &mut sink);
        store.add_child(b, d, &mut realizer, &mut sink);

        let _ = store.flush_changes();

        let order = store.traversal_order();
        assert_eq!(order, &[a.idx, b.idx, d.idx, c.idx]);
    }

    #[test]
    fn flush_added_and_removed_lifecycle() {
        let mut store = ActorStore::new();
        let id = store.create_actor();

        // First flush: actor should appear in `added`.
        let changes = store.flush_changes();
        assert!(changes.added.contains(&id.idx));
        assert!(changes.removed.is_empty());

        // Second flush: no lifecycle events.
        let changes = store.flush_changes();
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());

        // Destroy: should appear in `removed` on next flush.
        store.destroy_actor(id, &mut DirectRealizer, &mut NoopSink);
        let changes = store.flush_changes();
        assert!(changes.removed.contains(&id.idx));
        assert!(changes.added.is_empty());
    }

    #[test]
    fn flush_into_reuses_buffer() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let a = store.create_actor();
        let b = store.create_actor();

        let mut changes = LifecycleChanges::default();

        // First flush: both actors added.
        store.flush_changes_into(&mut changes);
        assert_eq!(changes.added.len(), 2);

        store.show(a, &mut realizer, &mut sink);
        store.flush_changes_into(&mut changes);

        // Buffer should be cleared and refilled (not accumulating).
        assert!(changes.added.is_empty(), "added should be cleared");
        assert!(
            changes.visibility.contains(&a.idx),
            "visibility change should be present"
        );
        assert!(
            !changes.visibility.contains(&b.idx),
            "unchanged actor should not appear"
        );
    }
}
