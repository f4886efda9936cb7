// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays actor storage with allocation, topology, and flag access.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::stage::StageRegistry;

use super::id::{ActorId, INVALID};

/// Per-actor public lifecycle flags.
///
/// `visible` records caller intent (show/hide); `realized` and `mapped` are
/// derived by the map-state reconciler and cannot be set directly, except on
/// toplevels whose `mapped` flag is driven by the windowing layer. After any
/// reconciliation, `mapped` implies `realized`, and for non-toplevel actors
/// `mapped` implies `visible`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActorFlags {
    /// Whether the caller wants the actor shown.
    pub visible: bool,
    /// Whether backend resources are allocated.
    pub realized: bool,
    /// Whether the actor is part of the composited output.
    pub mapped: bool,
    /// Whether the actor participates in input picking.
    pub reactive: bool,
}

/// Private transient flags consulted by the reconciler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct StateFlags {
    /// Teardown is in progress and irreversible.
    pub(crate) in_destruction: bool,
    /// This actor is the tree root representing a window.
    pub(crate) is_toplevel: bool,
    /// A reparent is in flight; unmap/unrealize are suspended.
    pub(crate) in_reparent: bool,
    /// Force realization and mapping regardless of visibility chaining.
    pub(crate) enable_paint_unmapped: bool,
}

/// Struct-of-arrays storage for all actors.
///
/// Actors are addressed by [`ActorId`] handles. Internally, each actor
/// occupies a slot in parallel arrays. Destroyed actors are recycled via a
/// free list, and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct ActorStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Lifecycle state --
    pub(crate) flags: Vec<ActorFlags>,
    pub(crate) state: Vec<StateFlags>,
    pub(crate) pick_ids: Vec<u32>,
    pub(crate) paint_volume: Vec<Option<kurbo::Rect>>,

    // -- Stage state (Some only on toplevel slots) --
    pub(crate) stage: Vec<Option<StageRegistry>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ActorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorStore {
    /// Creates an empty actor store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            flags: Vec::new(),
            state: Vec::new(),
            pick_ids: Vec::new(),
            paint_volume: Vec::new(),
            stage: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new actor and returns its handle.
    ///
    /// The actor starts detached, hidden, unrealized, and unmapped; it joins
    /// the tree when attached via [`add_child`](Self::add_child).
    pub fn create_actor(&mut self) -> ActorId {
        self.allocate(StateFlags::default(), None)
    }

    /// Creates a new toplevel actor — the tree root representing a window.
    ///
    /// The toplevel owns the pick-id pool and the key-focus slot for its
    /// tree, and it is the only actor whose mapped flag is set directly by
    /// the windowing layer (via
    /// [`set_toplevel_mapped`](Self::set_toplevel_mapped)) rather than
    /// derived from visibility.
    pub fn create_toplevel(&mut self) -> ActorId {
        self.allocate(
            StateFlags {
                is_toplevel: true,
                ..StateFlags::default()
            },
            Some(StageRegistry::new()),
        )
    }

    fn allocate(&mut self, state: StateFlags, stage: Option<StageRegistry>) -> ActorId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.flags[idx as usize] = ActorFlags::default();
            self.state[idx as usize] = state;
            self.pick_ids[idx as usize] = INVALID;
            self.paint_volume[idx as usize] = None;
            self.stage[idx as usize] = stage;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.flags.push(ActorFlags::default());
            self.state.push(state);
            self.pick_ids.push(INVALID);
            self.paint_volume.push(None);
            self.stage.push(stage);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        ActorId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns whether the given handle refers to a live actor.
    #[must_use]
    pub fn is_alive(&self, id: ActorId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology queries --

    /// Returns the parent of an actor, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent(&self, id: ActorId) -> Option<ActorId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID { None } else { Some(self.id_at(p)) }
    }

    /// Returns the root actors (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<ActorId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.id_at(idx));
            }
        }
        roots
    }

    // -- Flag getters --

    /// Returns the public lifecycle flags of an actor.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn flags(&self, id: ActorId) -> ActorFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether the caller wants the actor shown.
    #[must_use]
    pub fn visible(&self, id: ActorId) -> bool {
        self.flags(id).visible
    }

    /// Returns whether backend resources are allocated for the actor.
    #[must_use]
    pub fn realized(&self, id: ActorId) -> bool {
        self.flags(id).realized
    }

    /// Returns whether the actor is part of the composited output.
    #[must_use]
    pub fn mapped(&self, id: ActorId) -> bool {
        self.flags(id).mapped
    }

    /// Returns whether the actor participates in input picking.
    #[must_use]
    pub fn reactive(&self, id: ActorId) -> bool {
        self.flags(id).reactive
    }

    /// Returns whether the actor is a toplevel.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_toplevel(&self, id: ActorId) -> bool {
        self.validate(id);
        self.state[id.idx as usize].is_toplevel
    }

    /// Sets whether the actor participates in input picking.
    ///
    /// Reactivity has no effect on realization or mapping.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_reactive(&mut self, id: ActorId, reactive: bool) {
        self.validate(id);
        self.flags[id.idx as usize].reactive = reactive;
    }

    // -- Paint-volume cache --

    /// Returns the cached paint-volume bound, if one is set and still valid.
    ///
    /// The cache is invalidated whenever the actor unmaps.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn paint_volume(&self, id: ActorId) -> Option<kurbo::Rect> {
        self.validate(id);
        self.paint_volume[id.idx as usize]
    }

    /// Caches a paint-volume bound computed by the paint layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_paint_volume(&mut self, id: ActorId, bound: Option<kurbo::Rect>) {
        self.validate(id);
        self.paint_volume[id.idx as usize] = bound;
    }

    // -- Raw-index accessors for backends --
    //
    // These accept raw slot indices (as found in `LifecycleChanges`) rather
    // than `ActorId` handles, skipping generation validation. Only use with
    // indices that came from `LifecycleChanges` or `traversal_order()`.

    /// Returns the lifecycle flags at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn flags_at(&self, idx: u32) -> ActorFlags {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.flags[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ActorId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ActorId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a live handle for raw slot `idx`.
    pub(crate) fn id_at(&self, idx: u32) -> ActorId {
        ActorId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Links `c` as the last child of `p` without touching map state.
    pub(crate) fn link_last_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching map state.
    pub(crate) fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::backend::DirectRealizer;
    use crate::sink::NoopSink;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        assert!(store.is_alive(id));
        store.destroy_actor(id, &mut DirectRealizer, &mut NoopSink);
        assert!(!store.is_alive(id));
    }

    #[test]
    fn actors_start_detached_hidden_unrealized_unmapped() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        assert_eq!(store.parent(id), None);
        let flags = store.flags(id);
        assert!(!flags.visible);
        assert!(!flags.realized);
        assert!(!flags.mapped);
        assert!(!flags.reactive);
        assert!(!store.is_toplevel(id));
    }

    #[test]
    fn toplevel_is_flagged() {
        let mut store = ActorStore::new();
        let top = store.create_toplevel();
        assert!(store.is_toplevel(top));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ActorStore::new();
        let id1 = store.create_actor();
        store.destroy_actor(id1, &mut DirectRealizer, &mut NoopSink);
        let id2 = store.create_actor();
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn add_child_and_query() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let parent = store.create_actor();
        let child1 = store.create_actor();
        let child2 = store.create_actor();

        store.add_child(parent, child1, &mut realizer, &mut sink);
        store.add_child(parent, child2, &mut realizer, &mut sink);

        assert_eq!(store.parent(child1), Some(parent));
        assert_eq!(store.parent(child2), Some(parent));

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0], child1);
        assert_eq!(kids[1], child2);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let parent = store.create_actor();
        let child = store.create_actor();

        store.add_child(parent, child, &mut realizer, &mut sink);
        assert_eq!(store.parent(child), Some(parent));

        store.remove_from_parent(child, &mut realizer, &mut sink);
        assert_eq!(store.parent(child), None);
        assert!(store.children(parent).next().is_none());
    }

    #[test]
    fn insert_before_works() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let parent = store.create_actor();
        let a = store.create_actor();
        let b = store.create_actor();
        let c = store.create_actor();

        store.add_child(parent, a, &mut realizer, &mut sink);
        store.add_child(parent, c, &mut realizer, &mut sink);
        store.insert_before(b, c, &mut realizer, &mut sink);

        let kids: Vec<_> = store.children(parent).collect();
        assert_eq!(kids, [a, b, c]);
    }

    #[test]
    fn roots_returns_parentless_actors() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let a = store.create_actor();
        let b = store.create_actor();
        let c = store.create_actor();

        store.add_child(a, c, &mut realizer, &mut sink);

        let roots = store.roots();
        assert!(roots.contains(&a));
        assert!(roots.contains(&b));
        assert!(!roots.contains(&c));
    }

    #[test]
    #[should_panic(expected = "cannot attach an actor beneath itself")]
    fn add_child_to_self_panics() {
        let mut store = ActorStore::new();
        let a = store.create_actor();
        store.add_child(a, a, &mut DirectRealizer, &mut NoopSink);
    }

    #[test]
    #[should_panic(expected = "cannot attach an actor beneath itself")]
    fn reparent_into_own_subtree_panics() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let root = store.create_actor();
        let a = store.create_actor();
        let b = store.create_actor();
        store.add_child(root, a, &mut realizer, &mut sink);
        store.add_child(a, b, &mut realizer, &mut sink);
        store.reparent(a, b, &mut realizer, &mut sink);
    }

    #[test]
    #[should_panic(expected = "cannot attach an actor beneath itself")]
    fn insert_before_own_descendant_panics() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let a = store.create_actor();
        let b = store.create_actor();
        store.add_child(a, b, &mut realizer, &mut sink);
        store.insert_before(a, b, &mut realizer, &mut sink);
    }

    #[test]
    #[should_panic(expected = "cannot destroy actor with children")]
    fn destroy_with_children_panics() {
        let mut store = ActorStore::new();
        let mut realizer = DirectRealizer;
        let mut sink = NoopSink;

        let parent = store.create_actor();
        let child = store.create_actor();
        store.add_child(parent, child, &mut realizer, &mut sink);
        store.destroy_actor(parent, &mut realizer, &mut sink);
    }

    #[test]
    #[should_panic(expected = "stale ActorId")]
    fn destroyed_handle_panics_on_flags() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        store.destroy_actor(id, &mut DirectRealizer, &mut NoopSink);
        let _ = store.flags(id);
    }

    #[test]
    #[should_panic(expected = "stale ActorId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut store = ActorStore::new();
        let root = store.create_actor();
        let id = store.create_actor();
        store.destroy_actor(id, &mut DirectRealizer, &mut NoopSink);
        store.add_child(root, id, &mut DirectRealizer, &mut NoopSink);
    }

    #[test]
    fn set_reactive_roundtrips() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        assert!(!store.reactive(id));
        store.set_reactive(id, true);
        assert!(store.reactive(id));
    }

    #[test]
    fn paint_volume_cache_roundtrips() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        assert_eq!(store.paint_volume(id), None);
        let bound = kurbo::Rect::new(0.0, 0.0, 64.0, 32.0);
        store.set_paint_volume(id, Some(bound));
        assert_eq!(store.paint_volume(id), Some(bound));
    }
}
