// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public lifecycle operations: visibility, mapping, realization, topology.
//!
//! Every operation here is a void-returning consistency-restoring procedure:
//! it either completes or reports a diagnostic through the sink, and callers
//! observe the outcome by re-querying actor flags. Once a call returns, no
//! actor violates the lifecycle invariants (they may be transiently false
//! mid-call).
//!
//! All reconciling operations take the backend [`Realizer`] and the
//! [`LifecycleSink`] as explicit collaborators: the store itself is pure
//! data.

use crate::backend::Realizer;
use crate::dirty;
use crate::sink::{LifecycleSink, Property, Severity};

use super::id::{ActorId, INVALID};
use super::map_state::MapStateChange;
use super::store::ActorStore;

impl ActorStore {
    // -- Visibility --

    /// Shows an actor: sets `visible` and reconciles its map state.
    ///
    /// The actor maps as a consequence only if its parent chain permits it
    /// (parent mapped, or a visible realized toplevel).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn show(&mut self, id: ActorId, realizer: &mut dyn Realizer, sink: &mut dyn LifecycleSink) {
        self.validate(id);
        if self.flags[id.idx as usize].visible {
            return;
        }
        self.flags[id.idx as usize].visible = true;
        self.dirty.mark(id.idx, dirty::VISIBILITY);
        sink.on_notify(id, Property::Visible);
        self.update_map_state(id.idx, MapStateChange::Check, realizer, sink);
    }

    /// Hides an actor: clears `visible` and reconciles its map state.
    ///
    /// If the actor was mapped, it (and its mapped descendants, bottom-up)
    /// unmaps; realization is kept while the parent stays realized.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn hide(&mut self, id: ActorId, realizer: &mut dyn Realizer, sink: &mut dyn LifecycleSink) {
        self.validate(id);
        self.hide_idx(id.idx, realizer, sink);
    }

    pub(crate) fn hide_idx(
        &mut self,
        idx: u32,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        if !self.flags[idx as usize].visible {
            return;
        }
        self.flags[idx as usize].visible = false;
        self.dirty.mark(idx, dirty::VISIBILITY);
        sink.on_notify(self.id_at(idx), Property::Visible);
        self.update_map_state(idx, MapStateChange::Check, realizer, sink);
    }

    // -- Mapping --

    /// Maps an actor. No-op if already mapped or not visible.
    ///
    /// If the parent chain forbids mapping, a usage warning is reported and
    /// nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn map(&mut self, id: ActorId, realizer: &mut dyn Realizer, sink: &mut dyn LifecycleSink) {
        self.validate(id);
        self.map_idx(id.idx, realizer, sink);
    }

    /// Unmaps an actor. No-op if not mapped.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn unmap(
        &mut self,
        id: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(id);
        self.unmap_idx(id.idx, realizer, sink);
    }

    /// Sets a toplevel's mapped flag on behalf of the windowing layer.
    ///
    /// This is the only way any actor's mapped flag is set from outside the
    /// reconciler; calling it on a non-toplevel is reported and skipped.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_toplevel_mapped(
        &mut self,
        id: ActorId,
        mapped: bool,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(id);
        if !self.state[id.idx as usize].is_toplevel {
            sink.on_diagnostic(
                Severity::Warning,
                id,
                "set_toplevel_mapped called on a non-toplevel actor",
            );
            return;
        }
        if self.flags[id.idx as usize].mapped == mapped {
            return;
        }
        let change = if mapped {
            MapStateChange::MakeMapped
        } else {
            MapStateChange::MakeUnmapped
        };
        self.update_map_state(id.idx, change, realizer, sink);
    }

    // -- Realization --

    /// Realizes an actor, allocating backend resources for it and its
    /// ancestor chain.
    ///
    /// This only succeeds for actors inside a toplevel's tree (or toplevels
    /// themselves); otherwise it fails silently, which is observable by
    /// re-querying the realized flag. Mapping an actor realizes it
    /// implicitly, so calling this directly is rarely needed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn realize(&mut self, id: ActorId, realizer: &mut dyn Realizer) {
        self.validate(id);
        self.realize_idx(id.idx, realizer);
    }

    /// Unrealizes an actor, releasing the backend resources of its whole
    /// subtree leaf-first.
    ///
    /// A mapped actor cannot stay mapped without resources, so this hides it
    /// first. Toplevels are never unrealized through this path (reported,
    /// skipped). The `enable_paint_unmapped` override yields to this
    /// directive; the actor stays unrealized until the next reconciliation.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn unrealize(
        &mut self,
        id: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(id);
        self.hide_idx(id.idx, realizer, sink);
        self.update_map_state(id.idx, MapStateChange::MakeUnrealized, realizer, sink);
    }

    /// Sets the paint-unmapped override: while enabled, the actor is kept
    /// realized and mapped regardless of normal visibility chaining.
    ///
    /// Requires a parent; the override is reported and has no effect while
    /// the actor is detached. If the parent chain cannot realize, the actor
    /// silently stays unmapped.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_paint_unmapped(
        &mut self,
        id: ActorId,
        enabled: bool,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(id);
        if self.state[id.idx as usize].enable_paint_unmapped == enabled {
            return;
        }
        self.state[id.idx as usize].enable_paint_unmapped = enabled;
        self.update_map_state(id.idx, MapStateChange::Check, realizer, sink);
    }

    // -- Topology --

    /// Adds `child` as the last child of `parent` and reconciles the
    /// subtree's map state under its new ancestry.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `parent` is `child` itself or inside `child`'s subtree.
    pub fn add_child(
        &mut self,
        parent: ActorId,
        child: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            !self.is_self_or_ancestor(child.idx, parent.idx),
            "cannot attach an actor beneath itself"
        );

        self.link_last_child(parent.idx, child.idx);
        self.update_map_state(child.idx, MapStateChange::Check, realizer, sink);
    }

    /// Removes `child` from its current parent.
    ///
    /// The child unmaps (releasing its pick id to the toplevel it is still
    /// attached to at that point) but keeps its realized state, since its
    /// old parent remains realized.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the actor has no parent.
    pub fn remove_from_parent(
        &mut self,
        child: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "actor has no parent"
        );

        // Unmap while still attached, so the pick id can be released.
        self.update_map_state(child.idx, MapStateChange::MakeUnmapped, realizer, sink);
        self.unlink_from_parent(child.idx);
    }

    /// Moves `child` to be a child of `new_parent`, suspending unmap and
    /// unrealize across the detach/reattach.
    ///
    /// When both the old and the new parent are mapped and realized, the
    /// subtree's mapped/realized flags are unchanged by the move and no
    /// transitions run. After relinking, the subtree is reconciled against
    /// the new ancestry.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `new_parent` is `child`
    /// itself or inside `child`'s subtree.
    pub fn reparent(
        &mut self,
        child: ActorId,
        new_parent: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(child);
        self.validate(new_parent);
        assert!(
            !self.is_self_or_ancestor(child.idx, new_parent.idx),
            "cannot attach an actor beneath itself"
        );

        let c = child.idx;
        if self.parent[c as usize] != INVALID {
            // Pick ids are owned per toplevel, so suspension only applies to
            // moves within one stage; crossing stages must unmap to release
            // the id to the registry that issued it.
            let same_stage = self.toplevel_idx_of(c) == self.toplevel_idx_of(new_parent.idx);
            if same_stage {
                self.state[c as usize].in_reparent = true;
            }
            // Suspended (if same stage): the unmap inside is skipped.
            self.update_map_state(c, MapStateChange::MakeUnmapped, realizer, sink);
            self.unlink_from_parent(c);
        }

        self.link_last_child(new_parent.idx, c);
        self.state[c as usize].in_reparent = false;
        self.update_map_state(c, MapStateChange::Check, realizer, sink);
    }

    /// Inserts `child` before `sibling` in the sibling list and reconciles
    /// its map state.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `sibling` is inside `child`'s subtree.
    pub fn insert_before(
        &mut self,
        child: ActorId,
        sibling: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        assert!(
            !self.is_self_or_ancestor(c, s),
            "cannot attach an actor beneath itself"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.update_map_state(c, MapStateChange::Check, realizer, sink);
    }

    // -- Destruction --

    /// Destroys an actor: tears down its map and realization state, detaches
    /// it, and frees its slot for reuse.
    ///
    /// Teardown is irreversible: `in_destruction` is set first so the
    /// reconciler never reports the transient states as violations.
    ///
    /// # Panics
    ///
    /// Panics if the actor has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_actor(
        &mut self,
        id: ActorId,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy actor with children"
        );

        self.state[idx as usize].in_destruction = true;

        if self.state[idx as usize].is_toplevel {
            // The reconciler refuses toplevel unrealization, so teardown
            // bypasses it after the windowing-layer unmap.
            self.hide_idx(idx, realizer, sink);
            if self.flags[idx as usize].mapped {
                self.update_map_state(idx, MapStateChange::MakeUnmapped, realizer, sink);
            }
            if self.flags[idx as usize].realized {
                self.flags[idx as usize].realized = false;
                self.dirty.mark(idx, dirty::REALIZED);
                realizer.unrealize(self.id_at(idx));
            }
            self.stage[idx as usize] = None;
        } else {
            self.hide_idx(idx, realizer, sink);
            self.update_map_state(idx, MapStateChange::MakeUnrealized, realizer, sink);
            if self.parent[idx as usize] != INVALID {
                self.unlink_from_parent(idx);
            }
        }

        self.dirty.remove_key(idx);
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
    }
}
