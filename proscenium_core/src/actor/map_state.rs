// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map-state reconciler and its map/unmap primitives.
//!
//! Given an actor and a [`MapStateChange`] directive, the reconciler computes
//! the target realized/mapped state from the actor's visibility and its
//! parent's state, then performs the minimal set of realize/unrealize/
//! map/unmap transitions, recursing into descendants through the executors.
//!
//! # Ordering
//!
//! For one actor the four possible transitions are applied in a strict
//! sequence: unmap, realize, unrealize, map. Realize must precede map and
//! unmap must precede unrealize; combined with the recursive child calls
//! inside the primitives (children-first on unmap, parent-first on map), this
//! unrealizes leaf-first and realizes root-first across the whole tree
//! without a separate walk.
//!
//! # Toplevels
//!
//! The toplevel's mapped flag is driven by the windowing layer through the
//! `MakeMapped`/`MakeUnmapped` directives and never derived from visibility.
//! All other actors derive it structurally from their parent chain.
//!
//! # Reparent suspension
//!
//! While an actor's `in_reparent` flag is set, the unmap and unrealize steps
//! are skipped, so detaching and immediately reattaching a subtree does not
//! thrash realization state.
//!
//! # Failure
//!
//! Nothing here returns an error. Misuse and invariant violations are
//! reported through the [`LifecycleSink`]; internal primitive preconditions
//! are `debug_assert!`s.

use crate::backend::Realizer;
use crate::dirty;
use crate::sink::{LifecycleSink, Property, Severity};

use super::id::{INVALID, PickId};
use super::store::ActorStore;

/// Directive for one reconciliation pass.
///
/// The directive is advisory: it only forces a transition that the
/// structural computation alone would not already produce, and it never
/// violates the lifecycle invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MapStateChange {
    /// Re-derive state from the parent chain; force nothing.
    Check,
    /// The caller wants the actor mapped.
    MakeMapped,
    /// The caller wants the actor unmapped.
    MakeUnmapped,
    /// The caller wants the actor unrealized (and therefore unmapped).
    MakeUnrealized,
}

impl ActorStore {
    /// Brings the actor at `idx` (and, via recursion in the primitives, any
    /// descendants needing the matching transition) into a consistent state.
    pub(crate) fn update_map_state(
        &mut self,
        idx: u32,
        change: MapStateChange,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        let was_mapped = self.flags[idx as usize].mapped;

        if self.state[idx as usize].is_toplevel {
            // The mapped flag on toplevels belongs to the windowing layer;
            // visibility only gates realization here.
            if self.flags[idx as usize].visible {
                self.realize_idx(idx, realizer);
            }

            match change {
                MapStateChange::Check => {}
                MapStateChange::MakeMapped => {
                    debug_assert!(
                        !was_mapped,
                        "windowing layer mapped an already-mapped toplevel"
                    );
                    self.set_mapped(idx, true, realizer, sink);
                }
                MapStateChange::MakeUnmapped => {
                    debug_assert!(
                        was_mapped,
                        "windowing layer unmapped an already-unmapped toplevel"
                    );
                    self.set_mapped(idx, false, realizer, sink);
                }
                MapStateChange::MakeUnrealized => {
                    sink.on_diagnostic(
                        Severity::Warning,
                        self.id_at(idx),
                        "toplevel actors cannot be unrealized through the actor tree",
                    );
                }
            }

            let flags = self.flags[idx as usize];
            if flags.mapped && !flags.visible && !self.state[idx as usize].in_destruction {
                sink.on_diagnostic(
                    Severity::Critical,
                    self.id_at(idx),
                    "toplevel is mapped but not visible",
                );
            }
            return;
        }

        let parent = self.parent[idx as usize];
        let mut should_be_mapped = false;
        let mut may_be_realized = true;
        let mut must_be_realized = false;

        if parent == INVALID {
            may_be_realized = false;
        } else {
            let pf = self.flags[parent as usize];
            if !pf.realized {
                may_be_realized = false;
            }

            if self.flags[idx as usize].visible && change != MapStateChange::MakeUnmapped {
                // A visible+realized toplevel parent counts even while its
                // own mapped flag is still in the windowing layer's hands.
                let parent_is_ready_toplevel =
                    self.state[parent as usize].is_toplevel && pf.visible && pf.realized;
                if pf.mapped || parent_is_ready_toplevel {
                    should_be_mapped = true;
                    must_be_realized = true;
                }
            }
        }

        if self.state[idx as usize].enable_paint_unmapped {
            if parent == INVALID {
                sink.on_diagnostic(
                    Severity::Warning,
                    self.id_at(idx),
                    "enable_paint_unmapped requires a parent",
                );
            } else if !self.state[idx as usize].in_destruction
                && change != MapStateChange::MakeUnmapped
                && change != MapStateChange::MakeUnrealized
            {
                // The override grants realization permission even while the
                // parent chain is still unrealized; realize_idx walks the
                // chain root-first and fails silently if it cannot. Explicit
                // unmap/unrealize directives and destruction take precedence.
                should_be_mapped = true;
                may_be_realized = true;
                must_be_realized = true;
            }
        }

        if change == MapStateChange::MakeMapped && !should_be_mapped {
            if parent == INVALID {
                sink.on_diagnostic(
                    Severity::Warning,
                    self.id_at(idx),
                    "attempted to map an actor with no parent",
                );
            } else {
                sink.on_diagnostic(
                    Severity::Warning,
                    self.id_at(idx),
                    "attempted to map an actor whose parent is not mapped or visible",
                );
            }
        }

        if change == MapStateChange::MakeUnrealized {
            may_be_realized = false;
        }

        let in_reparent = self.state[idx as usize].in_reparent;

        // 1. Unmap before anything can unrealize.
        if !should_be_mapped && !in_reparent {
            self.set_mapped(idx, false, realizer, sink);
        }

        // 2. Realize before mapping.
        if must_be_realized {
            self.realize_idx(idx, realizer);
        }

        // 3. Needing realization implies permission to realize.
        debug_assert!(
            !must_be_realized || may_be_realized,
            "reconciler computed must_be_realized without may_be_realized"
        );

        // 4. Unrealize without touching visibility, leaf-first.
        if !may_be_realized && !in_reparent {
            self.unrealize_not_hiding(idx, realizer);
        }

        // 5. Map last. Realization may have failed; in that case the actor
        //    silently stays unmapped.
        if should_be_mapped && self.flags[idx as usize].realized {
            self.set_mapped(idx, true, realizer, sink);
        }
    }

    /// Flips the mapped flag through the primitives; no-op when unchanged.
    pub(crate) fn set_mapped(
        &mut self,
        idx: u32,
        mapped: bool,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        if self.flags[idx as usize].mapped == mapped {
            return;
        }
        if mapped {
            self.map_internal(idx, realizer, sink);
        } else {
            self.unmap_internal(idx, realizer, sink);
        }
    }

    /// Map primitive: flag, pick id, notification, then children (top-down).
    fn map_internal(
        &mut self,
        idx: u32,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        debug_assert!(
            !self.flags[idx as usize].mapped,
            "map primitive entered on a mapped actor"
        );

        self.flags[idx as usize].mapped = true;
        self.dirty.mark(idx, dirty::MAPPED);

        // Acquire a pick id from the owning toplevel, if attached to one.
        if let Some(top) = self.toplevel_idx_of(idx) {
            if let Some(reg) = self.stage[top as usize].as_mut() {
                let pid = reg.acquire(idx);
                self.pick_ids[idx as usize] = pid.0;
            }
        }

        // Observers see parent-before-child notification order.
        sink.on_notify(self.id_at(idx), Property::Mapped);

        // Children re-enter the map contract, so each transitions only if
        // its own visible flag permits it.
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.map_idx(child, realizer, sink);
            child = next;
        }
    }

    /// Unmap primitive: children first (bottom-up), then flag, paint-volume
    /// invalidation, notification, pick id release, and focus cleanup.
    fn unmap_internal(
        &mut self,
        idx: u32,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        debug_assert!(
            self.flags[idx as usize].mapped,
            "unmap primitive entered on an unmapped actor"
        );

        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.unmap_idx(child, realizer, sink);
            child = next;
        }

        self.flags[idx as usize].mapped = false;
        self.dirty.mark(idx, dirty::MAPPED);
        self.paint_volume[idx as usize] = None;

        // Observers see children-before-parent notification order.
        sink.on_notify(self.id_at(idx), Property::Mapped);

        let top = self.toplevel_idx_of(idx);
        let pid = self.pick_ids[idx as usize];
        if pid != INVALID {
            if let Some(top) = top {
                if let Some(reg) = self.stage[top as usize].as_mut() {
                    reg.release(PickId(pid));
                }
            }
            self.pick_ids[idx as usize] = INVALID;
        }

        if let Some(top) = top {
            if let Some(reg) = self.stage[top as usize].as_mut() {
                if reg.key_focus == idx {
                    reg.key_focus = INVALID;
                }
            }
        }
    }

    /// Map contract on a raw index: no-op if already mapped or not visible.
    pub(crate) fn map_idx(
        &mut self,
        idx: u32,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        if self.flags[idx as usize].mapped || !self.flags[idx as usize].visible {
            return;
        }
        self.update_map_state(idx, MapStateChange::MakeMapped, realizer, sink);
    }

    /// Unmap contract on a raw index: no-op if not mapped.
    pub(crate) fn unmap_idx(
        &mut self,
        idx: u32,
        realizer: &mut dyn Realizer,
        sink: &mut dyn LifecycleSink,
    ) {
        if !self.flags[idx as usize].mapped {
            return;
        }
        self.update_map_state(idx, MapStateChange::MakeUnmapped, realizer, sink);
    }

    /// Realizes the parent chain root-first, then `idx` itself.
    ///
    /// A non-toplevel actor without a realized parent fails silently: the
    /// realizer is never invoked and the flag stays clear. Toplevels realize
    /// at any time.
    pub(crate) fn realize_idx(&mut self, idx: u32, realizer: &mut dyn Realizer) {
        if self.flags[idx as usize].realized {
            return;
        }

        let parent = self.parent[idx as usize];
        if parent != INVALID {
            self.realize_idx(parent, realizer);
        }
        if !self.state[idx as usize].is_toplevel
            && (parent == INVALID || !self.flags[parent as usize].realized)
        {
            return;
        }

        if realizer.realize(self.id_at(idx)) {
            self.flags[idx as usize].realized = true;
            self.dirty.mark(idx, dirty::REALIZED);
        }
    }

    /// Unrealizes the subtree rooted at `idx` leaf-first, without changing
    /// any visible flags.
    pub(crate) fn unrealize_not_hiding(&mut self, idx: u32, realizer: &mut dyn Realizer) {
        if !self.flags[idx as usize].realized {
            return;
        }

        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let next = self.next_sibling[child as usize];
            self.unrealize_not_hiding(child, realizer);
            child = next;
        }

        debug_assert!(
            !self.flags[idx as usize].mapped,
            "unrealizing a mapped actor"
        );
        self.flags[idx as usize].realized = false;
        self.dirty.mark(idx, dirty::REALIZED);
        realizer.unrealize(self.id_at(idx));
    }
}
