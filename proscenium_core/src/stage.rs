// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-toplevel stage state: the pick-id pool and the key-focus slot.
//!
//! Every toplevel actor owns one [`StageRegistry`]. The registry hands out
//! small integer [`PickId`]s to mapped descendants and reclaims them on
//! unmap; released ids are recycled via a free list, so the pool stays dense
//! under churn. The registry also tracks which actor (if any) currently holds
//! key focus on that toplevel; unmapping the focused actor clears the slot.
//!
//! The core's contract with the registry is strictly acquire-on-map /
//! release-on-unmap, at most one outstanding id per actor.

use alloc::vec::Vec;

use crate::actor::{ActorId, ActorStore, INVALID, PickId};

/// Pick-id pool and key-focus slot owned by a toplevel actor.
#[derive(Debug)]
pub struct StageRegistry {
    /// Pick id → actor slot index; `INVALID` when the id is free.
    entries: Vec<u32>,
    /// Released ids available for reuse.
    free: Vec<u32>,
    /// Number of ids ever handed out (entries length as `u32`).
    len: u32,
    /// Slot index of the actor holding key focus; `INVALID` for none.
    pub(crate) key_focus: u32,
}

impl Default for StageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
            key_focus: INVALID,
        }
    }

    /// Hands out a pick id for the actor at slot `actor_idx`.
    pub(crate) fn acquire(&mut self, actor_idx: u32) -> PickId {
        if let Some(id) = self.free.pop() {
            debug_assert!(
                self.entries[id as usize] == INVALID,
                "recycled pick id still in use"
            );
            self.entries[id as usize] = actor_idx;
            PickId(id)
        } else {
            let id = self.len;
            self.len += 1;
            self.entries.push(actor_idx);
            PickId(id)
        }
    }

    /// Reclaims a pick id, making it available for reuse.
    pub(crate) fn release(&mut self, id: PickId) {
        debug_assert!(
            id.0 < self.len && self.entries[id.0 as usize] != INVALID,
            "released a pick id that was not outstanding"
        );
        self.entries[id.0 as usize] = INVALID;
        self.free.push(id.0);
    }

    /// Returns the actor slot currently holding `id`, if any.
    pub(crate) fn actor_at(&self, id: PickId) -> Option<u32> {
        if id.0 < self.len && self.entries[id.0 as usize] != INVALID {
            Some(self.entries[id.0 as usize])
        } else {
            None
        }
    }

    /// Returns the number of outstanding pick ids.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.entries.len() - self.free.len()
    }
}

impl ActorStore {
    /// Returns the pick id currently held by an actor, if it is mapped.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn pick_id(&self, id: ActorId) -> Option<PickId> {
        self.validate(id);
        let pid = self.pick_ids[id.idx as usize];
        if pid == INVALID { None } else { Some(PickId(pid)) }
    }

    /// Resolves a pick id handed out by `toplevel` back to its actor.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `toplevel` is not a toplevel.
    #[must_use]
    pub fn actor_for_pick_id(&self, toplevel: ActorId, pick: PickId) -> Option<ActorId> {
        self.validate(toplevel);
        assert!(
            self.state[toplevel.idx as usize].is_toplevel,
            "pick ids live on toplevel actors"
        );
        let reg = self.stage[toplevel.idx as usize].as_ref()?;
        reg.actor_at(pick).map(|idx| self.id_at(idx))
    }

    /// Sets (or clears, with `None`) the key-focus actor of `toplevel`.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or `toplevel` is not a toplevel.
    pub fn set_key_focus(&mut self, toplevel: ActorId, actor: Option<ActorId>) {
        self.validate(toplevel);
        if let Some(a) = actor {
            self.validate(a);
        }
        assert!(
            self.state[toplevel.idx as usize].is_toplevel,
            "key focus lives on toplevel actors"
        );
        if let Some(reg) = self.stage[toplevel.idx as usize].as_mut() {
            reg.key_focus = actor.map_or(INVALID, |a| a.idx);
        }
    }

    /// Returns the actor currently holding key focus on `toplevel`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `toplevel` is not a toplevel.
    #[must_use]
    pub fn key_focus(&self, toplevel: ActorId) -> Option<ActorId> {
        self.validate(toplevel);
        assert!(
            self.state[toplevel.idx as usize].is_toplevel,
            "key focus lives on toplevel actors"
        );
        let reg = self.stage[toplevel.idx as usize].as_ref()?;
        if reg.key_focus == INVALID {
            None
        } else {
            Some(self.id_at(reg.key_focus))
        }
    }
}
