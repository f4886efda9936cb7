// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actor and pick identity types.

use core::fmt;

/// Sentinel value indicating "no actor" or "no pick id" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an actor in an [`ActorStore`](super::ActorStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an actor is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter — must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl ActorId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({}@gen{})", self.idx, self.generation)
    }
}

/// A small integer handle assigned to a mapped actor for hit-testing and
/// selection, owned by the toplevel's [`StageRegistry`](crate::stage::StageRegistry).
///
/// A pick id is held if and only if the actor is mapped: mapping acquires a
/// fresh id from the owning toplevel, unmapping releases exactly that id.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PickId(pub u32);

impl fmt::Debug for PickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PickId({})", self.0)
    }
}
