// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Proscenium uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! record which actors changed lifecycle state between
//! [`flush_changes`](crate::actor::ActorStore::flush_changes) calls. Each
//! channel represents an independent category of change.
//!
//! # Propagation semantics
//!
//! Unlike inherited visual properties, lifecycle transitions are applied to
//! every affected actor individually by the reconciler's own recursion, so no
//! channel here uses eager dependency propagation:
//!
//! - **Local** — [`MAPPED`], [`REALIZED`], and [`VISIBILITY`] are marked on
//!   the exact actor whose flag flipped, at the moment it flips. A cascading
//!   unmap marks each descendant as its own flag clears.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, reparent, create/destroy actor). It triggers a
//!   traversal-order rebuild during the next flush.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`ActorStore::flush_changes`](crate::actor::ActorStore::flush_changes)
//! call drains all channels and surfaces the results as
//! [`LifecycleChanges`](crate::actor::LifecycleChanges), which backends
//! [consume](crate::backend::Compositor::apply) to apply incremental updates.

use understory_dirty::Channel;

/// Mapped flag flipped — the actor entered or left the composited output.
pub const MAPPED: Channel = Channel::new(0);

/// Realized flag flipped — backing resources were allocated or released.
pub const REALIZED: Channel = Channel::new(1);

/// Visible flag flipped — caller intent changed via show/hide.
pub const VISIBILITY: Channel = Channel::new(2);

/// Tree topology changed — triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(3);
