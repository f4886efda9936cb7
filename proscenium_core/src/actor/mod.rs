// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actor tree data model.
//!
//! An *actor* is a node in a scene tree. Each actor has:
//!
//! - An identity ([`ActorId`]) — a generational handle that becomes stale
//!   when the actor is destroyed, preventing use-after-free bugs at the API
//!   level.
//! - Topology — parent, first-child, and sibling links forming an ordered
//!   tree; sibling order is paint/traversal order.
//! - **Lifecycle flags** ([`ActorFlags`]) along three axes: `visible` is
//!   caller intent, set through [`show`](ActorStore::show)/
//!   [`hide`](ActorStore::hide); `realized` and `mapped` are derived by the
//!   map-state reconciler from visibility and ancestry, with the toplevel's
//!   `mapped` flag driven externally by the windowing layer.
//!
//! Actors are stored in struct-of-arrays layout with index-based handles for
//! cache-friendly traversal.
//!
//! # Invariants
//!
//! After every public operation returns:
//!
//! 1. `mapped` implies `realized`.
//! 2. For non-toplevels, `mapped` implies `visible`.
//! 3. For non-toplevels with a parent, `mapped` implies the parent is mapped
//!    or a visible realized toplevel.
//! 4. An unrealized parent never has a realized child (reparent suspension
//!    excepted, transiently).
//!
//! # Dirty tracking
//!
//! Lifecycle transitions automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)); [`ActorStore::flush_changes`] drains them
//! into a [`LifecycleChanges`] batch for backends.

mod changes;
mod id;
mod lifecycle;
mod map_state;
mod store;
mod traverse;

pub use changes::LifecycleChanges;
pub use id::{ActorId, INVALID, PickId};
pub use store::{ActorFlags, ActorStore};
pub use traverse::Children;
