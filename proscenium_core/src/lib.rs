// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actor tree and map-state reconciliation for scene-graph lifecycles.
//!
//! `proscenium_core` provides the foundational data structures for keeping a
//! tree of visual nodes ("actors") consistent across three lifecycle axes:
//! *visibility* (caller intent), *realization* (backing resources
//! allocated), and *mapping* (actually composited). It is `no_std`
//! compatible (with `alloc`) and uses array-based struct-of-arrays storage
//! with index handles for cache-friendly traversal.
//!
//! # Architecture
//!
//! The crate is organized around a reconciler that turns visibility,
//! parentage, and window-state changes into minimal lifecycle transitions:
//!
//! ```text
//!   show/hide, add_child/reparent, set_toplevel_mapped
//!       │
//!       ▼
//!   map-state reconciler ──► realize/map/unmap/unrealize transitions
//!       │                         │           │
//!       │                         ▼           ▼
//!       │                    Realizer    LifecycleSink
//!       ▼                   (backend)  (notify + diagnostics)
//!   ActorStore::flush_changes() ──► LifecycleChanges ──► Compositor::apply()
//! ```
//!
//! **[`actor`]** — Struct-of-arrays actor tree with generational handles.
//! Visibility and topology are set by the caller; realized and mapped flags
//! are computed by the reconciler, which recurses top-down when mapping and
//! bottom-up when unmapping.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! Lifecycle transitions mark MAPPED/REALIZED/VISIBILITY locally as each
//! flag flips; TOPOLOGY triggers a traversal rebuild.
//!
//! **[`stage`]** — Per-toplevel pick-id pool and key-focus slot. Mapping
//! acquires a pick id from the owning toplevel, unmapping releases it and
//! clears focus held by the unmapped actor.
//!
//! **[`backend`]** — The [`Realizer`](backend::Realizer) seam that concrete
//! actor backends implement for resource allocation, and the
//! [`Compositor`](backend::Compositor) trait for applying flushed changes to
//! native trees.
//!
//! **[`sink`]** — [`LifecycleSink`](sink::LifecycleSink) trait receiving
//! "mapped"/"visible" property notifications (with structural ordering
//! guarantees) and non-fatal diagnostics.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod actor;
pub mod backend;
pub mod dirty;
pub mod sink;
pub mod stage;
