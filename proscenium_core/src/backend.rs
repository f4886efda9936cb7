// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Proscenium splits platform-specific work out of the core. A backend crate
//! provides the following pieces:
//!
//! - **Realizer** — Implements the [`Realizer`] trait to allocate and release
//!   the backing resources an actor needs to render (GL textures, native
//!   windows, DOM nodes). The core decides *when* realization happens; the
//!   realizer decides *what* it means and whether it succeeded.
//!
//! - **Compositor** — Implements the [`Compositor`] trait to apply flushed
//!   [`LifecycleChanges`] to a platform-native tree.
//!
//! - **Window state** — Drives the toplevel's mapped flag through
//!   [`ActorStore::set_toplevel_mapped`](crate::actor::ActorStore::set_toplevel_mapped)
//!   from native window-system events. The core never derives a toplevel's
//!   mapped state from its visibility.
//!
//! # Crate boundaries
//!
//! `proscenium_core` owns the actor tree, the map-state reconciler, and this
//! contract module. Backend crates depend on `proscenium_core` and provide
//! platform glue. Application code depends on both and wires them together.

use crate::actor::{ActorId, ActorStore, LifecycleChanges};

/// Allocates and releases backend resources for actors.
///
/// The reconciler calls [`realize`](Self::realize) exactly when an actor must
/// be realized and [`unrealize`](Self::unrealize) exactly when it may no
/// longer be; callers outside the core never invoke these directly.
///
/// Realization is allowed to fail: returning `false` leaves the actor
/// unrealized, and the reconciler will then leave it unmapped without
/// reporting an error.
pub trait Realizer {
    /// Allocates resources for `actor`. Returns whether realization
    /// succeeded.
    fn realize(&mut self, actor: ActorId) -> bool {
        _ = actor;
        true
    }

    /// Releases the resources held by `actor`.
    ///
    /// Called only on realized actors, leaf-first.
    fn unrealize(&mut self, actor: ActorId) {
        _ = actor;
    }
}

/// A [`Realizer`] with no resources to allocate; realization always succeeds.
///
/// Suitable for headless use and tests, where the realized flag itself is the
/// only backing state.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectRealizer;

impl Realizer for DirectRealizer {}

/// Applies flushed lifecycle changes to a platform-native presentation tree.
///
/// A typical frame callback wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_frame() {
///     // Mutate: visibility, parentage, window state...
///     store.show(actor, &mut realizer, &mut sink);
///
///     // Flush: drain dirty channels into per-category change lists
///     let changes = store.flush_changes();
///
///     // Present: apply incremental changes to the native tree
///     compositor.apply(&store, &changes);
/// }
/// ```
pub trait Compositor {
    /// Applies the given [`LifecycleChanges`] to the backing presentation
    /// tree, reading current flag values from `store` as needed.
    fn apply(&mut self, store: &ActorStore, changes: &LifecycleChanges);
}
