// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications and diagnostics.
//!
//! This module provides a [`LifecycleSink`] trait with per-event methods that
//! the actor tree calls during lifecycle transitions. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! Two kinds of events flow through the same sink:
//!
//! - **Notifications** ([`LifecycleSink::on_notify`]) — property-change
//!   announcements with a structural ordering contract:
//!   [`Property::Mapped`] is emitted exactly once per map/unmap transition,
//!   parent-before-children when mapping and children-before-parent when
//!   unmapping.
//!
//! - **Diagnostics** ([`LifecycleSink::on_diagnostic`]) — invariant-violation
//!   and misuse reports. These indicate a caller bug, never a system fault;
//!   the tree continues with the computed state and nothing is raised to the
//!   caller.

use crate::actor::ActorId;

/// A notifiable actor property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// The mapped flag changed. Read the current value back from the store.
    Mapped,
    /// The visible flag changed via show/hide.
    Visible,
}

/// Severity of a diagnostic report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Misuse of the lifecycle API; the offending operation was skipped.
    Warning,
    /// A lifecycle invariant does not hold after reconciliation.
    Critical,
}

/// Receives lifecycle notifications and diagnostics from the actor tree.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait LifecycleSink {
    /// Called when a notifiable property of `actor` changes.
    fn on_notify(&mut self, actor: ActorId, property: Property) {
        _ = (actor, property);
    }

    /// Called when the tree detects misuse or an invariant violation.
    ///
    /// `message` is a static description; `actor` is the offending actor.
    fn on_diagnostic(&mut self, severity: Severity, actor: ActorId, message: &str) {
        _ = (severity, actor, message);
    }
}

/// A [`LifecycleSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl LifecycleSink for NoopSink {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorStore;

    #[test]
    fn noop_sink_compiles() {
        let mut store = ActorStore::new();
        let id = store.create_actor();
        let mut sink = NoopSink;
        sink.on_notify(id, Property::Mapped);
        sink.on_diagnostic(Severity::Warning, id, "nothing happened");
    }
}
