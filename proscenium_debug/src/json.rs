// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines lifecycle event export.
//!
//! [`JsonLinesSink`] writes one JSON object per event, suitable for log
//! scraping or feeding into replay tooling. Actor identity is flattened to
//! the raw slot index plus generation so that lines are self-contained.

use std::io::Write;

use serde_json::json;

use proscenium_core::actor::ActorId;
use proscenium_core::sink::{LifecycleSink, Property, Severity};

/// Writes one JSON object per lifecycle event to a
/// [`Write`](std::io::Write) destination.
pub struct JsonLinesSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl JsonLinesSink {
    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn property_name(property: Property) -> &'static str {
    match property {
        Property::Mapped => "mapped",
        Property::Visible => "visible",
    }
}

fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Critical => "critical",
    }
}

impl<W: Write> LifecycleSink for JsonLinesSink<W> {
    fn on_notify(&mut self, actor: ActorId, property: Property) {
        let line = json!({
            "type": "notify",
            "actor": actor.index(),
            "generation": actor.generation(),
            "property": property_name(property),
        });
        let _ = writeln!(self.writer, "{line}");
    }

    fn on_diagnostic(&mut self, severity: Severity, actor: ActorId, message: &str) {
        let line = json!({
            "type": "diagnostic",
            "severity": severity_name(severity),
            "actor": actor.index(),
            "generation": actor.generation(),
            "message": message,
        });
        let _ = writeln!(self.writer, "{line}");
    }
}
