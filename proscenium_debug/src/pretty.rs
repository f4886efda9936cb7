// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable lifecycle event output.
//!
//! [`PrettyPrintSink`] implements [`LifecycleSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use proscenium_core::actor::ActorId;
use proscenium_core::sink::{LifecycleSink, Property, Severity};

/// Writes human-readable lifecycle lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
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

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warn",
        Severity::Critical => "CRITICAL",
    }
}

impl<W: Write> LifecycleSink for PrettyPrintSink<W> {
    fn on_notify(&mut self, actor: ActorId, property: Property) {
        let _ = writeln!(
            self.writer,
            "[notify] actor={}@gen{} {}",
            actor.index(),
            actor.generation(),
            property_name(property),
        );
    }

    fn on_diagnostic(&mut self, severity: Severity, actor: ActorId, message: &str) {
        let _ = writeln!(
            self.writer,
            "[{}] actor={}@gen{} {message}",
            severity_tag(severity),
            actor.index(),
            actor.generation(),
        );
    }
}
