// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines export for proscenium lifecycle events.
//!
//! This crate provides [`LifecycleSink`](proscenium_core::sink::LifecycleSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`] — one JSON object per event, for log scraping
//!   and replay tooling.

pub mod json;
pub mod pretty;
