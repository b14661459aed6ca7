// ABOUTME: Monotonic render-generation guard for discarding stale fetch results
// ABOUTME: Most recent request wins; in-flight fetches are never cancelled, only ignored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalGrid contributors

//! Render generations.
//!
//! Rapid month navigation can leave a stale fetch in flight. Rather than
//! cancelling it, each render pass takes a ticket from a monotonically
//! increasing sequence and checks the ticket at completion time: only the
//! most recently started render may publish its result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic sequence of render passes.
#[derive(Debug, Default)]
pub struct RenderSequence {
    current: AtomicU64,
}

/// Ticket identifying one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTicket(u64);

impl RenderTicket {
    /// The raw generation number, for stamping responses.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl RenderSequence {
    /// Create a sequence starting at generation zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Start a new render pass, superseding all earlier ones.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` still identifies the most recently started pass.
    /// Called at completion time to decide if the result may be published.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.value()
    }
}
