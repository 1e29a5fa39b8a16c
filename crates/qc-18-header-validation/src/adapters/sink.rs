//! Diagnostics sink adapters
//!
//! - [`TracingSink`]: structured `tracing` events, the production default
//! - [`MemorySink`]: captures events for tests and tooling
//! - [`ChannelSink`]: forwards events to a bounded channel, dropping on backpressure
//! - [`FanoutSink`]: forwards to several sinks

use crate::domain::{DiagnosticEvent, DiagnosticKind, DiagnosticLevel, HeaderViolation};
use crate::ports::DiagnosticsSink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Emits events through `tracing` with structured fields
///
/// Bypass events are not re-emitted: the bypassing rule already logged its
/// WARN at the point of suppression.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: DiagnosticEvent) {
        let rule = event.rule.unwrap_or("pipeline");
        let block_number = event.block_number;

        match event.kind {
            DiagnosticKind::Rejected(HeaderViolation::TimestampTooClose {
                timestamp,
                parent_timestamp,
                delta,
                minimum_seconds_since_parent,
            }) => {
                tracing::info!(
                    rule,
                    block_number,
                    timestamp,
                    delta = %delta,
                    parent_timestamp,
                    minimum_seconds_since_parent,
                    "Invalid block header: timestamp {} is only {} seconds newer than parent timestamp {}. Minimum {} seconds",
                    timestamp,
                    delta,
                    parent_timestamp,
                    minimum_seconds_since_parent
                );
            }
            DiagnosticKind::Rejected(violation) => {
                tracing::info!(rule, block_number, "Invalid block header: {}", violation);
            }
            DiagnosticKind::Bypassed(_) => {}
            DiagnosticKind::Fault(fault) => {
                tracing::error!(rule, block_number, "Header validation engine fault: {}", fault);
            }
        }
    }
}

/// In-memory sink for testing
pub struct MemorySink {
    events: RwLock<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }

    pub fn count_at(&self, level: DiagnosticLevel) -> usize {
        self.events
            .read()
            .iter()
            .filter(|event| event.level == level)
            .count()
    }

    pub fn clear(&self) {
        self.events.write().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: DiagnosticEvent) {
        self.events.write().push(event);
    }
}

/// Forwards events over a bounded channel without ever waiting
///
/// Events are dropped when the channel is full or the receiver is gone;
/// [`ChannelSink::dropped`] counts them.
pub struct ChannelSink {
    sender: mpsc::Sender<DiagnosticEvent>,
    dropped: AtomicU64,
}

impl ChannelSink {
    /// A `capacity` of zero is raised to one.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DiagnosticEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                sender,
                dropped: AtomicU64::new(0),
            },
            receiver,
        )
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl DiagnosticsSink for ChannelSink {
    fn record(&self, event: DiagnosticEvent) {
        if self.sender.try_send(event).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Forwards each event to every inner sink
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn DiagnosticsSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn DiagnosticsSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn DiagnosticsSink>) {
        self.sinks.push(sink);
    }
}

impl DiagnosticsSink for FanoutSink {
    fn record(&self, event: DiagnosticEvent) {
        for sink in &self.sinks {
            sink.record(event.clone());
        }
    }
}
