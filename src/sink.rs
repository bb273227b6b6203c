//! Warning channel for non-fatal configuration problems.
//!
//! The store never logs through a global directly; a [`LogSink`] is injected
//! at construction. Hosts that already run a `tracing` subscriber get the
//! default [`TracingSink`] for free.

/// Receives warning-level messages from a store: missing sections, invalid
/// or missing keys that fell back to their default, and persist failures.
///
/// The message text is informational; only the occurrence is contractual.
pub trait LogSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the host's `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
