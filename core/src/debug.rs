//! Debug output collaborator.
//!
//! The client never writes to a process-wide logger on its own. When debug
//! output is enabled it hands each line to a `DebugSink`; the default sink
//! forwards to the `log` facade, which is a no-op until the application
//! installs a logger.

/// Receives diagnostic lines from `UbersmithClient`.
///
/// `record` returns nothing, so a sink cannot fail a call.
pub trait DebugSink: Send + Sync {
    fn record(&self, line: &str);
}

/// Forwards lines to `log::debug!` under the `ubersmith` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn record(&self, line: &str) {
        log::debug!(target: "ubersmith", "{line}");
    }
}

impl<F> DebugSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn record(&self, line: &str) {
        self(line)
    }
}
