//! Sinks: the platform side that persists or displays each framed line.
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use super::types::SinkRoute;
use crate::error::SinkError;

/// Destination for framed lines.
///
/// One method per [`SinkRoute`]. Each call carries a single line; a framed
/// record arrives as several calls in order. Implementations own their
/// display, persistence and truncation policy.
#[cfg_attr(test, mockall::automock)]
pub trait Sink: Send + Sync {
    /// Write a line on the verbose route (also used for debug).
    fn verbose(&self, tag: &str, line: &str);
    /// Write a line on the info route.
    fn info(&self, tag: &str, line: &str);
    /// Write a line on the warn route.
    fn warn(&self, tag: &str, line: &str);
    /// Write a line on the error route.
    fn error(&self, tag: &str, line: &str);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn verbose(&self, tag: &str, line: &str) {
        (**self).verbose(tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        (**self).info(tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        (**self).warn(tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        (**self).error(tag, line);
    }
}

/// Send one line to the sink method selected by `route`.
pub fn emit_line(sink: &dyn Sink, route: SinkRoute, tag: &str, line: &str) {
    match route {
        SinkRoute::Verbose => sink.verbose(tag, line),
        SinkRoute::Info => sink.info(tag, line),
        SinkRoute::Warn => sink.warn(tag, line),
        SinkRoute::Error => sink.error(tag, line),
    }
}

/// Writes `<L>/<tag>: <line>` records to a writer, stderr by default.
///
/// `L` is the route letter (`V`, `I`, `W`, `E`). Write failures are dropped
/// by the [`Sink`] methods; call [`ConsoleSink::write_line`] to observe them.
pub struct ConsoleSink<W: Write + Send = std::io::Stderr> {
    out: Mutex<W>,
}

impl ConsoleSink {
    /// Console sink writing to the process's stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    /// Console sink writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Write one record and flush.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Write`] if the writer fails.
    pub fn write_line(&self, route: SinkRoute, tag: &str, line: &str) -> Result<(), SinkError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{}/{tag}: {line}", route.letter())
            .and_then(|()| out.flush())
            .map_err(|source| SinkError::Write {
                tag: tag.to_string(),
                source,
            })
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_or_drop(&self, route: SinkRoute, tag: &str, line: &str) {
        if let Err(e) = self.write_line(route, tag, line) {
            tracing::trace!(target: "framelog::internal", error = %e, "console sink dropped a line");
        }
    }
}

impl<W: Write + Send> std::fmt::Debug for ConsoleSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn verbose(&self, tag: &str, line: &str) {
        self.write_or_drop(SinkRoute::Verbose, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.write_or_drop(SinkRoute::Info, tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        self.write_or_drop(SinkRoute::Warn, tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        self.write_or_drop(SinkRoute::Error, tag, line);
    }
}

/// Forwards each line as a [`tracing`] event under the `framelog::sink` target.
///
/// The verbose route maps to `TRACE`, the others to their namesake level.
/// Pair it with [`init_subscriber`](super::subscriber::init_subscriber) for
/// logcat-style console output, or with any other subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn verbose(&self, tag: &str, line: &str) {
        tracing::trace!(target: "framelog::sink", tag, "{line}");
    }

    fn info(&self, tag: &str, line: &str) {
        tracing::info!(target: "framelog::sink", tag, "{line}");
    }

    fn warn(&self, tag: &str, line: &str) {
        tracing::warn!(target: "framelog::sink", tag, "{line}");
    }

    fn error(&self, tag: &str, line: &str) {
        tracing::error!(target: "framelog::sink", tag, "{line}");
    }
}

/// A line captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkRecord {
    /// Sink method that received the line.
    pub route: SinkRoute,
    /// Tag passed with the line.
    pub tag: String,
    /// The line itself.
    pub line: String,
}

/// Sink that keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SinkRecord>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    #[must_use]
    pub fn records(&self) -> Vec<SinkRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the lines, in arrival order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.line).collect()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, route: SinkRoute, tag: &str, line: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkRecord {
                route,
                tag: tag.to_string(),
                line: line.to_string(),
            });
    }
}

impl Sink for MemorySink {
    fn verbose(&self, tag: &str, line: &str) {
        self.push(SinkRoute::Verbose, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.push(SinkRoute::Info, tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        self.push(SinkRoute::Warn, tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        self.push(SinkRoute::Error, tag, line);
    }
}
