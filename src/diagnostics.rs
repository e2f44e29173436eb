/*!
 * Diagnostic sinks for the conversion pipeline.
 *
 * The pipeline never writes to the logger directly. Each converter owns a
 * sink configured with its own level, so two conversions running side by
 * side can report at different verbosities, and tests can capture exactly
 * what a run reported.
 */

use log::{Level, LevelFilter};
use parking_lot::Mutex;

/// Receiver of leveled, human-readable pipeline messages
///
/// Messages are purely observational: nothing a sink does feeds back into
/// the conversion.
pub trait DiagnosticSink: Send + Sync {
    /// Whether messages at `level` will be kept
    fn enabled(&self, level: Level) -> bool;

    /// Record a message
    fn emit(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }
}

/// Sink that forwards to the `log` facade
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: LevelFilter,
}

impl LogSink {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

impl DiagnosticSink for LogSink {
    fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn emit(&self, level: Level, message: &str) {
        if self.enabled(level) {
            log::log!(target: "json3vtt", level, "{}", message);
        }
    }
}

/// Sink that keeps every enabled message in memory
#[derive(Debug)]
pub struct MemorySink {
    level: LevelFilter,
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything recorded so far
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().clone()
    }

    /// Messages recorded at exactly `level`
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any recorded message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(LevelFilter::Trace)
    }
}

impl DiagnosticSink for MemorySink {
    fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    fn emit(&self, level: Level, message: &str) {
        if self.enabled(level) {
            self.records.lock().push((level, message.to_string()));
        }
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }

    fn emit(&self, level: Level, message: &str) {
        (**self).emit(level, message)
    }
}
