//! Diagnostics passed explicitly into compile, match and apply calls.
//!
//! Nothing in semgraft logs through global state. Callers hand a
//! `&mut dyn DiagnosticSink` to the operation they run; the sink decides
//! whether diagnostics are dropped, collected or forwarded to `tracing`.

use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// Component that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Compile,
    Match,
    Surgery,
    Codec,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Compile => "compile",
            Stage::Match => "match",
            Stage::Surgery => "surgery",
            Stage::Codec => "codec",
        };
        f.write_str(name)
    }
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
        }
    }
}

/// Receiver of diagnostics, scoped to one call.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    /// Whether diagnostics of this severity are wanted. Producers skip
    /// formatting messages the sink would discard.
    fn enabled(&self, _severity: Severity) -> bool {
        true
    }
}

impl dyn DiagnosticSink + '_ {
    /// Emit a lazily formatted diagnostic.
    pub fn report(&mut self, severity: Severity, stage: Stage, message: impl FnOnce() -> String) {
        if self.enabled(severity) {
            self.emit(Diagnostic::new(severity, stage, message()));
        }
    }

    pub fn debug(&mut self, stage: Stage, message: impl FnOnce() -> String) {
        self.report(Severity::Debug, stage, message);
    }

    pub fn info(&mut self, stage: Stage, message: impl FnOnce() -> String) {
        self.report(Severity::Info, stage, message);
    }

    pub fn warning(&mut self, stage: Stage, message: impl FnOnce() -> String) {
        self.report(Severity::Warning, stage, message);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}

    fn enabled(&self, _severity: Severity) -> bool {
        false
    }
}

/// Sink that collects diagnostics at or above a minimum severity.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    min_severity: Severity,
    entries: Vec<Diagnostic>,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticLog {
    /// Collect every diagnostic.
    pub fn new() -> Self {
        Self::with_min_severity(Severity::Debug)
    }

    pub fn with_min_severity(min_severity: Severity) -> Self {
        Self {
            min_severity,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Messages emitted by one stage, in order.
    pub fn messages(&self, stage: Stage) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|d| d.stage == stage)
            .map(|d| d.message.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity >= self.min_severity {
            self.entries.push(diagnostic);
        }
    }

    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }
}

/// Sink that forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let stage = diagnostic.stage;
        match diagnostic.severity {
            Severity::Debug => tracing::debug!(%stage, "{}", diagnostic.message),
            Severity::Info => tracing::info!(%stage, "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(%stage, "{}", diagnostic.message),
        }
    }

    fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Severity::Info => tracing::enabled!(tracing::Level::INFO),
            Severity::Warning => tracing::enabled!(tracing::Level::WARN),
        }
    }
}
