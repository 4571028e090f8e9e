//! Trace options and severity levels

use serde::{Deserialize, Serialize};

/// Severity of a gated write-line call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    Error,
    Warning,
    Info,
    Verbose,
}

impl std::fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceLevel::Error => write!(f, "error"),
            TraceLevel::Warning => write!(f, "warning"),
            TraceLevel::Info => write!(f, "info"),
            TraceLevel::Verbose => write!(f, "verbose"),
        }
    }
}

/// Process-wide trace configuration
///
/// Read on every dispatch, last write wins. Everything defaults to `false`:
/// no severity is gated in, writes are not auto-flushed, and nothing is
/// mirrored until the host application opts in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Broadcast `flush` to every listener after each write-family call
    pub auto_flush: bool,
    /// Duplicate every dispatched call into the `tracing` crate
    pub mirror_to_tracing: bool,
    /// Gate for `write_line_error`
    pub trace_error: bool,
    /// Gate for `write_line_warning`
    pub trace_warning: bool,
    /// Gate for `write_line_info`
    pub trace_info: bool,
    /// Gate for `write_line_verbose`
    pub trace_verbose: bool,
}

impl TraceOptions {
    /// Create options with everything disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gate for `level` is open
    pub fn is_enabled(&self, level: TraceLevel) -> bool {
        match level {
            TraceLevel::Error => self.trace_error,
            TraceLevel::Warning => self.trace_warning,
            TraceLevel::Info => self.trace_info,
            TraceLevel::Verbose => self.trace_verbose,
        }
    }

    /// Set `auto_flush`
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    /// Set `mirror_to_tracing`
    pub fn with_mirror_to_tracing(mut self, mirror: bool) -> Self {
        self.mirror_to_tracing = mirror;
        self
    }

    /// Open or close the gate for a single level
    pub fn with_level(mut self, level: TraceLevel, enabled: bool) -> Self {
        match level {
            TraceLevel::Error => self.trace_error = enabled,
            TraceLevel::Warning => self.trace_warning = enabled,
            TraceLevel::Info => self.trace_info = enabled,
            TraceLevel::Verbose => self.trace_verbose = enabled,
        }
        self
    }

    /// Open every severity gate
    pub fn with_all_levels(self) -> Self {
        self.with_level(TraceLevel::Error, true)
            .with_level(TraceLevel::Warning, true)
            .with_level(TraceLevel::Info, true)
            .with_level(TraceLevel::Verbose, true)
    }
}
