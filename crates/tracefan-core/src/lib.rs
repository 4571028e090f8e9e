//! Tracefan Core
//!
//! Ordered trace fan-out: every write-family call on a [`Tracer`] is
//! forwarded to each registered [`TraceListener`] in registration order.
//! Where the output actually goes (console, file, memory, nothing) is
//! entirely up to the listeners.
//!
//! ```rust
//! use std::sync::Arc;
//! use tracefan_core::{MemoryListener, TraceLevel, Tracer};
//!
//! let tracer = Tracer::new();
//! let capture = Arc::new(MemoryListener::new());
//! tracer.add_listener(capture.clone());
//! tracer.update_options(|o| o.trace_warning = true);
//!
//! tracer.write_line("starting").unwrap();
//! tracer.write_line_warning("low disk").unwrap();
//! assert_eq!(capture.entries(), vec!["starting".to_string(), "low disk".to_string()]);
//! ```
//!
//! ## Global tracer and macros
//!
//! [`global()`] returns a process-wide [`Tracer`]. The `trace_write!` /
//! `trace_writeln!` macro family formats its arguments and dispatches
//! through it, discarding listener failures (tracing is best-effort and
//! must never take the caller down):
//!
//! ```rust
//! use tracefan_core::trace_writeln;
//!
//! trace_writeln!("accepted connection from {}", "10.0.0.7");
//! ```
//!
//! ## Disabling tracing at compile time
//!
//! The `trace` feature (on by default) controls the macro family. Building
//! with `default-features = false` replaces every macro expansion with `()`:
//! format arguments are never evaluated and no registry or options are
//! touched, so disabled call sites cost nothing. The [`Tracer`] API itself
//! remains available either way.

pub mod listener;
pub mod options;
pub mod registry;
pub mod tracer;

// Re-export commonly used types
pub use listener::{
    ConsoleListener, FileListener, ListenerError, ListenerResult, MemoryListener, NoOpListener,
    SharedListener, TraceListener,
};
pub use options::{TraceLevel, TraceOptions};
pub use registry::ListenerRegistry;
pub use tracer::{global, DispatchError, ListenerFailure, Tracer};

/// Write a formatted message to the global tracer, without a newline
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_write {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_write {
    ($($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write_line(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln {
    ($($arg:tt)*) => {
        ()
    };
}

/// Write a formatted message to the global tracer when `$cond` is true
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_write_if {
    ($cond:expr, $($arg:tt)*) => {{
        if $cond {
            let _ = $crate::global().write(&format!($($arg)*));
        }
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_write_if {
    ($cond:expr, $($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer when `$cond` is true
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln_if {
    ($cond:expr, $($arg:tt)*) => {{
        if $cond {
            let _ = $crate::global().write_line(&format!($($arg)*));
        }
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln_if {
    ($cond:expr, $($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer when its `trace_error` gate is open
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln_error {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write_line_error(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln_error {
    ($($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer when its `trace_warning` gate is open
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln_warning {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write_line_warning(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln_warning {
    ($($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer when its `trace_info` gate is open
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln_info {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write_line_info(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln_info {
    ($($arg:tt)*) => {
        ()
    };
}

/// Write a formatted line to the global tracer when its `trace_verbose` gate is open
///
/// Expands to `()` when the `trace` feature is disabled.
#[cfg(feature = "trace")]
#[macro_export]
macro_rules! trace_writeln_verbose {
    ($($arg:tt)*) => {{
        let _ = $crate::global().write_line_verbose(&format!($($arg)*));
    }};
}

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace_writeln_verbose {
    ($($arg:tt)*) => {
        ()
    };
}
