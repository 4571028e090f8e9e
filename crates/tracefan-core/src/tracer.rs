//! The trace fan-out facade
//!
//! A [`Tracer`] forwards every write-family call to each listener in its
//! registry, in registration order. Instances are explicit so tests can
//! isolate them; [`global`] exposes the process-wide instance used by the
//! `trace_write!`/`trace_writeln!` macro family.

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use crate::listener::{ListenerError, SharedListener};
use crate::options::{TraceLevel, TraceOptions};
use crate::registry::ListenerRegistry;

/// A single listener's failure during a broadcast
#[derive(Debug, Error)]
#[error("listener `{listener}` failed: {error}")]
pub struct ListenerFailure {
    /// Name of the failing listener
    pub listener: String,
    /// What went wrong
    #[source]
    pub error: ListenerError,
}

/// Failures collected over one broadcast
///
/// A failing listener never stops the broadcast: every remaining listener
/// still receives the call, and all failures are reported here together.
#[derive(Debug, Error)]
#[error("trace dispatch failed for {} listener(s)", .failures.len())]
pub struct DispatchError {
    /// One entry per failing listener, in dispatch order
    pub failures: Vec<ListenerFailure>,
}

impl DispatchError {
    fn from_failures(failures: Vec<ListenerFailure>) -> Result<(), Self> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self { failures })
        }
    }
}

#[derive(Clone, Copy)]
enum WriteKind {
    Fragment,
    Line,
}

/// Ordered fan-out of trace calls to a set of registered listeners
///
/// Holds the listener registry, the active [`TraceOptions`], and the
/// facade-level indent counters. All operations are synchronous and return
/// once every listener has been invoked.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tracefan_core::{MemoryListener, Tracer};
///
/// let tracer = Tracer::new();
/// let capture = Arc::new(MemoryListener::new());
/// tracer.add_listener(capture.clone());
///
/// tracer.write_line("hello").unwrap();
/// assert_eq!(capture.entries(), vec!["hello".to_string()]);
/// ```
pub struct Tracer {
    listeners: ListenerRegistry,
    options: RwLock<TraceOptions>,
    indent_level: AtomicUsize,
    indent_size: AtomicUsize,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracer {
    /// Create a tracer with no listeners and default options
    pub fn new() -> Self {
        Self::with_options(TraceOptions::default())
    }

    /// Create a tracer with the given options
    pub fn with_options(options: TraceOptions) -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            options: RwLock::new(options),
            indent_level: AtomicUsize::new(0),
            indent_size: AtomicUsize::new(0),
        }
    }

    // ---- listener management ----

    /// Register a listener; it is dispatched to after every earlier one
    pub fn add_listener(&self, listener: SharedListener) {
        self.listeners.add(listener);
    }

    /// Remove the first listener with the given name
    pub fn remove_listener(&self, name: &str) -> bool {
        self.listeners.remove(name)
    }

    /// Remove every listener without flushing or closing them
    pub fn clear_listeners(&self) {
        self.listeners.clear();
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The underlying registry
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    // ---- options ----

    /// Current options (a copy; options are read fresh on every dispatch)
    pub fn options(&self) -> TraceOptions {
        *self.options.read()
    }

    /// Replace the options wholesale
    pub fn set_options(&self, options: TraceOptions) {
        *self.options.write() = options;
    }

    /// Modify the options in place
    pub fn update_options(&self, f: impl FnOnce(&mut TraceOptions)) {
        let mut options = self.options.write();
        f(&mut options);
    }

    // ---- write family ----

    /// Forward `message` to every listener, without a trailing newline
    pub fn write(&self, message: &str) -> Result<(), DispatchError> {
        self.dispatch(WriteKind::Fragment, None, message, None)
    }

    /// Forward `message` with a category, without a trailing newline
    pub fn write_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.dispatch(WriteKind::Fragment, None, message, Some(category))
    }

    /// Forward `message` to every listener as a complete line
    pub fn write_line(&self, message: &str) -> Result<(), DispatchError> {
        self.dispatch(WriteKind::Line, None, message, None)
    }

    /// Forward `message` with a category as a complete line
    pub fn write_line_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.dispatch(WriteKind::Line, None, message, Some(category))
    }

    // ---- conditional writes ----

    /// Like [`write`](Self::write), but a no-op when `condition` is false
    pub fn write_if(&self, condition: bool, message: &str) -> Result<(), DispatchError> {
        if condition {
            self.write(message)
        } else {
            Ok(())
        }
    }

    /// Like [`write_with_category`](Self::write_with_category), gated on `condition`
    pub fn write_if_with_category(
        &self,
        condition: bool,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        if condition {
            self.write_with_category(message, category)
        } else {
            Ok(())
        }
    }

    /// Like [`write_line`](Self::write_line), but a no-op when `condition` is false
    pub fn write_line_if(&self, condition: bool, message: &str) -> Result<(), DispatchError> {
        if condition {
            self.write_line(message)
        } else {
            Ok(())
        }
    }

    /// Like [`write_line_with_category`](Self::write_line_with_category), gated on `condition`
    pub fn write_line_if_with_category(
        &self,
        condition: bool,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        if condition {
            self.write_line_with_category(message, category)
        } else {
            Ok(())
        }
    }

    // ---- severity-gated writes ----

    /// Write a line if the gate for `level` is open in the current options
    pub fn write_line_at(
        &self,
        level: TraceLevel,
        message: &str,
        category: Option<&str>,
    ) -> Result<(), DispatchError> {
        if !self.options().is_enabled(level) {
            return Ok(());
        }
        self.dispatch(WriteKind::Line, Some(level), message, category)
    }

    /// Write a line when `trace_error` is set
    pub fn write_line_error(&self, message: &str) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Error, message, None)
    }

    /// Write a categorized line when `trace_error` is set
    pub fn write_line_error_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Error, message, Some(category))
    }

    /// Write a line when `trace_warning` is set
    pub fn write_line_warning(&self, message: &str) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Warning, message, None)
    }

    /// Write a categorized line when `trace_warning` is set
    pub fn write_line_warning_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Warning, message, Some(category))
    }

    /// Write a line when `trace_info` is set
    pub fn write_line_info(&self, message: &str) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Info, message, None)
    }

    /// Write a categorized line when `trace_info` is set
    pub fn write_line_info_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Info, message, Some(category))
    }

    /// Write a line when `trace_verbose` is set
    pub fn write_line_verbose(&self, message: &str) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Verbose, message, None)
    }

    /// Write a categorized line when `trace_verbose` is set
    pub fn write_line_verbose_with_category(
        &self,
        message: &str,
        category: &str,
    ) -> Result<(), DispatchError> {
        self.write_line_at(TraceLevel::Verbose, message, Some(category))
    }

    // ---- indent control ----

    /// Increase every listener's indent level by one
    pub fn indent(&self) {
        self.indent_level.fetch_add(1, Ordering::SeqCst);
        for listener in self.listeners.snapshot() {
            listener.set_indent_level(listener.indent_level() + 1);
        }
    }

    /// Decrease every listener's indent level by one, saturating at zero
    pub fn unindent(&self) {
        let _ = self
            .indent_level
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |level| {
                Some(level.saturating_sub(1))
            });
        for listener in self.listeners.snapshot() {
            listener.set_indent_level(listener.indent_level().saturating_sub(1));
        }
    }

    /// Facade-level indent level
    ///
    /// Tracks `indent`/`unindent`/`set_indent_level` consistently, so the
    /// getter always reflects the last broadcast value.
    pub fn indent_level(&self) -> usize {
        self.indent_level.load(Ordering::SeqCst)
    }

    /// Set the indent level on the facade and every listener
    pub fn set_indent_level(&self, level: usize) {
        self.indent_level.store(level, Ordering::SeqCst);
        for listener in self.listeners.snapshot() {
            listener.set_indent_level(level);
        }
    }

    /// Facade-level indent size (spaces per level)
    pub fn indent_size(&self) -> usize {
        self.indent_size.load(Ordering::SeqCst)
    }

    /// Set the indent size on the facade and every listener
    pub fn set_indent_size(&self, size: usize) {
        self.indent_size.store(size, Ordering::SeqCst);
        for listener in self.listeners.snapshot() {
            listener.set_indent_size(size);
        }
    }

    // ---- lifecycle ----

    /// Broadcast `flush` to every listener
    pub fn flush(&self) -> Result<(), DispatchError> {
        let mut failures = Vec::new();
        self.broadcast_flush(&mut failures);
        DispatchError::from_failures(failures)
    }

    /// Flush and close every listener, then empty the registry
    ///
    /// After `close` returns, writes reach zero listeners until new ones
    /// are registered.
    pub fn close(&self) -> Result<(), DispatchError> {
        let mut failures = Vec::new();
        for listener in self.listeners.snapshot() {
            if let Err(error) = listener.flush() {
                failures.push(ListenerFailure {
                    listener: listener.name().to_string(),
                    error,
                });
            }
            if let Err(error) = listener.close() {
                failures.push(ListenerFailure {
                    listener: listener.name().to_string(),
                    error,
                });
            }
        }
        self.listeners.clear();
        DispatchError::from_failures(failures)
    }

    // ---- internals ----

    fn dispatch(
        &self,
        kind: WriteKind,
        level: Option<TraceLevel>,
        message: &str,
        category: Option<&str>,
    ) -> Result<(), DispatchError> {
        let options = self.options();
        if options.mirror_to_tracing {
            mirror(level, message, category);
        }

        let mut failures = Vec::new();
        for listener in self.listeners.snapshot() {
            let result = match kind {
                WriteKind::Fragment => listener.write(message, category),
                WriteKind::Line => listener.write_line(message, category),
            };
            if let Err(error) = result {
                failures.push(ListenerFailure {
                    listener: listener.name().to_string(),
                    error,
                });
            }
        }

        if options.auto_flush {
            self.broadcast_flush(&mut failures);
        }
        DispatchError::from_failures(failures)
    }

    fn broadcast_flush(&self, failures: &mut Vec<ListenerFailure>) {
        for listener in self.listeners.snapshot() {
            if let Err(error) = listener.flush() {
                failures.push(ListenerFailure {
                    listener: listener.name().to_string(),
                    error,
                });
            }
        }
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("listeners", &self.listeners)
            .field("options", &self.options())
            .field("indent_level", &self.indent_level())
            .field("indent_size", &self.indent_size())
            .finish()
    }
}

/// Duplicate a dispatched call into the `tracing` crate
///
/// Ungated writes map to TRACE; severity-gated lines map to the closest
/// `tracing::Level`. `tracing` has no flush or indent, so only write-family
/// calls are mirrored.
fn mirror(level: Option<TraceLevel>, message: &str, category: Option<&str>) {
    // tracing::event! needs a constant level (it builds the callsite
    // metadata from it), so each arm names its level literally.
    macro_rules! emit {
        ($level:expr) => {
            match category {
                Some(category) => {
                    tracing::event!(target: "tracefan", $level, category, "{}", message)
                }
                None => tracing::event!(target: "tracefan", $level, "{}", message),
            }
        };
    }

    match level {
        None => emit!(tracing::Level::TRACE),
        Some(TraceLevel::Error) => emit!(tracing::Level::ERROR),
        Some(TraceLevel::Warning) => emit!(tracing::Level::WARN),
        Some(TraceLevel::Info) => emit!(tracing::Level::INFO),
        Some(TraceLevel::Verbose) => emit!(tracing::Level::DEBUG),
    }
}

/// Global tracer instance
static GLOBAL: Lazy<Tracer> = Lazy::new(Tracer::new);

/// The process-wide tracer
///
/// Created on first use with no listeners and default options, and lives
/// for the rest of the process. The `trace_write!`/`trace_writeln!` macro
/// family dispatches through it.
pub fn global() -> &'static Tracer {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::listener::{ListenerResult, MemoryListener, TraceListener};

    /// Listener that records into a log shared across instances, so tests
    /// can observe the relative order of dispatches to different listeners.
    struct SequencedListener {
        name: String,
        log: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl SequencedListener {
        fn new(name: &str, log: Arc<Mutex<Vec<(String, String)>>>) -> Self {
            Self {
                name: name.to_string(),
                log,
            }
        }
    }

    impl TraceListener for SequencedListener {
        fn name(&self) -> &str {
            &self.name
        }

        fn write(&self, message: &str, _category: Option<&str>) -> ListenerResult<()> {
            self.log.lock().push((self.name.clone(), message.to_string()));
            Ok(())
        }

        fn write_line(&self, message: &str, _category: Option<&str>) -> ListenerResult<()> {
            self.log.lock().push((self.name.clone(), message.to_string()));
            Ok(())
        }

        fn flush(&self) -> ListenerResult<()> {
            Ok(())
        }

        fn close(&self) -> ListenerResult<()> {
            Ok(())
        }

        fn indent_level(&self) -> usize {
            0
        }

        fn set_indent_level(&self, _level: usize) {}

        fn indent_size(&self) -> usize {
            0
        }

        fn set_indent_size(&self, _size: usize) {}
    }

    /// Listener whose write-family calls always fail.
    struct FailingListener;

    impl TraceListener for FailingListener {
        fn name(&self) -> &str {
            "failing"
        }

        fn write(&self, _message: &str, _category: Option<&str>) -> ListenerResult<()> {
            Err(ListenerError::Other("sink unavailable".to_string()))
        }

        fn write_line(&self, _message: &str, _category: Option<&str>) -> ListenerResult<()> {
            Err(ListenerError::Other("sink unavailable".to_string()))
        }

        fn flush(&self) -> ListenerResult<()> {
            Ok(())
        }

        fn close(&self) -> ListenerResult<()> {
            Ok(())
        }

        fn indent_level(&self) -> usize {
            0
        }

        fn set_indent_level(&self, _level: usize) {}

        fn indent_size(&self) -> usize {
            0
        }

        fn set_indent_size(&self, _size: usize) {}
    }

    /// Subscriber that records mirrored events so tests can assert the
    /// mapped level, the message, and the `category` field.
    #[derive(Clone, Default)]
    struct RecordingSubscriber {
        events: Arc<Mutex<Vec<(tracing::Level, String, Option<String>)>>>,
    }

    impl tracing::Subscriber for RecordingSubscriber {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            struct Collector {
                message: String,
                category: Option<String>,
            }

            impl tracing::field::Visit for Collector {
                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    if field.name() == "message" {
                        self.message = format!("{:?}", value);
                    }
                }

                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    if field.name() == "category" {
                        self.category = Some(value.to_string());
                    } else if field.name() == "message" {
                        self.message = value.to_string();
                    }
                }
            }

            let mut collector = Collector {
                message: String::new(),
                category: None,
            };
            event.record(&mut collector);
            self.events.lock().push((
                *event.metadata().level(),
                collector.message,
                collector.category,
            ));
        }

        fn enter(&self, _span: &tracing::span::Id) {}

        fn exit(&self, _span: &tracing::span::Id) {}
    }

    #[test]
    fn test_write_line_reaches_listeners_in_registration_order() {
        let tracer = Tracer::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        tracer.add_listener(Arc::new(SequencedListener::new("a", log.clone())));
        tracer.add_listener(Arc::new(SequencedListener::new("b", log.clone())));

        tracer.write_line("hello").unwrap();

        let log = log.lock();
        assert_eq!(
            *log,
            vec![
                ("a".to_string(), "hello".to_string()),
                ("b".to_string(), "hello".to_string()),
            ]
        );
    }

    #[test]
    fn test_each_listener_receives_exactly_one_call() {
        let tracer = Tracer::new();
        let a = Arc::new(MemoryListener::with_name("a"));
        let b = Arc::new(MemoryListener::with_name("b"));
        tracer.add_listener(a.clone());
        tracer.add_listener(b.clone());

        tracer.write_line("hello").unwrap();

        assert_eq!(a.entries(), vec!["hello".to_string()]);
        assert_eq!(b.entries(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_write_if_false_has_no_side_effects() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());
        tracer.update_options(|o| o.auto_flush = true);

        tracer.write_if(false, "skipped").unwrap();
        tracer.write_line_if(false, "skipped").unwrap();

        assert!(capture.entries().is_empty());
        assert_eq!(capture.flush_count(), 0);
    }

    #[test]
    fn test_write_line_if_true_dispatches() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.write_line_if(true, "taken").unwrap();

        assert_eq!(capture.entries(), vec!["taken".to_string()]);
    }

    #[test]
    fn test_severity_gate_closed_emits_nothing() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        // All gates default to closed
        tracer.write_line_error("e").unwrap();
        tracer.write_line_warning("w").unwrap();
        tracer.write_line_info("i").unwrap();
        tracer.write_line_verbose("v").unwrap();

        assert!(capture.entries().is_empty());
    }

    #[test]
    fn test_severity_gate_open_emits_one_line_per_listener() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());
        tracer.update_options(|o| o.trace_error = true);

        tracer.write_line_error("boom").unwrap();
        // Other gates stay closed
        tracer.write_line_warning("quiet").unwrap();

        assert_eq!(capture.entries(), vec!["boom".to_string()]);
    }

    #[test]
    fn test_category_is_forwarded() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());
        tracer.update_options(|o| o.trace_warning = true);

        tracer.write_line_with_category("refused", "socket").unwrap();
        tracer
            .write_line_warning_with_category("retrying", "socket")
            .unwrap();

        assert_eq!(
            capture.entries(),
            vec!["socket: refused".to_string(), "socket: retrying".to_string()]
        );
    }

    #[test]
    fn test_auto_flush_follows_every_write() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());
        tracer.update_options(|o| o.auto_flush = true);

        tracer.write("a").unwrap();
        tracer.write_line("b").unwrap();

        assert_eq!(capture.flush_count(), 2);
    }

    #[test]
    fn test_no_auto_flush_without_option() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.write_line("a").unwrap();
        assert_eq!(capture.flush_count(), 0);

        tracer.flush().unwrap();
        assert_eq!(capture.flush_count(), 1);
    }

    #[test]
    fn test_close_flushes_closes_and_empties_registry() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.close().unwrap();

        assert_eq!(capture.flush_count(), 1);
        assert!(capture.is_closed());
        assert_eq!(tracer.listener_count(), 0);

        // A write after close reaches zero listeners
        tracer.write_line("lost").unwrap();
        assert!(capture.entries().is_empty());
    }

    #[test]
    fn test_indent_three_times() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.indent();
        tracer.indent();
        tracer.indent();

        assert_eq!(capture.indent_level(), 3);
        assert_eq!(tracer.indent_level(), 3);
    }

    #[test]
    fn test_unindent_saturates_at_zero() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.indent();
        tracer.unindent();
        tracer.unindent();

        assert_eq!(capture.indent_level(), 0);
        assert_eq!(tracer.indent_level(), 0);
    }

    #[test]
    fn test_indent_setters_broadcast_and_track() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());

        tracer.set_indent_level(5);
        tracer.set_indent_size(2);

        assert_eq!(capture.indent_level(), 5);
        assert_eq!(capture.indent_size(), 2);
        assert_eq!(tracer.indent_level(), 5);
        assert_eq!(tracer.indent_size(), 2);
    }

    #[test]
    fn test_failing_listener_does_not_stop_dispatch() {
        let tracer = Tracer::new();
        let after = Arc::new(MemoryListener::new());
        tracer.add_listener(Arc::new(FailingListener));
        tracer.add_listener(after.clone());

        let err = tracer.write_line("survives").unwrap_err();

        // The listener after the failing one still received the call
        assert_eq!(after.entries(), vec!["survives".to_string()]);
        assert_eq!(err.failures.len(), 1);
        assert_eq!(err.failures[0].listener, "failing");
    }

    #[test]
    fn test_remove_listener_stops_dispatch_to_it() {
        let tracer = Tracer::new();
        let a = Arc::new(MemoryListener::with_name("a"));
        let b = Arc::new(MemoryListener::with_name("b"));
        tracer.add_listener(a.clone());
        tracer.add_listener(b.clone());

        assert!(tracer.remove_listener("a"));
        tracer.write_line("only b").unwrap();

        assert!(a.entries().is_empty());
        assert_eq!(b.entries(), vec!["only b".to_string()]);
    }

    #[test]
    fn test_set_options_replaces_wholesale() {
        let tracer = Tracer::new();
        tracer.update_options(|o| o.trace_error = true);

        tracer.set_options(TraceOptions::default());
        assert!(!tracer.options().trace_error);
    }

    #[test]
    fn test_mirroring_emits_tracing_events_at_mapped_levels() {
        let tracer = Tracer::new();
        let capture = Arc::new(MemoryListener::new());
        tracer.add_listener(capture.clone());
        tracer.update_options(|o| {
            o.mirror_to_tracing = true;
            o.trace_error = true;
            o.trace_verbose = true;
        });

        let subscriber = RecordingSubscriber::default();
        let events = subscriber.events.clone();
        tracing::subscriber::with_default(subscriber, || {
            tracer.write_line("plain").unwrap();
            tracer.write_line_with_category("refused", "net").unwrap();
            tracer.write_line_error("bad").unwrap();
            tracer.write_line_verbose("detail").unwrap();
            // Closed gate: neither listeners nor the mirror see it
            tracer.write_line_info("gated out").unwrap();
        });

        let events = events.lock();
        assert_eq!(
            *events,
            vec![
                (tracing::Level::TRACE, "plain".to_string(), None),
                (
                    tracing::Level::TRACE,
                    "refused".to_string(),
                    Some("net".to_string())
                ),
                (tracing::Level::ERROR, "bad".to_string(), None),
                (tracing::Level::DEBUG, "detail".to_string(), None),
            ]
        );
        // Listeners received the same dispatches
        assert_eq!(capture.entries().len(), 4);
    }

    #[test]
    fn test_no_mirroring_without_option() {
        let tracer = Tracer::new();
        tracer.add_listener(Arc::new(MemoryListener::new()));

        let subscriber = RecordingSubscriber::default();
        let events = subscriber.events.clone();
        tracing::subscriber::with_default(subscriber, || {
            tracer.write_line("local only").unwrap();
        });

        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_global_tracer_is_shared() {
        let first = global() as *const Tracer;
        let second = global() as *const Tracer;
        assert_eq!(first, second);
    }
}
