//! Collects diagnostics emitted while files are analyzed.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// A shared, ordered collection of diagnostics.
///
/// Analysis code borrows the sink immutably, so one sink can be handed to
/// several workers. Per-severity counts survive [`take_all`](Self::take_all).
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    counts: [AtomicUsize; 3],
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn counter(&self, severity: Severity) -> &AtomicUsize {
        &self.counts[severity as usize]
    }

    /// Records `diag`.
    pub fn emit(&self, diag: Diagnostic) {
        self.counter(diag.severity).fetch_add(1, Ordering::Relaxed);
        self.lock().push(diag);
    }

    /// Records every diagnostic of `diags`, keeping their order.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        let diags: Vec<Diagnostic> = diags.into_iter().collect();
        for diag in &diags {
            self.counter(diag.severity).fetch_add(1, Ordering::Relaxed);
        }
        self.lock().extend(diags);
    }

    /// How many diagnostics of `severity` were emitted so far.
    pub fn count(&self, severity: Severity) -> usize {
        self.counter(severity).load(Ordering::Relaxed)
    }

    /// Shorthand for `count(Severity::Error)`.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns `true` once any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Removes and returns the collected diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// A copy of the collected diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::codes;

    fn tool_failure() -> Diagnostic {
        Diagnostic::error(codes::TOOL_FAILURE, "syntax tool exited with status 1")
    }

    fn width_fallback() -> Diagnostic {
        Diagnostic::note(codes::UNRESOLVED_WIDTH, "width of `data` defaults to 1")
    }

    #[test]
    fn counts_by_severity() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        sink.emit(width_fallback());
        sink.emit(width_fallback());
        assert!(!sink.has_errors());
        sink.emit(tool_failure());
        assert_eq!(sink.count(Severity::Note), 2);
        assert_eq!(sink.count(Severity::Warning), 0);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn extend_preserves_order() {
        let sink = DiagnosticSink::new();
        sink.extend(vec![width_fallback(), tool_failure()]);
        let codes: Vec<String> = sink.diagnostics().iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, ["N301", "E102"]);
        assert!(sink.has_errors());
    }

    #[test]
    fn take_all_keeps_counts() {
        let sink = DiagnosticSink::new();
        sink.emit(tool_failure());
        assert_eq!(sink.take_all().len(), 1);
        assert!(sink.diagnostics().is_empty());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn shared_between_threads() {
        let sink = DiagnosticSink::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..25 {
                        sink.emit(tool_failure());
                    }
                });
            }
        });
        assert_eq!(sink.error_count(), 100);
        assert_eq!(sink.take_all().len(), 100);
    }
}
