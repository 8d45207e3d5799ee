//! The [`Log`] trait shared by the console logger and test doubles.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) emits `tracing` events; tests substitute
/// a recorder so handlers can be checked without a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Echo a command line that is about to be executed.
    fn command(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a command line that a dry run skipped.
    fn dry_run(&self, msg: &str);
}
