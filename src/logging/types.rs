//! The [`Log`] trait shared by the orchestrator and the command layer.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to the global tracing
/// subscriber; [`NullLog`] discards everything.
#[cfg_attr(test, mockall::automock)]
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}

/// A [`Log`] that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl Log for NullLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_log_is_usable_as_trait_object() {
        let log: &dyn Log = &NullLog;
        log.stage("ignored");
        log.warn("ignored");
    }

    #[test]
    fn mock_log_records_expectations() {
        let mut log = MockLog::new();
        log.expect_warn()
            .withf(|msg| msg.contains("duplicate"))
            .times(1)
            .return_const(());
        log.warn("duplicate folder");
    }
}
