use std::fmt::Display;
use std::sync::{Arc, Mutex};

/// Sink for the executor's leveled diagnostics.
///
/// Calls are fire-and-forget; nothing on the data path depends on them. Inject a custom
/// implementation to route messages elsewhere or to assert on them in tests.
pub trait QueryLogger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, error: &dyn Display);
}

/// Default logger, forwarding to `tracing` under the `sql_rowmap` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl QueryLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "sql_rowmap", "{message}");
    }

    fn error(&self, error: &dyn Display) {
        tracing::error!(target: "sql_rowmap", "{error}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// Logger that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of everything logged so far
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Error)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn push(&self, level: LogLevel, message: String) {
        self.lock().push((level, message));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl QueryLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message.to_string());
    }

    fn error(&self, error: &dyn Display) {
        self.push(LogLevel::Error, error.to_string());
    }
}
