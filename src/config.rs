/// Text used for SQL NULL cells unless configured otherwise.
pub const DEFAULT_NULL_TEXT: &str = "NULL";

/// Options for opening a `QueryExecutor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Sentinel written into a row for NULL cells
    pub null_text: String,
    /// Upper bound on pooled connections (Postgres only; `SQLite` uses one connection)
    pub pool_max_size: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            null_text: DEFAULT_NULL_TEXT.to_string(),
            pool_max_size: 4,
        }
    }
}

impl ExecutorOptions {
    #[must_use]
    pub fn builder() -> ExecutorOptionsBuilder {
        ExecutorOptionsBuilder::default()
    }
}

/// Fluent builder for `ExecutorOptions`.
#[derive(Debug, Clone, Default)]
pub struct ExecutorOptionsBuilder {
    opts: ExecutorOptions,
}

impl ExecutorOptionsBuilder {
    #[must_use]
    pub fn null_text(mut self, null_text: impl Into<String>) -> Self {
        self.opts.null_text = null_text.into();
        self
    }

    /// Values below 1 are raised to 1.
    #[must_use]
    pub fn pool_max_size(mut self, pool_max_size: usize) -> Self {
        self.opts.pool_max_size = pool_max_size.max(1);
        self
    }

    #[must_use]
    pub fn finish(self) -> ExecutorOptions {
        self.opts
    }
}
