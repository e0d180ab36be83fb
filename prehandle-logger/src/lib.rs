//! A thin wrapper over [`slog`], in the same spirit as the replica-wide
//! logger the rest of this corpus's components take as a constructor
//! argument: every long-lived component holds a [`ReplicaLogger`] and logs
//! through it rather than `println!`.
//!
//! Re-exports [`slog::debug`], [`slog::info`], [`slog::warn`] and
//! [`slog::error`] so callers only need this one crate.

pub use slog::{debug, error, info, o, warn};
pub use slog::Logger;

/// A cloneable handle to the process-wide log sink. Cheap to clone (an
/// `Arc` under the hood, via `slog::Logger`), so components hold one by
/// value rather than behind a reference.
#[derive(Clone)]
pub struct ReplicaLogger(Logger);

impl ReplicaLogger {
    pub fn new(inner: Logger) -> Self {
        Self(inner)
    }

    /// An async, term-rendered drain: the production default.
    pub fn new_term_logger() -> Self {
        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        Self(Logger::root(drain, o!()))
    }

    /// A logger that discards everything, for tests that don't want to
    /// assert on log output but still need a [`ReplicaLogger`] to
    /// construct a component.
    pub fn no_op() -> Self {
        Self(Logger::root(slog::Discard, o!()))
    }
}

impl std::ops::Deref for ReplicaLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.0
    }
}

impl Default for ReplicaLogger {
    fn default() -> Self {
        Self::no_op()
    }
}
