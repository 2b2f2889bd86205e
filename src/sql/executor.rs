//! Statement executors: where generated SQL goes.
//!
//! Applying statements to a live database belongs to the caller; this module defines the seam
//! ([`StatementExecutor`]) plus two executors that need no database.

use std::io::Write;

use thiserror::Error;

/// Failure reported by an executor for a single statement.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StatementError {
    /// Human-readable failure description (driver message, I/O error, ...).
    pub message: String,
}

impl StatementError {
    /// Create a statement error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StatementError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

/// Applies SQL statements, one at a time, in the order given.
///
/// Statements of one sheet depend on each other (DROP, then CREATE, then INSERTs), so callers
/// stop at the first failure. Executors are not expected to retry or roll back.
pub trait StatementExecutor {
    /// Apply one statement.
    fn execute(&mut self, statement: &str) -> Result<(), StatementError>;
}

impl<E: StatementExecutor + ?Sized> StatementExecutor for &mut E {
    fn execute(&mut self, statement: &str) -> Result<(), StatementError> {
        (**self).execute(statement)
    }
}

/// Writes each statement, followed by a newline, to an [`std::io::Write`] sink.
///
/// Useful for exporting a `.sql` script or echoing statements to stdout.
#[derive(Debug)]
pub struct SqlScriptWriter<W: Write> {
    out: W,
}

impl<W: Write> SqlScriptWriter<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> StatementExecutor for SqlScriptWriter<W> {
    fn execute(&mut self, statement: &str) -> Result<(), StatementError> {
        writeln!(self.out, "{statement}")?;
        Ok(())
    }
}

/// Collects statements in memory (dry runs, tests).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementLog {
    statements: Vec<String>,
}

impl StatementLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements recorded so far, in execution order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Consume the log, returning its statements.
    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

impl StatementExecutor for StatementLog {
    fn execute(&mut self, statement: &str) -> Result<(), StatementError> {
        self.statements.push(statement.to_string());
        Ok(())
    }
}
