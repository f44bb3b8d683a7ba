//! Lossless conversion of the error union into a display-ready record.
//!
//! Consumed by external editor/CLI collaborators. The conversion is a pure
//! formatting function and total over [`CompileError`]: it never panics,
//! whatever variant it is handed.

use cue_ast::Location;
use miette::Diagnostic;

use crate::error::CompileError;

/// Diagnostic severity. Every current compiler error is fatal for its
/// compile, so only `Error` is produced today; the type leaves room for
/// advisory levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A rendered diagnostic: what an editor shows for one error.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub hint: Option<String>,
}

impl Rendered {
    /// Render a compile error. Total: every variant of the union maps to
    /// exactly one record.
    pub fn from_error(error: &CompileError) -> Self {
        Self {
            severity: Severity::Error,
            message: error.to_string(),
            location: error.location(),
            hint: error.help().map(|h| h.to_string()),
        }
    }
}

impl From<&CompileError> for Rendered {
    fn from(error: &CompileError) -> Self {
        Self::from_error(error)
    }
}
