//! Type definitions for compilation output.
//!
//! This module defines the report envelope produced by the compiler:
//! - [`Severity`] - Diagnostic severity levels (Info, Warning, Error)
//! - [`DiagnosticKind`] - Why a diagnostic was raised
//! - [`Diagnostic`] - A single column-scoped message
//! - [`CompiledColumn`] - Value expression plus row-filter and flag channels
//! - [`CompiledStatement`] - Ordered projection plus combined WHERE clause

use std::fmt;

use compact_str::CompactString;
use serde::Serialize;
use smallvec::SmallVec;

use crate::dialect::Dialect;

/// Severity level of a diagnostic.
///
/// Ordered from lowest to highest severity for sorting purposes.
/// Exit codes are determined by the highest severity found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// Informational notice, does not affect exit code
    Info,
    /// Best-effort output was emitted (exit code 1)
    Warning,
    /// Column fell back to its raw reference (exit code 2)
    Error
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

/// Category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Transform has no faithful rendering in the target dialect
    UnsupportedFeature,
    /// Transform is enabled with parameters that cannot be rendered
    MalformedConfig,
    /// Output shape worth knowing about, nothing was lost
    Notice,
    /// Rendered statement failed the syntax check
    SyntaxCheck
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFeature => write!(f, "Unsupported"),
            Self::MalformedConfig => write!(f, "Malformed"),
            Self::Notice => write!(f, "Notice"),
            Self::SyntaxCheck => write!(f, "Syntax")
        }
    }
}

/// A single message attached to a compiled column or statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind:     DiagnosticKind,
    /// Column the diagnostic belongs to; empty for statement-level ones
    pub column:   CompactString,
    pub message:  String
}

impl Diagnostic {
    pub fn unsupported(column: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind:     DiagnosticKind::UnsupportedFeature,
            column:   column.into(),
            message:  message.into()
        }
    }

    pub fn malformed(column: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind:     DiagnosticKind::MalformedConfig,
            column:   column.into(),
            message:  message.into()
        }
    }

    pub fn notice(column: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind: DiagnosticKind::Notice,
            column: column.into(),
            message: message.into()
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind:     DiagnosticKind::SyntaxCheck,
            column:   CompactString::default(),
            message:  message.into()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column.is_empty() {
            write!(f, "[{}] {}", self.severity, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.severity, self.column, self.message)
        }
    }
}

pub type Diagnostics = SmallVec<[Diagnostic; 2]>;

/// Boolean companion output of `null_strategy = flag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionColumn {
    pub name:       String,
    pub expression: String
}

/// Compilation result of a single column.
///
/// The value expression and the row-filter contribution are separate
/// channels; the filter never appears inside `expression`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledColumn {
    pub name:        String,
    pub expression:  String,
    /// Conjunction of this column's `drop` and `where_filter` predicates
    pub row_filter:  Option<String>,
    pub flag:        Option<CompanionColumn>,
    pub diagnostics: Diagnostics
}

impl CompiledColumn {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Compilation result of a whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledStatement {
    pub table:        String,
    pub dialect:      Dialect,
    /// Declared column order, never sorted
    pub projection:   Vec<CompiledColumn>,
    /// `None` when no column contributes a predicate
    pub where_clause: Option<String>,
    /// Statement-level diagnostics (duplicate names, syntax check)
    pub diagnostics:  Vec<Diagnostic>
}

impl CompiledStatement {
    /// All diagnostics, column-scoped first in column order.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.projection
            .iter()
            .flat_map(|c| c.diagnostics.iter())
            .chain(self.diagnostics.iter())
    }

    pub fn error_count(&self) -> usize {
        self.all_diagnostics()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.all_diagnostics()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.all_diagnostics()
            .filter(|d| d.severity == Severity::Info)
            .count()
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.all_diagnostics().map(|d| d.severity).max()
    }
}
