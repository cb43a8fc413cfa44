//! Transform compilation engine.
//!
//! Turns the declarative transform bag of each column into a single SQL value
//! expression and assembles a table-level projection with a combined row
//! filter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────────┐
//! │  TableSpec  │────▶│   assemble   │────▶│ CompiledStatement │
//! └─────────────┘     └──────────────┘     └───────────────────┘
//!                            │
//!                     ┌──────┴────────┐
//!                     │compile_column │
//!                     │  (parallel)   │
//!                     └──────┬────────┘
//!                            │
//!                     ┌──────┴──────┐
//!                     │   builder   │◀──── DialectSyntax
//!                     └─────────────┘
//! ```
//!
//! # Pipeline Order
//!
//! Transforms are applied in a fixed order regardless of how the input
//! record was built:
//!
//! 1. `custom_expression` (replaces the column reference) or the quoted column
//! 2. `trim`
//! 3. `case_normalization`
//! 4. `strip_special_chars`
//! 5. `delimiter_split`
//! 6. `regex`
//! 7. `type_cast`
//! 8. `null_strategy` (`replace` wraps, `flag` adds a companion, `drop` filters)
//! 9. `conditional`
//! 10. `where_filter` (row filter only)
//!
//! # Diagnostics
//!
//! | Severity | Meaning |
//! |----------|---------|
//! | `INFO` | Output shape notice, nothing lost |
//! | `WARN` | Best-effort SQL emitted, transform skipped or approximated |
//! | `ERROR` | Malformed configuration; column degraded to its raw reference |

pub mod builder;
mod column;
mod statement;
mod types;

pub use column::{compile_column, flag_column_name};
pub use statement::assemble;
pub use types::{
    CompanionColumn, CompiledColumn, CompiledStatement, Diagnostic, DiagnosticKind, Diagnostics,
    Severity
};
