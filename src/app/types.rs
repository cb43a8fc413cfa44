//! Application types for CLI commands.
//!
//! This module defines the data structures passed between the CLI entry
//! point and the command implementations.

use crate::{
    cli::{Dialect, Format, Target},
    output::CompilationReport
};

/// Parameters for the compile command.
///
/// CLI values left unset fall back to configuration, then to built-in
/// defaults.
///
/// # Example
///
/// ```
/// use transform_forge::{
///     app::CompileParams,
///     cli::{Dialect, Format}
/// };
///
/// let params = CompileParams {
///     table_path:    "customers.json".to_string(),
///     dialect:       Some(Dialect::SnowflakeSql),
///     target:        None,
///     catalog:       None,
///     output_format: Format::Text,
///     check:         false,
///     verbose:       false,
///     no_color:      false
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CompileParams {
    /// Path to the table definition or "-" for stdin input.
    pub table_path:    String,
    /// Target dialect; `None` defers to configuration.
    pub dialect:       Option<Dialect>,
    /// Output document kind; `None` defers to configuration.
    pub target:        Option<Target>,
    /// Source catalog prefix; `None` defers to configuration.
    pub catalog:       Option<String>,
    pub output_format: Format,
    /// Re-parse rendered SQL with the matching parser dialect.
    pub check:         bool,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Result of a compile run.
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// Exit code based on diagnostic severity (0, 1, or 2).
    pub exit_code: i32,
    /// Formatted report.
    pub output:    String,
    pub report:    CompilationReport
}

/// Output from CLI command execution.
///
/// # Example
///
/// ```
/// use transform_forge::app::CommandOutput;
///
/// let output = CommandOutput {
///     exit_code: 0,
///     stdout:    vec!["WITH cleaned AS (".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process (0=success, 1=warnings, 2=errors).
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_params_clone() {
        let params = CompileParams {
            table_path:    "t.json".to_string(),
            dialect:       None,
            target:        Some(Target::Dbt),
            catalog:       Some("analytics".to_string()),
            output_format: Format::Json,
            check:         true,
            verbose:       false,
            no_color:      true
        };
        let cloned = params.clone();
        assert_eq!(cloned.table_path, "t.json");
        assert_eq!(cloned.catalog.as_deref(), Some("analytics"));
    }

    #[test]
    fn test_command_output_debug() {
        let output = CommandOutput {
            exit_code: 2,
            stdout:    vec!["line".to_string()]
        };
        assert!(format!("{:?}", output).contains("CommandOutput"));
    }
}
