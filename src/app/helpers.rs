//! Helper functions for CLI operations.
//!
//! Reading and decoding table definitions, exit code calculation and output
//! option construction.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use super::convert::convert_format;
use crate::{
    cli::Format,
    compiler::Severity,
    error::{AppResult, file_read_error, table_parse_error},
    model::TableSpec,
    output::{CompilationReport, OutputOptions}
};

/// Serialization format of a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Yaml,
    Toml
}

impl TableFormat {
    /// Format implied by a path's extension; stdin and unknown extensions
    /// are read as JSON.
    pub fn from_path(path: &str) -> Self {
        match Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json
        }
    }
}

/// Calculates the process exit code based on diagnostic severities.
///
/// - `0` - No diagnostics or only informational notices
/// - `1` - At least one warning present
/// - `2` - At least one error present
pub fn calculate_exit_code(report: &CompilationReport) -> i32 {
    match report.max_severity() {
        Some(Severity::Error) => 2,
        Some(Severity::Warning) => 1,
        Some(Severity::Info) | None => 0
    }
}

/// Reads a table definition from a file or stdin.
///
/// # Errors
///
/// Returns an error if the file cannot be read or stdin fails.
pub fn read_table_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Decodes a table definition.
///
/// # Errors
///
/// Returns a parse error with the decoder's line/column when available.
///
/// # Example
///
/// ```
/// use transform_forge::app::{TableFormat, parse_table};
///
/// let table = parse_table(
///     r#"{"name": "t", "columns": [{"name": "a", "data_type": "string"}]}"#,
///     TableFormat::Json,
///     "t.json"
/// )
/// .unwrap();
/// assert_eq!(table.columns[0].name, "a");
/// ```
pub fn parse_table(content: &str, format: TableFormat, source: &str) -> AppResult<TableSpec> {
    match format {
        TableFormat::Json => {
            serde_json::from_str(content).map_err(|e| table_parse_error(source, e.to_string()))
        }
        TableFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| table_parse_error(source, e.to_string()))
        }
        TableFormat::Toml => {
            toml::from_str(content).map_err(|e| table_parse_error(source, e.to_string()))
        }
    }
}

/// Creates output options from CLI parameters.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}
