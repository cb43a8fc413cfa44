pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create table definition parse error with optional position info
pub fn table_parse_error(source: &str, message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_input_error(
        &format!("Table definition parse error in {}", source),
        &msg
    ))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create error for a dialect name outside the supported set.
///
/// Dialects are a closed enumeration; receiving an unknown name means a
/// caller broke the contract, so this is reported as an internal error.
pub fn unknown_dialect_error(name: &str) -> AppError {
    AppError::internal(format!(
        "Unknown dialect '{}' (expected one of: snowflake_sql, spark_sql, bigquery_sql, tsql, \
         mysql, postgresql, ansi)",
        name
    ))
}

/// Create error for a failure while rendering an output document
pub fn render_error(message: impl Into<String>) -> AppError {
    AppError::internal(message.into())
}

/// Format input error with position highlighting
fn format_input_error(prefix: &str, message: &str) -> String {
    // serde_json / serde_yaml: "... at line X column Y"
    // toml: "TOML parse error at line X, column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

/// Line/column pair reported by a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line:   usize,
    pub column: usize
}

/// Extract the first "line X[,] column Y" pair from a parser message.
///
/// Matching is case-insensitive so both serde-style (`line 3 column 7`) and
/// sqlparser-style (`Line: 3, Column: 7`) messages are recognized.
pub fn extract_position(message: &str) -> Option<SourcePosition> {
    let lower = message.to_ascii_lowercase();
    let line_start = lower.find("line")? + "line".len();
    let line_digits = skip_separators(&lower[line_start..]);
    let (line, after_line) = take_number(line_digits)?;

    let col_offset = after_line.find("column")? + "column".len();
    let col_digits = skip_separators(&after_line[col_offset..]);
    let (column, _) = take_number(col_digits)?;

    Some(SourcePosition { line, column })
}

fn skip_separators(s: &str) -> &str {
    s.trim_start_matches(|c: char| c == ':' || c == ',' || c.is_whitespace())
}

fn take_number(s: &str) -> Option<(usize, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}
