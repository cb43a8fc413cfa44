//! Optional syntax validation of rendered SQL.
//!
//! Rendered statements are re-parsed with `sqlparser` using the closest
//! parser dialect. A parse failure never blocks output; it becomes a
//! statement-level warning carrying the reported position.

use sqlparser::{
    ast::{Expr, SelectItem, SetExpr, Statement, Value},
    dialect::{
        AnsiDialect, BigQueryDialect, DatabricksDialect, Dialect as ParserDialect, MsSqlDialect,
        MySqlDialect, PostgreSqlDialect, SnowflakeDialect
    },
    parser::Parser
};
use tracing::debug;

use crate::{compiler::Diagnostic, dialect::Dialect, error::extract_position};

/// Parser dialect used to validate output for `dialect`.
pub fn parser_dialect(dialect: Dialect) -> Box<dyn ParserDialect> {
    match dialect {
        Dialect::SnowflakeSql => Box::new(SnowflakeDialect {}),
        Dialect::SparkSql => Box::new(DatabricksDialect {}),
        Dialect::BigquerySql => Box::new(BigQueryDialect {}),
        Dialect::Tsql => Box::new(MsSqlDialect {}),
        Dialect::Mysql => Box::new(MySqlDialect {}),
        Dialect::Postgresql => Box::new(PostgreSqlDialect {}),
        Dialect::Ansi => Box::new(AnsiDialect {})
    }
}

/// Parse `sql` for `dialect`, returning a warning when it does not parse.
pub fn check_statement(sql: &str, dialect: Dialect) -> Option<Diagnostic> {
    let parser = parser_dialect(dialect);
    match Parser::parse_sql(parser.as_ref(), sql) {
        Ok(statements) => {
            debug!(dialect = %dialect, statements = statements.len(), "syntax check passed");
            None
        }
        Err(e) => {
            let message = e.to_string();
            let located = match extract_position(&message) {
                Some(pos) => format!(
                    "rendered SQL does not parse as {} at line {}, column {}: {}",
                    dialect, pos.line, pos.column, message
                ),
                None => format!("rendered SQL does not parse as {}: {}", dialect, message)
            };
            Some(Diagnostic::syntax(located))
        }
    }
}

/// Decode a single-quoted SQL literal the way `dialect`'s parser reads it.
///
/// Returns `None` if `sql_literal` is not exactly one string literal.
///
/// # Example
///
/// ```
/// use transform_forge::{check::literal_value, dialect::Dialect};
///
/// assert_eq!(literal_value("'O''Brien'", Dialect::Ansi).as_deref(), Some("O'Brien"));
/// ```
pub fn literal_value(sql_literal: &str, dialect: Dialect) -> Option<String> {
    let parser = parser_dialect(dialect);
    let sql = format!("SELECT {}", sql_literal);
    let mut statements = Parser::parse_sql(parser.as_ref(), &sql).ok()?;
    if statements.len() != 1 {
        return None;
    }
    let Statement::Query(query) = statements.remove(0) else {
        return None;
    };
    let SetExpr::Select(select) = *query.body else {
        return None;
    };
    if let [SelectItem::UnnamedExpr(Expr::Value(val))] = select.projection.as_slice()
        && let Value::SingleQuotedString(s) = &val.value
    {
        return Some(s.clone());
    }
    None
}
