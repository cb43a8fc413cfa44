//! Rendering of compiled statements into complete SQL documents.
//!
//! # Targets
//!
//! - `sql` - A `cleaned` CTE over the qualified source relation
//! - `dbt` - A dbt model (`source()` macro) plus its `schema.yml`
//! - `all` - Both of the above
//!
//! # Example
//!
//! ```
//! use transform_forge::{
//!     compiler::assemble,
//!     dialect::Dialect,
//!     model::{Column, DataType, Layer, TableSpec},
//!     render::{RenderOptions, render_sql}
//! };
//!
//! let table = TableSpec::new("orders", Layer::Silver, vec![Column::new("id", DataType::Integer)]);
//! let statement = assemble(&table, Dialect::Postgresql);
//! let sql = render_sql(&statement, &table, &RenderOptions::default());
//!
//! assert!(sql.starts_with("WITH cleaned AS ("));
//! assert!(sql.contains("FROM \"silver\".\"orders\""));
//! ```

pub mod dbt;

use std::{fmt, str::FromStr};

pub use dbt::{DbtModel, render_dbt};
use serde::Serialize;

use crate::{
    compiler::CompiledStatement,
    dialect::quote_identifier,
    error::{AppError, config_error},
    model::TableSpec
};

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Sql,
    Dbt,
    All
}

impl Target {
    pub fn includes_sql(&self) -> bool {
        matches!(self, Self::Sql | Self::All)
    }

    pub fn includes_dbt(&self) -> bool {
        matches!(self, Self::Dbt | Self::All)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql => write!(f, "sql"),
            Self::Dbt => write!(f, "dbt"),
            Self::All => write!(f, "all")
        }
    }
}

impl FromStr for Target {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(Self::Sql),
            "dbt" => Ok(Self::Dbt),
            "all" => Ok(Self::All),
            other => Err(config_error(format!(
                "Unknown target '{}' (expected sql, dbt or all)",
                other
            )))
        }
    }
}

/// Options affecting rendered text but not compiled expressions.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Optional catalog prefix of the source relation
    pub catalog: Option<String>
}

/// Qualified, quoted source relation: `catalog.layer.table` or `layer.table`.
pub fn source_relation(
    table: &TableSpec,
    statement: &CompiledStatement,
    opts: &RenderOptions
) -> String {
    let syntax = statement.dialect.syntax();
    let mut parts = Vec::with_capacity(3);
    if let Some(catalog) = opts.catalog.as_deref().filter(|c| !c.is_empty()) {
        parts.push(quote_identifier(catalog, syntax));
    }
    parts.push(quote_identifier(table.layer.as_str(), syntax));
    parts.push(quote_identifier(&table.name, syntax));
    parts.join(".")
}

/// Projection items in declared order, each flag companion right after its
/// column.
pub fn select_items(statement: &CompiledStatement) -> Vec<String> {
    let syntax = statement.dialect.syntax();
    let mut items = Vec::with_capacity(statement.projection.len());
    for column in &statement.projection {
        items.push(format!(
            "{} AS {}",
            column.expression,
            quote_identifier(&column.name, syntax)
        ));
        if let Some(flag) = &column.flag {
            items.push(format!(
                "{} AS {}",
                flag.expression,
                quote_identifier(&flag.name, syntax)
            ));
        }
    }
    items
}

/// Body of the `cleaned` CTE selecting from `from`.
pub(crate) fn cleaned_select(statement: &CompiledStatement, from: &str) -> String {
    let mut sql = String::from("    SELECT\n        ");
    sql.push_str(&select_items(statement).join(",\n        "));
    sql.push_str("\n    FROM ");
    sql.push_str(from);
    if let Some(predicate) = &statement.where_clause {
        sql.push_str("\n    WHERE ");
        sql.push_str(predicate);
    }
    sql.push('\n');
    sql
}

/// Render the SQL target document.
pub fn render_sql(
    statement: &CompiledStatement,
    table: &TableSpec,
    opts: &RenderOptions
) -> String {
    let source = source_relation(table, statement, opts);
    format!(
        "WITH cleaned AS (\n{})\nSELECT * FROM cleaned",
        cleaned_select(statement, &source)
    )
}
