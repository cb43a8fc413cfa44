//! Statement assembler: compiles every column of a table and merges the
//! row-filter contributions into one WHERE clause.

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::info;

use super::{
    column::compile_column,
    types::{CompiledColumn, CompiledStatement, Diagnostic, Severity}
};
use crate::{dialect::Dialect, model::TableSpec};

/// Compile all columns of `table` for `dialect`.
///
/// Columns are compiled in parallel; the projection keeps declared column
/// order regardless of completion order. The WHERE clause is the conjunction
/// of every column's row filter and is `None` when no column contributes one.
///
/// # Example
///
/// ```
/// use transform_forge::{
///     compiler::assemble,
///     dialect::Dialect,
///     model::{Column, ColumnTransformations, DataType, Layer, NullStrategy, TableSpec}
/// };
///
/// let table = TableSpec::new(
///     "customers",
///     Layer::Bronze,
///     vec![
///         Column::new("id", DataType::Integer).with_transformations(ColumnTransformations {
///             null_strategy: NullStrategy::Drop,
///             ..Default::default()
///         }),
///         Column::new("name", DataType::String),
///     ]
/// );
/// let statement = assemble(&table, Dialect::Ansi);
/// assert_eq!(statement.projection.len(), 2);
/// assert_eq!(statement.where_clause.as_deref(), Some("(\"id\" IS NOT NULL)"));
/// ```
pub fn assemble(table: &TableSpec, dialect: Dialect) -> CompiledStatement {
    let projection: Vec<CompiledColumn> = table
        .columns
        .par_iter()
        .map(|column| compile_column(column, dialect))
        .collect();

    let where_clause = conjunction(&projection);
    let mut diagnostics = duplicate_names(table);
    diagnostics.extend(companion_clashes(table, &projection));

    let statement = CompiledStatement {
        table: table.name.clone(),
        dialect,
        projection,
        where_clause,
        diagnostics
    };
    info!(
        table = %statement.table,
        dialect = %dialect,
        columns = statement.projection.len(),
        errors = statement.error_count(),
        warnings = statement.warning_count(),
        notices = statement.info_count(),
        "assembled statement"
    );
    statement
}

fn conjunction(projection: &[CompiledColumn]) -> Option<String> {
    let filters: Vec<&str> = projection
        .iter()
        .filter_map(|c| c.row_filter.as_deref())
        .collect();
    if filters.is_empty() {
        None
    } else {
        Some(filters.join(" AND "))
    }
}

fn duplicate_names(table: &TableSpec) -> Vec<Diagnostic> {
    let mut seen = IndexSet::new();
    table
        .columns
        .iter()
        .filter(|c| !seen.insert(c.name.as_str()))
        .map(|c| {
            Diagnostic::notice(
                &c.name,
                Severity::Warning,
                format!(
                    "column '{}' is declared more than once in table '{}'",
                    c.name, table.name
                )
            )
        })
        .collect()
}

/// A `flag` companion whose generated name matches a declared column would
/// project the same alias twice.
fn companion_clashes(table: &TableSpec, projection: &[CompiledColumn]) -> Vec<Diagnostic> {
    let declared: IndexSet<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    projection
        .iter()
        .filter_map(|c| c.flag.as_ref().map(|flag| (c, flag)))
        .filter(|(_, flag)| declared.contains(flag.name.as_str()))
        .map(|(c, flag)| {
            Diagnostic::notice(
                &c.name,
                Severity::Warning,
                format!(
                    "null flag column '{}' clashes with a declared column of the same name",
                    flag.name
                )
            )
        })
        .collect()
}
