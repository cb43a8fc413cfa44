//! dbt model rendering.
//!
//! The model selects from `{{ source('<layer>', '<table>') }}` and the
//! accompanying `schema.yml` documents every projected column, adding a
//! `not_null` test where the output can never be NULL.

use serde::Serialize;

use super::cleaned_select;
use crate::{
    compiler::CompiledStatement,
    error::{AppResult, render_error},
    model::{NullStrategy, TableSpec}
};

/// Rendered dbt artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbtModel {
    pub model_sql:  String,
    pub schema_yml: String
}

#[derive(Debug, Serialize)]
struct SchemaFile {
    version: u8,
    models:  Vec<ModelDoc>
}

#[derive(Debug, Serialize)]
struct ModelDoc {
    name:    String,
    columns: Vec<ColumnDoc>
}

#[derive(Debug, Serialize)]
struct ColumnDoc {
    name:        String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tests:       Vec<&'static str>
}

fn jinja_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Render the dbt model SQL and `schema.yml` for a compiled table.
///
/// # Errors
///
/// Returns an error if the schema document cannot be serialized.
pub fn render_dbt(statement: &CompiledStatement, table: &TableSpec) -> AppResult<DbtModel> {
    let model_sql = format!(
        "WITH source AS (\n    SELECT * FROM {{{{ source({}, {}) }}}}\n),\ncleaned AS \
         (\n{})\nSELECT * FROM cleaned",
        jinja_string(table.layer.as_str()),
        jinja_string(&table.name),
        cleaned_select(statement, "source")
    );

    let mut columns = Vec::with_capacity(table.columns.len());
    for (column, compiled) in table.columns.iter().zip(&statement.projection) {
        // A degraded column is the raw reference, so only `nullable` counts.
        let filled = !compiled.has_errors()
            && matches!(
                column.transformations.null_strategy,
                NullStrategy::Drop | NullStrategy::Replace
            );
        columns.push(ColumnDoc {
            name:        column.name.clone(),
            description: table.note_for(column).map(str::to_string),
            tests:       if !column.nullable || filled {
                vec!["not_null"]
            } else {
                Vec::new()
            }
        });
        if let Some(flag) = &compiled.flag {
            columns.push(ColumnDoc {
                name:        flag.name.clone(),
                description: Some(format!("NULL indicator for {}", column.name)),
                tests:       vec!["not_null"]
            });
        }
    }

    let schema = SchemaFile {
        version: 2,
        models:  vec![ModelDoc {
            name: table.name.clone(),
            columns
        }]
    };
    let schema_yml = serde_yaml::to_string(&schema)
        .map_err(|e| render_error(format!("Failed to render schema.yml: {}", e)))?;

    Ok(DbtModel {
        model_sql,
        schema_yml
    })
}
