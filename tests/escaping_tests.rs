//! Literal escaping round-trips through the SQL parser of each dialect.

use transform_forge::{
    check::{check_statement, literal_value},
    compiler::{assemble, compile_column},
    dialect::{Dialect, quote_literal},
    model::{
        Column, ColumnTransformations, ConditionalCase, ConditionalTransform, DataType,
        DelimiterSplit, Layer, NullStrategy, TableSpec
    },
    render::{RenderOptions, render_sql}
};

const HOSTILE: &[&str] = &[
    "O'Brien",
    "''",
    "'",
    "back\\slash",
    "trailing\\",
    "it\\'s a trap",
    "line\nbreak",
    "carriage\rreturn",
    "tab\there",
    "semi;colon -- not a comment",
    "/* nope */",
    "100%_",
    "",
    "ünïcödé ✓"
];

/// Dialects whose parser in `sqlparser` reads literals with the same rules
/// the engine escapes for.
const PARSED: &[Dialect] = &[
    Dialect::Ansi,
    Dialect::Postgresql,
    Dialect::Tsql,
    Dialect::Mysql,
    Dialect::SnowflakeSql,
    Dialect::BigquerySql
];

#[test]
fn test_literal_round_trip() {
    for &dialect in PARSED {
        for &value in HOSTILE {
            let literal = quote_literal(value, dialect.syntax());
            assert_eq!(
                literal_value(&literal, dialect).as_deref(),
                Some(value),
                "{} literal {} did not round-trip",
                dialect,
                literal
            );
        }
    }
}

#[test]
fn test_null_replacement_embeds_escaped_literal() {
    for dialect in Dialect::ALL {
        for &value in HOSTILE {
            let c = Column::new("city", DataType::String).with_transformations(
                ColumnTransformations {
                    null_strategy: NullStrategy::Replace,
                    null_replacement: value.to_string(),
                    ..Default::default()
                }
            );
            let compiled = compile_column(&c, dialect);
            let literal = quote_literal(value, dialect.syntax());
            assert!(
                compiled.expression.ends_with(&format!(", {})", literal)),
                "{}: {}",
                dialect,
                compiled.expression
            );
        }
    }
}

#[test]
fn test_conditional_values_embed_escaped_literals() {
    for dialect in Dialect::ALL {
        for &value in HOSTILE {
            let c = Column::new("s", DataType::String).with_transformations(
                ColumnTransformations {
                    conditional: ConditionalTransform {
                        enabled:    true,
                        cases:      vec![ConditionalCase {
                            when: "1 = 1".to_string(),
                            then: value.to_string()
                        }],
                        else_value: format!("{}!", value)
                    },
                    ..Default::default()
                }
            );
            let compiled = compile_column(&c, dialect);
            let syntax = dialect.syntax();
            assert_eq!(
                compiled.expression,
                format!(
                    "CASE WHEN 1 = 1 THEN {} ELSE {} END",
                    quote_literal(value, syntax),
                    quote_literal(&format!("{}!", value), syntax)
                )
            );
        }
    }
}

#[test]
fn test_delimiter_embeds_escaped_literal() {
    for dialect in [
        Dialect::Postgresql,
        Dialect::SnowflakeSql,
        Dialect::BigquerySql,
        Dialect::Mysql
    ] {
        for &value in HOSTILE.iter().filter(|v| !v.is_empty()) {
            let c = Column::new("v", DataType::String).with_transformations(
                ColumnTransformations {
                    delimiter_split: DelimiterSplit {
                        enabled:   true,
                        delimiter: value.to_string(),
                        index:     0
                    },
                    ..Default::default()
                }
            );
            let compiled = compile_column(&c, dialect);
            assert!(
                compiled
                    .expression
                    .contains(&quote_literal(value, dialect.syntax()))
            );
        }
    }
}

#[test]
fn test_hostile_statement_parses() {
    for dialect in [
        Dialect::Ansi,
        Dialect::Postgresql,
        Dialect::Mysql,
        Dialect::SnowflakeSql
    ] {
        let columns = HOSTILE
            .iter()
            .enumerate()
            .map(|(i, value)| {
                Column::new(format!("c{}", i), DataType::String).with_transformations(
                    ColumnTransformations {
                        null_strategy: NullStrategy::Replace,
                        null_replacement: value.to_string(),
                        ..Default::default()
                    }
                )
            })
            .collect();
        let table = TableSpec::new("t", Layer::Bronze, columns);
        let statement = assemble(&table, dialect);
        let sql = render_sql(&statement, &table, &RenderOptions::default());
        assert_eq!(check_statement(&sql, dialect), None, "{}", sql);
    }
}
