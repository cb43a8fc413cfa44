use transform_forge::{
    compiler::{DiagnosticKind, Severity, assemble, compile_column, flag_column_name},
    dialect::Dialect,
    model::{
        CaseNormalization, Column, ColumnTransformations, ConditionalCase, ConditionalTransform,
        DataType, DelimiterSplit, Layer, NullStrategy, RegexTransform, TableSpec, WhereFilter
    }
};

fn column(name: &str, data_type: DataType, t: ColumnTransformations) -> Column {
    Column::new(name, data_type).with_transformations(t)
}

fn everything_enabled() -> ColumnTransformations {
    ColumnTransformations {
        trim: true,
        case_normalization: CaseNormalization::Title,
        null_strategy: NullStrategy::Replace,
        null_replacement: "n/a".to_string(),
        type_cast: "string".to_string(),
        strip_special_chars: true,
        regex: RegexTransform {
            enabled:     true,
            pattern:     "\\s+".to_string(),
            replacement: " ".to_string()
        },
        where_filter: WhereFilter {
            enabled:   true,
            condition: "length(name) > 0".to_string()
        },
        conditional: ConditionalTransform {
            enabled:    true,
            cases:      vec![ConditionalCase {
                when: "name = 'x'".to_string(),
                then: "ex".to_string()
            }],
            else_value: String::new()
        },
        delimiter_split: DelimiterSplit {
            enabled:   true,
            delimiter: "|".to_string(),
            index:     1
        },
        custom_expression: String::new()
    }
}

#[test]
fn test_scenario_trim_upper_ansi() {
    let c = column(
        "email",
        DataType::String,
        ColumnTransformations {
            trim: true,
            case_normalization: CaseNormalization::Upper,
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "UPPER(TRIM(\"email\"))");
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn test_scenario_cast_null_replace() {
    let c = column(
        "amount",
        DataType::Float,
        ColumnTransformations {
            type_cast: "float".to_string(),
            null_strategy: NullStrategy::Replace,
            null_replacement: "0".to_string(),
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "COALESCE(CAST(\"amount\" AS FLOAT), 0)");
    assert!(compiled.row_filter.is_none());
}

#[test]
fn test_scenario_conditional() {
    let c = column(
        "status",
        DataType::String,
        ColumnTransformations {
            conditional: ConditionalTransform {
                enabled:    true,
                cases:      vec![ConditionalCase {
                    when: "age < 18".to_string(),
                    then: "minor".to_string()
                }],
                else_value: "adult".to_string()
            },
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(
        compiled.expression,
        "CASE WHEN age < 18 THEN 'minor' ELSE 'adult' END"
    );
}

#[test]
fn test_conditional_keeps_case_order() {
    let c = column(
        "bucket",
        DataType::Integer,
        ColumnTransformations {
            conditional: ConditionalTransform {
                enabled:    true,
                cases:      vec![
                    ConditionalCase {
                        when: "v > 100".to_string(),
                        then: "high".to_string()
                    },
                    ConditionalCase {
                        when: "v > 10".to_string(),
                        then: "mid".to_string()
                    },
                ],
                else_value: String::new()
            },
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Postgresql);
    assert_eq!(
        compiled.expression,
        "CASE WHEN v > 100 THEN 'high' WHEN v > 10 THEN 'mid' ELSE \"bucket\" END"
    );
}

#[test]
fn test_scenario_regex_unsupported() {
    for dialect in [Dialect::Tsql, Dialect::Ansi] {
        let without_regex = column(
            "phone",
            DataType::String,
            ColumnTransformations {
                trim: true,
                ..Default::default()
            }
        );
        let with_regex = column(
            "phone",
            DataType::String,
            ColumnTransformations {
                trim: true,
                regex: RegexTransform {
                    enabled:     true,
                    pattern:     "[^0-9]".to_string(),
                    replacement: String::new()
                },
                ..Default::default()
            }
        );
        let before = compile_column(&without_regex, dialect);
        let after = compile_column(&with_regex, dialect);

        assert_eq!(after.expression, before.expression);
        let warning = after
            .warnings()
            .next()
            .expect("regex warning expected");
        assert_eq!(warning.column, "phone");
        assert_eq!(warning.kind, DiagnosticKind::UnsupportedFeature);
        assert!(warning.message.contains("regex unsupported"));
    }
}

#[test]
fn test_regex_supported_dialects() {
    let c = column(
        "phone",
        DataType::String,
        ColumnTransformations {
            regex: RegexTransform {
                enabled:     true,
                pattern:     "[^0-9]".to_string(),
                replacement: String::new()
            },
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&c, Dialect::Postgresql).expression,
        "REGEXP_REPLACE(\"phone\", '[^0-9]', '', 'g')"
    );
    assert_eq!(
        compile_column(&c, Dialect::SnowflakeSql).expression,
        "REGEXP_REPLACE(\"phone\", '[^0-9]', '')"
    );
    assert_eq!(
        compile_column(&c, Dialect::BigquerySql).expression,
        "REGEXP_REPLACE(`phone`, '[^0-9]', '')"
    );
}

#[test]
fn test_determinism() {
    let c = column("name", DataType::String, everything_enabled());
    for dialect in Dialect::ALL {
        assert_eq!(compile_column(&c, dialect), compile_column(&c, dialect));
    }
}

#[test]
fn test_field_order_independence() {
    let mut forward = ColumnTransformations::default();
    forward.trim = true;
    forward.case_normalization = CaseNormalization::Lower;
    forward.type_cast = "string".to_string();
    forward.null_strategy = NullStrategy::Replace;
    forward.null_replacement = "none".to_string();

    let mut backward = ColumnTransformations::default();
    backward.null_replacement = "none".to_string();
    backward.null_strategy = NullStrategy::Replace;
    backward.type_cast = "string".to_string();
    backward.case_normalization = CaseNormalization::Lower;
    backward.trim = true;

    for dialect in Dialect::ALL {
        let a = compile_column(&column("c", DataType::String, forward.clone()), dialect);
        let b = compile_column(&column("c", DataType::String, backward.clone()), dialect);
        assert_eq!(a, b);
    }
}

#[test]
fn test_disabled_transforms_are_inert() {
    let mut disabled = everything_enabled();
    disabled.regex.enabled = false;
    disabled.where_filter.enabled = false;
    disabled.conditional.enabled = false;
    disabled.delimiter_split.enabled = false;

    let mut plain = everything_enabled();
    plain.regex = RegexTransform::default();
    plain.where_filter = WhereFilter::default();
    plain.conditional = ConditionalTransform::default();
    plain.delimiter_split = DelimiterSplit::default();

    for dialect in Dialect::ALL {
        let a = compile_column(&column("name", DataType::String, disabled.clone()), dialect);
        let b = compile_column(&column("name", DataType::String, plain.clone()), dialect);
        assert_eq!(a.expression, b.expression);
        assert_eq!(a.diagnostics, b.diagnostics);
        assert_eq!(a.row_filter, b.row_filter);
    }
}

#[test]
fn test_untransformed_column_is_quoted_reference() {
    let c = Column::new("order id", DataType::Integer);
    assert_eq!(compile_column(&c, Dialect::Ansi).expression, "\"order id\"");
    assert_eq!(compile_column(&c, Dialect::Tsql).expression, "[order id]");
    assert_eq!(compile_column(&c, Dialect::Mysql).expression, "`order id`");
}

#[test]
fn test_title_case_forms() {
    let c = column(
        "name",
        DataType::String,
        ColumnTransformations {
            case_normalization: CaseNormalization::Title,
            ..Default::default()
        }
    );
    let native = compile_column(&c, Dialect::SnowflakeSql);
    assert_eq!(native.expression, "INITCAP(\"name\")");
    assert!(native.diagnostics.is_empty());

    let per_word = compile_column(&c, Dialect::Mysql);
    assert!(per_word.expression.starts_with("(SELECT GROUP_CONCAT("));
    assert!(per_word.expression.contains("JSON_ARRAY(`name`)"));
    assert_eq!(per_word.warnings().count(), 1);

    let tsql = compile_column(&c, Dialect::Tsql);
    assert!(tsql.expression.contains("STRING_SPLIT([name], ' ', 1)"));
    assert!(tsql.expression.contains("ORDER BY w.ordinal"));
    assert!(tsql.warnings().any(|w| w.message.contains("per space-separated word")));

    let first_char = compile_column(&c, Dialect::Ansi);
    assert_eq!(
        first_char.expression,
        "(UPPER(SUBSTRING(\"name\" FROM 1 FOR 1)) || LOWER(SUBSTRING(\"name\" FROM 2)))"
    );
    assert!(
        first_char
            .warnings()
            .any(|w| w.message.contains("only the first character"))
    );
}

#[test]
fn test_strip_special_chars() {
    let c = column(
        "sku",
        DataType::String,
        ColumnTransformations {
            strip_special_chars: true,
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&c, Dialect::SparkSql).expression,
        "REGEXP_REPLACE(`sku`, '[^a-zA-Z0-9]', '')"
    );
    let tsql = compile_column(&c, Dialect::Tsql);
    assert_eq!(tsql.expression, "[sku]");
    assert_eq!(tsql.warnings().count(), 1);
}

#[test]
fn test_delimiter_split_index_conversion() {
    let c = column(
        "full_name",
        DataType::String,
        ColumnTransformations {
            delimiter_split: DelimiterSplit {
                enabled:   true,
                delimiter: " ".to_string(),
                index:     0
            },
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&c, Dialect::Postgresql).expression,
        "SPLIT_PART(\"full_name\", ' ', 1)"
    );
    assert_eq!(
        compile_column(&c, Dialect::SnowflakeSql).expression,
        "SPLIT_PART(\"full_name\", ' ', 1)"
    );
    assert_eq!(
        compile_column(&c, Dialect::BigquerySql).expression,
        "SPLIT(`full_name`, ' ')[SAFE_OFFSET(0)]"
    );
    assert_eq!(
        compile_column(&c, Dialect::SparkSql).expression,
        "SPLIT(`full_name`, ' ')[0]"
    );
    assert_eq!(
        compile_column(&c, Dialect::Mysql).expression,
        "SUBSTRING_INDEX(SUBSTRING_INDEX(`full_name`, ' ', 1), ' ', -1)"
    );
    let ansi = compile_column(&c, Dialect::Ansi);
    assert_eq!(ansi.expression, "\"full_name\"");
    assert!(ansi.warnings().next().is_some());
}

#[test]
fn test_cast_styles() {
    let c = column(
        "qty",
        DataType::String,
        ColumnTransformations {
            type_cast: "integer".to_string(),
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&c, Dialect::Postgresql).expression,
        "(\"qty\")::BIGINT"
    );
    assert_eq!(
        compile_column(&c, Dialect::BigquerySql).expression,
        "CAST(`qty` AS INT64)"
    );
    assert_eq!(
        compile_column(&c, Dialect::Mysql).expression,
        "CAST(`qty` AS SIGNED)"
    );
}

#[test]
fn test_cast_verbatim_type_is_info() {
    let c = column(
        "price",
        DataType::String,
        ColumnTransformations {
            type_cast: "DECIMAL(10, 2)".to_string(),
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "CAST(\"price\" AS DECIMAL(10, 2))");
    assert_eq!(compiled.diagnostics.len(), 1);
    assert_eq!(compiled.diagnostics[0].severity, Severity::Info);
}

#[test]
fn test_cast_unsupported_target_warns() {
    let c = column(
        "payload",
        DataType::String,
        ColumnTransformations {
            type_cast: "json".to_string(),
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Tsql);
    assert_eq!(compiled.expression, "[payload]");
    assert_eq!(compiled.warnings().count(), 1);

    let snowflake = compile_column(&c, Dialect::SnowflakeSql);
    assert_eq!(snowflake.expression, "PARSE_JSON(\"payload\")");
}

#[test]
fn test_null_replace_typed_literals() {
    let date = column(
        "signup",
        DataType::Date,
        ColumnTransformations {
            null_strategy: NullStrategy::Replace,
            null_replacement: "1970-01-01".to_string(),
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&date, Dialect::Ansi).expression,
        "COALESCE(\"signup\", CAST('1970-01-01' AS DATE))"
    );

    let flag = column(
        "active",
        DataType::Boolean,
        ColumnTransformations {
            null_strategy: NullStrategy::Replace,
            null_replacement: "false".to_string(),
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&flag, Dialect::Tsql).expression,
        "COALESCE([active], 0)"
    );
    assert_eq!(
        compile_column(&flag, Dialect::Postgresql).expression,
        "COALESCE(\"active\", FALSE)"
    );

    let text = column(
        "city",
        DataType::String,
        ColumnTransformations {
            null_strategy: NullStrategy::Replace,
            null_replacement: "O'Hare".to_string(),
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&text, Dialect::Ansi).expression,
        "COALESCE(\"city\", 'O''Hare')"
    );
}

#[test]
fn test_null_replace_non_numeric_warns() {
    let c = column(
        "amount",
        DataType::Integer,
        ColumnTransformations {
            null_strategy: NullStrategy::Replace,
            null_replacement: "unknown".to_string(),
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "COALESCE(\"amount\", 'unknown')");
    assert_eq!(compiled.warnings().count(), 1);
}

#[test]
fn test_null_flag_companion() {
    let c = column(
        "email",
        DataType::String,
        ColumnTransformations {
            trim: true,
            null_strategy: NullStrategy::Flag,
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "TRIM(\"email\")");
    let flag = compiled.flag.as_ref().expect("flag companion");
    assert_eq!(flag.name, flag_column_name("email"));
    assert_eq!(flag.name, "email_is_null");
    assert_eq!(flag.expression, "(TRIM(\"email\") IS NULL)");
    assert!(compiled.warnings().any(|w| w.message.contains("email_is_null")));

    let tsql = compile_column(&c, Dialect::Tsql);
    assert_eq!(
        tsql.flag.map(|f| f.expression).as_deref(),
        Some("CASE WHEN LTRIM(RTRIM([email])) IS NULL THEN 1 ELSE 0 END")
    );
}

#[test]
fn test_drop_and_where_share_row_filter() {
    let c = column(
        "amount",
        DataType::Float,
        ColumnTransformations {
            null_strategy: NullStrategy::Drop,
            where_filter: WhereFilter {
                enabled:   true,
                condition: "amount > 0".to_string()
            },
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "\"amount\"");
    assert_eq!(
        compiled.row_filter.as_deref(),
        Some("(\"amount\" IS NOT NULL) AND (amount > 0)")
    );
}

#[test]
fn test_custom_expression_is_wrapped() {
    let c = column(
        "full_name",
        DataType::String,
        ColumnTransformations {
            custom_expression: "first_name || ' ' || last_name".to_string(),
            trim: true,
            case_normalization: CaseNormalization::Upper,
            ..Default::default()
        }
    );
    assert_eq!(
        compile_column(&c, Dialect::Ansi).expression,
        "UPPER(TRIM(first_name || ' ' || last_name))"
    );
}

#[test]
fn test_drop_with_custom_expression_filters_projected_value() {
    let c = column(
        "full_name",
        DataType::String,
        ColumnTransformations {
            custom_expression: "NULLIF(first_name, '')".to_string(),
            trim: true,
            null_strategy: NullStrategy::Drop,
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "TRIM(NULLIF(first_name, ''))");
    assert_eq!(
        compiled.row_filter.as_deref(),
        Some("(TRIM(NULLIF(first_name, '')) IS NOT NULL)")
    );
}

#[test]
fn test_split_index_out_of_range_is_malformed() {
    let c = column(
        "tags",
        DataType::String,
        ColumnTransformations {
            delimiter_split: DelimiterSplit {
                enabled:   true,
                delimiter: ",".to_string(),
                index:     usize::MAX
            },
            ..Default::default()
        }
    );
    for dialect in Dialect::ALL {
        let compiled = compile_column(&c, dialect);
        assert!(compiled.has_errors());
        assert!(
            compiled
                .errors()
                .any(|e| e.kind == DiagnosticKind::MalformedConfig && e.message.contains("index"))
        );
    }
    assert_eq!(compile_column(&c, Dialect::Postgresql).expression, "\"tags\"");
}

#[test]
fn test_flag_companion_name_clash_warns() {
    let table = TableSpec::new(
        "people",
        Layer::Silver,
        vec![
            column(
                "email",
                DataType::String,
                ColumnTransformations {
                    null_strategy: NullStrategy::Flag,
                    ..Default::default()
                }
            ),
            column("email_is_null", DataType::Boolean, ColumnTransformations::default()),
        ]
    );
    let statement = assemble(&table, Dialect::Postgresql);
    assert!(
        statement
            .diagnostics
            .iter()
            .any(|d| d.column == "email" && d.message.contains("email_is_null"))
    );

    let no_clash = TableSpec::new("people", Layer::Silver, vec![table.columns[0].clone()]);
    assert!(assemble(&no_clash, Dialect::Postgresql).diagnostics.is_empty());
}

#[test]
fn test_string_transform_on_numeric_column_warns() {
    let c = column(
        "zip",
        DataType::Integer,
        ColumnTransformations {
            trim: true,
            ..Default::default()
        }
    );
    let compiled = compile_column(&c, Dialect::Ansi);
    assert_eq!(compiled.expression, "TRIM(\"zip\")");
    assert!(
        compiled
            .warnings()
            .any(|w| w.message.contains("trim") && w.message.contains("integer"))
    );
}

#[test]
fn test_malformed_configs_degrade() {
    let cases = [
        ColumnTransformations {
            trim: true,
            delimiter_split: DelimiterSplit {
                enabled:   true,
                delimiter: String::new(),
                index:     0
            },
            ..Default::default()
        },
        ColumnTransformations {
            trim: true,
            conditional: ConditionalTransform {
                enabled:    true,
                cases:      Vec::new(),
                else_value: "x".to_string()
            },
            ..Default::default()
        },
        ColumnTransformations {
            trim: true,
            where_filter: WhereFilter {
                enabled:   true,
                condition: "   ".to_string()
            },
            ..Default::default()
        },
        ColumnTransformations {
            trim: true,
            type_cast: "not a; type".to_string(),
            ..Default::default()
        },
    ];
    for t in cases {
        let compiled = compile_column(&column("v", DataType::String, t), Dialect::Postgresql);
        assert_eq!(compiled.expression, "\"v\"");
        assert!(compiled.has_errors());
        assert!(compiled.row_filter.is_none());
        assert!(
            compiled
                .errors()
                .all(|e| e.kind == DiagnosticKind::MalformedConfig && e.column == "v")
        );
    }
}

#[test]
fn test_column_order_preserved() {
    let names: Vec<String> = (0..64).map(|i| format!("c{:02}", 63 - i)).collect();
    let columns: Vec<Column> = names
        .iter()
        .map(|n| {
            column(
                n,
                DataType::String,
                ColumnTransformations {
                    trim: true,
                    ..Default::default()
                }
            )
        })
        .collect();
    let table = TableSpec::new("wide", Layer::Bronze, columns.clone());

    let statement = assemble(&table, Dialect::SnowflakeSql);
    let expected: Vec<_> = columns
        .iter()
        .map(|c| compile_column(c, Dialect::SnowflakeSql))
        .collect();
    assert_eq!(statement.projection, expected);
}

#[test]
fn test_where_conjunction() {
    let table = TableSpec::new(
        "t",
        Layer::Silver,
        vec![
            column(
                "c1",
                DataType::String,
                ColumnTransformations {
                    null_strategy: NullStrategy::Drop,
                    ..Default::default()
                }
            ),
            column(
                "c2",
                DataType::Integer,
                ColumnTransformations {
                    where_filter: WhereFilter {
                        enabled:   true,
                        condition: "x > 0".to_string()
                    },
                    ..Default::default()
                }
            ),
            Column::new("c3", DataType::String),
        ]
    );
    let statement = assemble(&table, Dialect::Ansi);
    assert_eq!(
        statement.where_clause.as_deref(),
        Some("(\"c1\" IS NOT NULL) AND (x > 0)")
    );
}

#[test]
fn test_no_filters_no_where() {
    let table = TableSpec::new(
        "t",
        Layer::Bronze,
        vec![Column::new("a", DataType::String)]
    );
    assert!(assemble(&table, Dialect::Ansi).where_clause.is_none());
}

#[test]
fn test_duplicate_column_names_warn() {
    let table = TableSpec::new(
        "t",
        Layer::Bronze,
        vec![
            Column::new("a", DataType::String),
            Column::new("a", DataType::Integer),
        ]
    );
    let statement = assemble(&table, Dialect::Ansi);
    assert_eq!(statement.projection.len(), 2);
    assert_eq!(statement.diagnostics.len(), 1);
    assert_eq!(statement.warning_count(), 1);
    assert_eq!(statement.max_severity(), Some(Severity::Warning));
}

#[test]
fn test_statement_counts() {
    let table = TableSpec::new(
        "t",
        Layer::Bronze,
        vec![
            column(
                "ok",
                DataType::String,
                ColumnTransformations {
                    trim: true,
                    ..Default::default()
                }
            ),
            column(
                "bad",
                DataType::String,
                ColumnTransformations {
                    regex: RegexTransform {
                        enabled:     true,
                        pattern:     String::new(),
                        replacement: String::new()
                    },
                    ..Default::default()
                }
            ),
        ]
    );
    let statement = assemble(&table, Dialect::Postgresql);
    assert_eq!(statement.error_count(), 1);
    assert_eq!(statement.max_severity(), Some(Severity::Error));
    assert_eq!(statement.projection[0].expression, "TRIM(\"ok\")");
    assert_eq!(statement.projection[1].expression, "\"bad\"");
}
