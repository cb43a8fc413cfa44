//! Column compiler: composes enabled transforms in a fixed pipeline order.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::{
    builder::{self, CastRequest, Fragment},
    types::{CompanionColumn, CompiledColumn, Diagnostic, Diagnostics, Severity}
};
use crate::{
    dialect::{Dialect, DialectSyntax, describe, quote_identifier, quote_literal},
    model::{CaseNormalization, Column, DataType, NullStrategy}
};

/// Plain SQL type name, optionally parameterized: `DECIMAL(10, 2)`,
/// `DOUBLE PRECISION`, `VARCHAR(64)`.
static VERBATIM_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\s+[A-Za-z][A-Za-z0-9_]*)*(\s*\(\s*\d+\s*(,\s*\d+\s*)?\))?$")
        .expect("valid regex")
});

/// Companion flag column name for `null_strategy = flag`.
pub fn flag_column_name(column: &str) -> String {
    format!("{}_is_null", column)
}

/// Compile one column into a value expression, row-filter contribution and
/// optional flag companion.
///
/// Pipeline order: start expression, trim, case, strip special characters,
/// delimiter split, regex, cast, null strategy, conditional, where filter.
/// A malformed configuration degrades the column to its quoted reference
/// with error diagnostics; unsupported transforms are skipped with warnings.
///
/// # Example
///
/// ```
/// use transform_forge::{
///     compiler::compile_column,
///     dialect::Dialect,
///     model::{CaseNormalization, Column, ColumnTransformations, DataType}
/// };
///
/// let column = Column::new("email", DataType::String).with_transformations(
///     ColumnTransformations {
///         trim: true,
///         case_normalization: CaseNormalization::Upper,
///         ..Default::default()
///     }
/// );
/// let compiled = compile_column(&column, Dialect::Ansi);
/// assert_eq!(compiled.expression, "UPPER(TRIM(\"email\"))");
/// ```
pub fn compile_column(column: &Column, dialect: Dialect) -> CompiledColumn {
    let syntax = describe(dialect);
    let reference = quote_identifier(&column.name, syntax);

    let plan = match Plan::resolve(column) {
        Ok(plan) => plan,
        Err(problems) => {
            warn!(
                column = %column.name,
                dialect = %dialect,
                problems = problems.len(),
                "malformed transform configuration, emitting raw column reference"
            );
            return CompiledColumn {
                name:        column.name.clone(),
                expression:  reference,
                row_filter:  None,
                flag:        None,
                diagnostics: problems
            };
        }
    };

    let mut pipeline = Pipeline::new(column, syntax, reference);
    pipeline.run(&plan);
    let compiled = pipeline.finish();
    debug!(
        column = %compiled.name,
        dialect = %dialect,
        expression = %compiled.expression,
        diagnostics = compiled.diagnostics.len(),
        "compiled column"
    );
    compiled
}

/// Parameters validated before rendering.
struct Plan<'a> {
    cast: Option<CastRequest<'a>>
}

impl<'a> Plan<'a> {
    fn resolve(column: &'a Column) -> Result<Self, Diagnostics> {
        let t = &column.transformations;
        let name = column.name.as_str();
        let mut problems = Diagnostics::new();

        if t.delimiter_split.enabled && t.delimiter_split.delimiter.is_empty() {
            problems.push(Diagnostic::malformed(
                name,
                "delimiter_split is enabled with an empty delimiter"
            ));
        }
        if t.delimiter_split.enabled && t.delimiter_split.index.checked_add(1).is_none() {
            problems.push(Diagnostic::malformed(
                name,
                format!(
                    "delimiter_split index {} is out of range",
                    t.delimiter_split.index
                )
            ));
        }
        if t.regex.enabled && t.regex.pattern.is_empty() {
            problems.push(Diagnostic::malformed(
                name,
                "regex is enabled with an empty pattern"
            ));
        }
        if t.conditional.enabled {
            if t.conditional.cases.is_empty() {
                problems.push(Diagnostic::malformed(
                    name,
                    "conditional is enabled without any cases"
                ));
            }
            for (i, case) in t.conditional.cases.iter().enumerate() {
                if case.when.trim().is_empty() {
                    problems.push(Diagnostic::malformed(
                        name,
                        format!("conditional case #{} has an empty WHEN predicate", i + 1)
                    ));
                }
            }
        }
        if t.where_filter.enabled && t.where_filter.condition.trim().is_empty() {
            problems.push(Diagnostic::malformed(
                name,
                "where_filter is enabled with an empty condition"
            ));
        }

        let type_cast = t.type_cast.trim();
        let cast = if type_cast.is_empty() {
            None
        } else if let Some(data_type) = DataType::from_cast_name(type_cast) {
            Some(CastRequest::Engine(data_type))
        } else if VERBATIM_TYPE.is_match(type_cast) {
            Some(CastRequest::Verbatim(type_cast))
        } else {
            problems.push(Diagnostic::malformed(
                name,
                format!("type_cast '{}' is not a recognizable type name", type_cast)
            ));
            None
        };

        if problems.is_empty() {
            Ok(Self { cast })
        } else {
            Err(problems)
        }
    }
}

struct Pipeline<'a> {
    column:      &'a Column,
    syntax:      &'static DialectSyntax,
    reference:   String,
    expr:        String,
    predicates:  Vec<String>,
    flag:        Option<CompanionColumn>,
    diagnostics: Diagnostics
}

impl<'a> Pipeline<'a> {
    fn new(column: &'a Column, syntax: &'static DialectSyntax, reference: String) -> Self {
        let custom = column.transformations.custom_expression.trim();
        let expr = if custom.is_empty() {
            reference.clone()
        } else {
            custom.to_string()
        };
        Self {
            column,
            syntax,
            reference,
            expr,
            predicates: Vec::new(),
            flag: None,
            diagnostics: Diagnostics::new()
        }
    }

    fn name(&self) -> &'a str {
        &self.column.name
    }

    /// Thread a fragment through the expression, recording its caveat.
    fn apply(&mut self, fragment: Fragment) {
        let name = self.name();
        match fragment {
            Fragment::Exact(sql) => self.expr = sql,
            Fragment::Approximate {
                sql,
                caveat
            } => {
                self.expr = sql;
                self.diagnostics.push(Diagnostic::unsupported(name, caveat));
            }
            Fragment::Unsupported {
                caveat
            } => {
                self.diagnostics.push(Diagnostic::unsupported(name, caveat));
            }
        }
    }

    fn run(&mut self, plan: &Plan<'_>) {
        let column = self.column;
        let name = self.name();
        let t = &column.transformations;
        let syntax = self.syntax;

        self.check_string_eligibility();

        if t.trim {
            self.expr = builder::trim(&self.expr, syntax);
        }

        match t.case_normalization {
            CaseNormalization::None => {}
            CaseNormalization::Upper => self.expr = builder::upper(&self.expr, syntax),
            CaseNormalization::Lower => self.expr = builder::lower(&self.expr, syntax),
            CaseNormalization::Title => {
                let fragment = builder::title_case(&self.expr, syntax);
                self.apply(fragment);
            }
        }

        if t.strip_special_chars {
            let fragment = builder::strip_special_chars(&self.expr, syntax);
            self.apply(fragment);
        }

        if t.delimiter_split.enabled {
            let fragment = builder::delimiter_split(
                &self.expr,
                &t.delimiter_split.delimiter,
                t.delimiter_split.index,
                syntax
            );
            self.apply(fragment);
        }

        if t.regex.enabled {
            let fragment =
                builder::regex_replace(&self.expr, &t.regex.pattern, &t.regex.replacement, syntax);
            self.apply(fragment);
        }

        if let Some(request) = plan.cast {
            if let CastRequest::Verbatim(type_name) = request {
                self.diagnostics.push(Diagnostic::notice(
                    name,
                    Severity::Info,
                    format!(
                        "type_cast '{}' is not an engine type; emitted verbatim",
                        type_name
                    )
                ));
            }
            let fragment = builder::cast(&self.expr, request, syntax);
            self.apply(fragment);
        }

        self.apply_null_strategy(plan);

        if t.conditional.enabled {
            let else_sql = if t.conditional.else_value.is_empty() {
                self.expr.clone()
            } else {
                quote_literal(&t.conditional.else_value, syntax)
            };
            self.expr = builder::case_when(&t.conditional.cases, &else_sql, syntax);
        }

        if t.where_filter.enabled {
            self.predicates
                .push(t.where_filter.condition.trim().to_string());
        }
    }

    fn apply_null_strategy(&mut self, plan: &Plan<'_>) {
        let column = self.column;
        let name = self.name();
        let t = &column.transformations;
        match t.null_strategy {
            NullStrategy::None => {}
            NullStrategy::Replace => {
                let value_type = match plan.cast {
                    Some(CastRequest::Engine(data_type)) => data_type,
                    _ => column.data_type
                };
                let fallback = match builder::typed_literal(
                    &t.null_replacement,
                    value_type,
                    self.syntax
                ) {
                    Fragment::Exact(sql) => sql,
                    Fragment::Approximate {
                        sql,
                        caveat
                    } => {
                        self.diagnostics.push(Diagnostic::unsupported(name, caveat));
                        sql
                    }
                    Fragment::Unsupported {
                        caveat
                    } => {
                        self.diagnostics.push(Diagnostic::unsupported(name, caveat));
                        quote_literal(&t.null_replacement, self.syntax)
                    }
                };
                self.expr = builder::coalesce(&self.expr, &fallback, self.syntax);
            }
            NullStrategy::Flag => {
                let companion = CompanionColumn {
                    name:       flag_column_name(name),
                    expression: builder::null_flag(&self.expr, self.syntax)
                };
                self.diagnostics.push(Diagnostic::notice(
                    name,
                    Severity::Warning,
                    format!(
                        "null_strategy=flag requires the companion boolean column '{}'; the \
                         value expression is unchanged",
                        companion.name
                    )
                ));
                self.flag = Some(companion);
            }
            NullStrategy::Drop => {
                // A custom expression may not reference the column at all
                let subject = if t.custom_expression.trim().is_empty() {
                    &self.reference
                } else {
                    &self.expr
                };
                self.predicates.push(builder::is_not_null(subject));
            }
        }
    }

    /// String transforms on a raw non-string column are rendered anyway, but
    /// flagged since most engines reject or implicitly convert them.
    fn check_string_eligibility(&mut self) {
        let column = self.column;
        let t = &column.transformations;
        if column.data_type == DataType::String || !t.custom_expression.trim().is_empty() {
            return;
        }
        let mut applied = Vec::new();
        if t.trim {
            applied.push("trim");
        }
        if t.case_normalization != CaseNormalization::None {
            applied.push("case_normalization");
        }
        if t.strip_special_chars {
            applied.push("strip_special_chars");
        }
        if t.delimiter_split.enabled {
            applied.push("delimiter_split");
        }
        if t.regex.enabled {
            applied.push("regex");
        }
        if !applied.is_empty() {
            self.diagnostics.push(Diagnostic::notice(
                &column.name,
                Severity::Warning,
                format!(
                    "{} applied to {} column; value is treated as text",
                    applied.join(", "),
                    column.data_type
                )
            ));
        }
    }

    fn finish(self) -> CompiledColumn {
        let row_filter = if self.predicates.is_empty() {
            None
        } else {
            Some(
                self.predicates
                    .iter()
                    .map(|p| format!("({})", p))
                    .collect::<Vec<_>>()
                    .join(" AND ")
            )
        };
        CompiledColumn {
            name: self.column.name.clone(),
            expression: self.expr,
            row_filter,
            flag: self.flag,
            diagnostics: self.diagnostics
        }
    }
}
