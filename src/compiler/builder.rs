//! Per-transform SQL fragment rendering.
//!
//! Every function takes the current input expression and returns a new
//! expression wrapping it. Functions that can fail to render faithfully in a
//! dialect return a [`Fragment`] so the caller decides how to record the
//! caveat; an unsupported fragment never alters the input.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    dialect::{
        CastStyle, CastTarget, ConcatSyntax, DialectSyntax, RegexReplace, SplitSyntax,
        SubstringSyntax, TitleCase, TrimSyntax, WordRows, quote_literal
    },
    model::{ConditionalCase, DataType}
};

/// Pattern removed by `strip_special_chars`.
pub const SPECIAL_CHARS_PATTERN: &str = "[^a-zA-Z0-9]";

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid regex")
});

/// Outcome of rendering one transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Exact(String),
    /// Valid SQL whose semantics differ from the declared transform
    Approximate { sql: String, caveat: String },
    /// Transform skipped; input expression is kept as is
    Unsupported { caveat: String }
}

/// Cast target resolved from `type_cast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastRequest<'a> {
    Engine(DataType),
    /// Dialect type name emitted as written, e.g. `DECIMAL(10,2)`
    Verbatim(&'a str)
}

pub fn trim(input: &str, syntax: &DialectSyntax) -> String {
    match syntax.trim {
        TrimSyntax::Function(name) => format!("{}({})", name, input),
        TrimSyntax::Nested {
            outer,
            inner
        } => format!("{}({}({}))", outer, inner, input)
    }
}

pub fn upper(input: &str, syntax: &DialectSyntax) -> String {
    format!("{}({})", syntax.upper, input)
}

pub fn lower(input: &str, syntax: &DialectSyntax) -> String {
    format!("{}({})", syntax.lower, input)
}

/// Title case: the native function, a per-word rewrite over word rows, or
/// as a last resort the first character of the whole value.
///
/// Both emulations carry a caveat since neither matches `INITCAP` exactly.
/// The per-word forms split on single spaces only and keep empty words, so
/// runs of spaces survive. A NULL input stays NULL. The mysql form aggregates
/// with `GROUP_CONCAT`, which is bounded by `group_concat_max_len`.
pub fn title_case(input: &str, syntax: &DialectSyntax) -> Fragment {
    let space = quote_literal(" ", syntax);
    let per_word_caveat = || {
        format!(
            "title case has no native function in {}; emulated per space-separated word",
            syntax.dialect
        )
    };
    match syntax.title_case {
        TitleCase::Native(name) => Fragment::Exact(format!("{}({})", name, input)),
        TitleCase::PerWord(WordRows::StringSplit) => Fragment::Approximate {
            sql:    format!(
                "(SELECT STRING_AGG({}, {}) WITHIN GROUP (ORDER BY w.ordinal) \
                 FROM STRING_SPLIT({}, {}, 1) AS w)",
                capitalize("w.value", syntax),
                space,
                input,
                space
            ),
            caveat: per_word_caveat()
        },
        TitleCase::PerWord(WordRows::JsonTable) => Fragment::Approximate {
            sql:    format!(
                "(SELECT GROUP_CONCAT({} ORDER BY w.pos SEPARATOR {}) \
                 FROM JSON_TABLE(REPLACE(JSON_ARRAY({}), {}, {}), '$[*]' \
                 COLUMNS (pos FOR ORDINALITY, word TEXT PATH '$')) AS w)",
                capitalize("w.word", syntax),
                space,
                input,
                space,
                quote_literal("\",\"", syntax)
            ),
            caveat: per_word_caveat()
        },
        TitleCase::FirstCharacter => Fragment::Approximate {
            sql:    capitalize(input, syntax),
            caveat: format!(
                "title case has no native or per-word form in {}; emulated by capitalizing \
                 only the first character",
                syntax.dialect
            )
        }
    }
}

/// Upper-case the first character of `input` and lower-case the rest.
fn capitalize(input: &str, syntax: &DialectSyntax) -> String {
    let (first, rest) = match syntax.substring {
        SubstringSyntax::Standard => (
            format!("SUBSTRING({} FROM 1 FOR 1)", input),
            format!("SUBSTRING({} FROM 2)", input)
        ),
        SubstringSyntax::Positional => (
            format!("SUBSTRING({}, 1, 1)", input),
            format!("SUBSTRING({}, 2)", input)
        ),
        SubstringSyntax::PositionalWithLength(len) => (
            format!("SUBSTRING({}, 1, 1)", input),
            format!("SUBSTRING({}, 2, {}({}))", input, len, input)
        )
    };
    concat(&upper(&first, syntax), &lower(&rest, syntax), syntax)
}

fn concat(left: &str, right: &str, syntax: &DialectSyntax) -> String {
    match syntax.concat {
        ConcatSyntax::Operator(op) => format!("({} {} {})", left, op, right),
        ConcatSyntax::Function(name) => format!("{}({}, {})", name, left, right)
    }
}

pub fn regex_replace(
    input: &str,
    pattern: &str,
    replacement: &str,
    syntax: &DialectSyntax
) -> Fragment {
    match syntax.regex_replace {
        RegexReplace::Unsupported => Fragment::Unsupported {
            caveat: format!(
                "regex unsupported in {}; expression left unchanged",
                syntax.dialect
            )
        },
        RegexReplace::Function {
            name,
            trailing_args
        } => Fragment::Exact(format!(
            "{}({}, {}, {}{})",
            name,
            input,
            quote_literal(pattern, syntax),
            quote_literal(replacement, syntax),
            trailing_args
        ))
    }
}

pub fn strip_special_chars(input: &str, syntax: &DialectSyntax) -> Fragment {
    match regex_replace(input, SPECIAL_CHARS_PATTERN, "", syntax) {
        Fragment::Unsupported {
            ..
        } => Fragment::Unsupported {
            caveat: format!(
                "strip_special_chars needs regex, which is unsupported in {}; skipped",
                syntax.dialect
            )
        },
        other => other
    }
}

/// Pick the part at 0-based `index` after splitting on `delimiter`.
pub fn delimiter_split(
    input: &str,
    delimiter: &str,
    index: usize,
    syntax: &DialectSyntax
) -> Fragment {
    let Some(n) = syntax
        .split
        .index_base()
        .map_or(Some(index), |base| base.native_index(index))
    else {
        return Fragment::Unsupported {
            caveat: format!(
                "split index {} cannot be expressed in {}; expression left unchanged",
                index, syntax.dialect
            )
        };
    };
    let delim = quote_literal(delimiter, syntax);
    let sql = match syntax.split {
        SplitSyntax::Unsupported => {
            return Fragment::Unsupported {
                caveat: format!(
                    "delimiter split unsupported in {}; expression left unchanged",
                    syntax.dialect
                )
            };
        }
        SplitSyntax::SplitPart(name) => format!("{}({}, {}, {})", name, input, delim, n),
        SplitSyntax::RegexArraySubscript(name) => format!(
            "{}({}, {})[{}]",
            name,
            input,
            quote_literal(&regex::escape(delimiter), syntax),
            n
        ),
        SplitSyntax::ArraySafeOffset(name) => {
            format!("{}({}, {})[SAFE_OFFSET({})]", name, input, delim, n)
        }
        SplitSyntax::SubstringIndex => format!(
            "SUBSTRING_INDEX(SUBSTRING_INDEX({}, {}, {}), {}, -1)",
            input, delim, n, delim
        )
    };
    Fragment::Exact(sql)
}

pub fn cast(input: &str, request: CastRequest<'_>, syntax: &DialectSyntax) -> Fragment {
    let type_name = match request {
        CastRequest::Verbatim(name) => name.trim(),
        CastRequest::Engine(data_type) => match syntax.cast_types.get(data_type) {
            CastTarget::Type(name) => name,
            CastTarget::Function(name) => {
                return Fragment::Exact(format!("{}({})", name, input));
            }
            CastTarget::Unsupported => {
                return Fragment::Unsupported {
                    caveat: format!(
                        "cast to {} unsupported in {}; value left uncast",
                        data_type, syntax.dialect
                    )
                };
            }
        }
    };
    Fragment::Exact(match syntax.cast {
        CastStyle::Function => format!("CAST({} AS {})", input, type_name),
        CastStyle::DoubleColon => format!("({})::{}", input, type_name)
    })
}

pub fn coalesce(input: &str, fallback: &str, syntax: &DialectSyntax) -> String {
    format!("{}({}, {})", syntax.coalesce, input, fallback)
}

/// Render a NULL replacement value typed for `data_type`.
///
/// Numbers and booleans are emitted bare, dates and timestamps as a cast
/// string literal, everything else as an escaped string literal.
pub fn typed_literal(value: &str, data_type: DataType, syntax: &DialectSyntax) -> Fragment {
    let as_string = || quote_literal(value, syntax);
    if data_type.is_numeric() {
        let trimmed = value.trim();
        return if NUMERIC_LITERAL.is_match(trimmed) {
            Fragment::Exact(trimmed.to_string())
        } else {
            Fragment::Approximate {
                sql:    as_string(),
                caveat: format!(
                    "null_replacement '{}' is not numeric; emitted as a string literal",
                    value
                )
            }
        };
    }
    if data_type.is_temporal() {
        return match cast(&as_string(), CastRequest::Engine(data_type), syntax) {
            Fragment::Exact(sql) => Fragment::Exact(sql),
            _ => Fragment::Exact(as_string())
        };
    }
    match data_type {
        DataType::Boolean => match value.trim().to_ascii_lowercase().as_str() {
            "true" => Fragment::Exact(boolean(true, syntax).to_string()),
            "false" => Fragment::Exact(boolean(false, syntax).to_string()),
            _ => Fragment::Approximate {
                sql:    as_string(),
                caveat: format!(
                    "null_replacement '{}' is not a boolean; emitted as a string literal",
                    value
                )
            }
        },
        _ => Fragment::Exact(as_string())
    }
}

fn boolean(value: bool, syntax: &DialectSyntax) -> &'static str {
    match (value, syntax.boolean_values) {
        (true, true) => "TRUE",
        (false, true) => "FALSE",
        (true, false) => "1",
        (false, false) => "0"
    }
}

/// Boolean value that is true when `input` is NULL.
pub fn null_flag(input: &str, syntax: &DialectSyntax) -> String {
    if syntax.boolean_values {
        format!("({} IS NULL)", input)
    } else {
        format!("CASE WHEN {} IS NULL THEN 1 ELSE 0 END", input)
    }
}

pub fn is_not_null(input: &str) -> String {
    format!("{} IS NOT NULL", input)
}

/// `CASE WHEN .. THEN .. ELSE .. END` with `then` values as literals.
///
/// `when` predicates are embedded verbatim and keep their declared order.
pub fn case_when(cases: &[ConditionalCase], else_sql: &str, syntax: &DialectSyntax) -> String {
    let mut sql = String::from("CASE");
    for case in cases {
        sql.push_str(" WHEN ");
        sql.push_str(case.when.trim());
        sql.push_str(" THEN ");
        sql.push_str(&quote_literal(&case.then, syntax));
    }
    sql.push_str(" ELSE ");
    sql.push_str(else_sql);
    sql.push_str(" END");
    sql
}
