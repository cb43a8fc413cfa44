//! SQL dialect descriptors.
//!
//! Each supported dialect maps to one static [`DialectSyntax`] record holding
//! the syntax fragments the expression builder needs: quoting rules, string
//! function names, regex support, cast style and split semantics. There is no
//! per-dialect type hierarchy; builders are free functions parameterized by
//! the descriptor.
//!
//! # Capability Matrix
//!
//! | Dialect | Regex replace | Title case | Split (index base) |
//! |---------|---------------|------------|--------------------|
//! | `snowflake_sql` | yes | `INITCAP` | `SPLIT_PART` (1) |
//! | `spark_sql` | yes | `INITCAP` | `SPLIT(..)[n]` (0) |
//! | `bigquery_sql` | yes | `INITCAP` | `SPLIT(..)[SAFE_OFFSET(n)]` (0) |
//! | `tsql` | no | per word, `STRING_SPLIT` | no |
//! | `mysql` | yes | per word, `JSON_TABLE` | `SUBSTRING_INDEX` (1) |
//! | `postgresql` | yes | `INITCAP` | `SPLIT_PART` (1) |
//! | `ansi` | no | first character only | no |

mod literal;

use std::{fmt, str::FromStr};

pub use literal::{quote_identifier, quote_literal};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, unknown_dialect_error},
    model::DataType
};

/// Target SQL dialect of a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    SnowflakeSql,
    SparkSql,
    BigquerySql,
    Tsql,
    Mysql,
    Postgresql,
    #[default]
    Ansi
}

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Self::SnowflakeSql,
        Self::SparkSql,
        Self::BigquerySql,
        Self::Tsql,
        Self::Mysql,
        Self::Postgresql,
        Self::Ansi
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SnowflakeSql => "snowflake_sql",
            Self::SparkSql => "spark_sql",
            Self::BigquerySql => "bigquery_sql",
            Self::Tsql => "tsql",
            Self::Mysql => "mysql",
            Self::Postgresql => "postgresql",
            Self::Ansi => "ansi"
        }
    }

    pub fn syntax(&self) -> &'static DialectSyntax {
        describe(*self)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown_dialect_error(s))
    }
}

/// Identifier quoting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierQuote {
    /// `"name"`, embedded `"` doubled
    DoubleQuote,
    /// `` `name` ``, embedded `` ` `` doubled
    Backtick,
    /// `[name]`, embedded `]` doubled
    Bracket
}

/// Escaping rule inside single-quoted string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralEscape {
    /// Standard SQL: `'` becomes `''`, backslash is literal
    Doubled,
    /// Backslash is an escape character; `'` becomes `''`
    DoubledWithBackslash,
    /// Backslash is an escape character; `'` becomes `\'`
    Backslash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimSyntax {
    Function(&'static str),
    /// No single both-sides trim; nest `outer(inner(x))`
    Nested {
        outer: &'static str,
        inner: &'static str
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCase {
    Native(&'static str),
    /// Value split into ordered words, each capitalized, re-joined with spaces
    PerWord(WordRows),
    /// Only the first character of the whole value is capitalized
    FirstCharacter
}

/// Table-valued primitive that turns a string into ordered word rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRows {
    /// `STRING_SPLIT(x, ' ', 1)` with its `ordinal` column
    StringSplit,
    /// `JSON_TABLE` over the value rewritten as a JSON array of words
    JsonTable
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexReplace {
    Unsupported,
    Function {
        name:          &'static str,
        /// Extra trailing arguments, e.g. global flag
        trailing_args: &'static str
    }
}

impl RegexReplace {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStyle {
    /// `CAST(expr AS type)`
    Function,
    /// `(expr)::type`
    DoubleColon
}

/// How an engine type is expressed as a cast target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    Type(&'static str),
    /// Converted by calling a function instead of a cast
    Function(&'static str),
    Unsupported
}

/// Cast target for each engine [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastTypes {
    pub string:    CastTarget,
    pub integer:   CastTarget,
    pub float:     CastTarget,
    pub boolean:   CastTarget,
    pub date:      CastTarget,
    pub timestamp: CastTarget,
    pub json:      CastTarget
}

impl CastTypes {
    pub fn get(&self, data_type: DataType) -> CastTarget {
        match data_type {
            DataType::String => self.string,
            DataType::Integer => self.integer,
            DataType::Float => self.float,
            DataType::Boolean => self.boolean,
            DataType::Date => self.date,
            DataType::Timestamp => self.timestamp,
            DataType::Json => self.json
        }
    }
}

/// Index base of a dialect's native split primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    Zero,
    One
}

impl IndexBase {
    /// Convert an engine (0-based) index to this base, `None` when the
    /// shifted index does not fit.
    pub fn native_index(&self, index: usize) -> Option<usize> {
        match self {
            Self::Zero => Some(index),
            Self::One => index.checked_add(1)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSyntax {
    /// `SPLIT_PART(expr, delim, n)`
    SplitPart(&'static str),
    /// `SPLIT(expr, delim_regex)[n]`, delimiter is a regular expression
    RegexArraySubscript(&'static str),
    /// `SPLIT(expr, delim)[SAFE_OFFSET(n)]`
    ArraySafeOffset(&'static str),
    /// `SUBSTRING_INDEX(SUBSTRING_INDEX(expr, delim, n), delim, -1)`
    SubstringIndex,
    Unsupported
}

impl SplitSyntax {
    pub fn index_base(&self) -> Option<IndexBase> {
        match self {
            Self::SplitPart(_) | Self::SubstringIndex => Some(IndexBase::One),
            Self::RegexArraySubscript(_) | Self::ArraySafeOffset(_) => Some(IndexBase::Zero),
            Self::Unsupported => None
        }
    }
}

/// Substring primitive used for title-case emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstringSyntax {
    /// `SUBSTRING(x FROM s FOR n)`
    Standard,
    /// `SUBSTRING(x, s, n)` with optional length
    Positional,
    /// `SUBSTRING(x, s, n)` where the length is mandatory; rest uses `len(x)`
    PositionalWithLength(&'static str)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatSyntax {
    Operator(&'static str),
    Function(&'static str)
}

/// Static syntax description of one dialect.
#[derive(Debug)]
pub struct DialectSyntax {
    pub dialect:          Dialect,
    pub identifier_quote: IdentifierQuote,
    pub literal_escape:   LiteralEscape,
    pub trim:             TrimSyntax,
    pub upper:            &'static str,
    pub lower:            &'static str,
    pub title_case:       TitleCase,
    pub regex_replace:    RegexReplace,
    pub cast:             CastStyle,
    pub cast_types:       CastTypes,
    pub split:            SplitSyntax,
    pub substring:        SubstringSyntax,
    pub concat:           ConcatSyntax,
    pub coalesce:         &'static str,
    /// Whether a predicate can be projected as a boolean value
    pub boolean_values:   bool
}

static SNOWFLAKE: DialectSyntax = DialectSyntax {
    dialect:          Dialect::SnowflakeSql,
    identifier_quote: IdentifierQuote::DoubleQuote,
    literal_escape:   LiteralEscape::DoubledWithBackslash,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::Native("INITCAP"),
    regex_replace:    RegexReplace::Function {
        name:          "REGEXP_REPLACE",
        trailing_args: ""
    },
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("VARCHAR"),
        integer:   CastTarget::Type("INTEGER"),
        float:     CastTarget::Type("FLOAT"),
        boolean:   CastTarget::Type("BOOLEAN"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("TIMESTAMP_NTZ"),
        json:      CastTarget::Function("PARSE_JSON")
    },
    split:            SplitSyntax::SplitPart("SPLIT_PART"),
    substring:        SubstringSyntax::Positional,
    concat:           ConcatSyntax::Operator("||"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

static SPARK: DialectSyntax = DialectSyntax {
    dialect:          Dialect::SparkSql,
    identifier_quote: IdentifierQuote::Backtick,
    literal_escape:   LiteralEscape::Backslash,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::Native("INITCAP"),
    regex_replace:    RegexReplace::Function {
        name:          "REGEXP_REPLACE",
        trailing_args: ""
    },
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("STRING"),
        integer:   CastTarget::Type("BIGINT"),
        float:     CastTarget::Type("DOUBLE"),
        boolean:   CastTarget::Type("BOOLEAN"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("TIMESTAMP"),
        json:      CastTarget::Unsupported
    },
    split:            SplitSyntax::RegexArraySubscript("SPLIT"),
    substring:        SubstringSyntax::Positional,
    concat:           ConcatSyntax::Function("CONCAT"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

static BIGQUERY: DialectSyntax = DialectSyntax {
    dialect:          Dialect::BigquerySql,
    identifier_quote: IdentifierQuote::Backtick,
    literal_escape:   LiteralEscape::Backslash,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::Native("INITCAP"),
    regex_replace:    RegexReplace::Function {
        name:          "REGEXP_REPLACE",
        trailing_args: ""
    },
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("STRING"),
        integer:   CastTarget::Type("INT64"),
        float:     CastTarget::Type("FLOAT64"),
        boolean:   CastTarget::Type("BOOL"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("TIMESTAMP"),
        json:      CastTarget::Function("PARSE_JSON")
    },
    split:            SplitSyntax::ArraySafeOffset("SPLIT"),
    substring:        SubstringSyntax::Positional,
    concat:           ConcatSyntax::Operator("||"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

static TSQL: DialectSyntax = DialectSyntax {
    dialect:          Dialect::Tsql,
    identifier_quote: IdentifierQuote::Bracket,
    literal_escape:   LiteralEscape::Doubled,
    trim:             TrimSyntax::Nested {
        outer: "LTRIM",
        inner: "RTRIM"
    },
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::PerWord(WordRows::StringSplit),
    regex_replace:    RegexReplace::Unsupported,
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("NVARCHAR(MAX)"),
        integer:   CastTarget::Type("BIGINT"),
        float:     CastTarget::Type("FLOAT"),
        boolean:   CastTarget::Type("BIT"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("DATETIME2"),
        json:      CastTarget::Unsupported
    },
    split:            SplitSyntax::Unsupported,
    substring:        SubstringSyntax::PositionalWithLength("LEN"),
    concat:           ConcatSyntax::Operator("+"),
    coalesce:         "COALESCE",
    boolean_values:   false
};

static MYSQL: DialectSyntax = DialectSyntax {
    dialect:          Dialect::Mysql,
    identifier_quote: IdentifierQuote::Backtick,
    literal_escape:   LiteralEscape::DoubledWithBackslash,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::PerWord(WordRows::JsonTable),
    regex_replace:    RegexReplace::Function {
        name:          "REGEXP_REPLACE",
        trailing_args: ""
    },
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("CHAR"),
        integer:   CastTarget::Type("SIGNED"),
        float:     CastTarget::Type("DOUBLE"),
        boolean:   CastTarget::Unsupported,
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("DATETIME"),
        json:      CastTarget::Type("JSON")
    },
    split:            SplitSyntax::SubstringIndex,
    substring:        SubstringSyntax::Positional,
    concat:           ConcatSyntax::Function("CONCAT"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

static POSTGRESQL: DialectSyntax = DialectSyntax {
    dialect:          Dialect::Postgresql,
    identifier_quote: IdentifierQuote::DoubleQuote,
    literal_escape:   LiteralEscape::Doubled,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::Native("INITCAP"),
    regex_replace:    RegexReplace::Function {
        name:          "REGEXP_REPLACE",
        trailing_args: ", 'g'"
    },
    cast:             CastStyle::DoubleColon,
    cast_types:       CastTypes {
        string:    CastTarget::Type("TEXT"),
        integer:   CastTarget::Type("BIGINT"),
        float:     CastTarget::Type("DOUBLE PRECISION"),
        boolean:   CastTarget::Type("BOOLEAN"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("TIMESTAMP"),
        json:      CastTarget::Type("JSONB")
    },
    split:            SplitSyntax::SplitPart("SPLIT_PART"),
    substring:        SubstringSyntax::Positional,
    concat:           ConcatSyntax::Operator("||"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

static ANSI: DialectSyntax = DialectSyntax {
    dialect:          Dialect::Ansi,
    identifier_quote: IdentifierQuote::DoubleQuote,
    literal_escape:   LiteralEscape::Doubled,
    trim:             TrimSyntax::Function("TRIM"),
    upper:            "UPPER",
    lower:            "LOWER",
    title_case:       TitleCase::FirstCharacter,
    regex_replace:    RegexReplace::Unsupported,
    cast:             CastStyle::Function,
    cast_types:       CastTypes {
        string:    CastTarget::Type("VARCHAR"),
        integer:   CastTarget::Type("INTEGER"),
        float:     CastTarget::Type("FLOAT"),
        boolean:   CastTarget::Type("BOOLEAN"),
        date:      CastTarget::Type("DATE"),
        timestamp: CastTarget::Type("TIMESTAMP"),
        json:      CastTarget::Unsupported
    },
    split:            SplitSyntax::Unsupported,
    substring:        SubstringSyntax::Standard,
    concat:           ConcatSyntax::Operator("||"),
    coalesce:         "COALESCE",
    boolean_values:   true
};

/// Look up the syntax descriptor of a dialect.
pub fn describe(dialect: Dialect) -> &'static DialectSyntax {
    match dialect {
        Dialect::SnowflakeSql => &SNOWFLAKE,
        Dialect::SparkSql => &SPARK,
        Dialect::BigquerySql => &BIGQUERY,
        Dialect::Tsql => &TSQL,
        Dialect::Mysql => &MYSQL,
        Dialect::Postgresql => &POSTGRESQL,
        Dialect::Ansi => &ANSI
    }
}

/// One row of the capability matrix, as printed by `tforge dialects`.
#[derive(Debug, Clone, Serialize)]
pub struct DialectCapabilities {
    pub dialect:             Dialect,
    pub regex_replace:       bool,
    pub native_title_case:   bool,
    /// Every word is capitalized, natively or through word rows
    pub per_word_title_case: bool,
    pub split:               bool,
    pub split_index_base:    Option<IndexBase>,
    pub cast_shorthand:      bool,
    pub unsupported_casts:   Vec<DataType>
}

impl DialectSyntax {
    pub fn capabilities(&self) -> DialectCapabilities {
        DialectCapabilities {
            dialect:             self.dialect,
            regex_replace:       self.regex_replace.is_supported(),
            native_title_case:   matches!(self.title_case, TitleCase::Native(_)),
            per_word_title_case: self.title_case != TitleCase::FirstCharacter,
            split:               self.split.index_base().is_some(),
            split_index_base:    self.split.index_base(),
            cast_shorthand:      self.cast == CastStyle::DoubleColon,
            unsupported_casts:   DataType::ALL
                .into_iter()
                .filter(|t| self.cast_types.get(*t) == CastTarget::Unsupported)
                .collect()
        }
    }
}
