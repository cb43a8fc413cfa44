//! Declarative table and column definitions consumed by the compiler.
//!
//! Every transform is a fixed, independently togglable sub-record of
//! [`ColumnTransformations`]. All fields carry serde defaults, so a partial
//! JSON/YAML/TOML document deserializes into a column with every omitted
//! transform disabled.
//!
//! # Example
//!
//! ```
//! use transform_forge::model::{CaseNormalization, Column, ColumnTransformations, DataType};
//!
//! let column = Column::new("email", DataType::String).with_transformations(
//!     ColumnTransformations {
//!         trim: true,
//!         case_normalization: CaseNormalization::Lower,
//!         ..Default::default()
//!     }
//! );
//! assert!(column.transformations.trim);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Timestamp,
    Json
}

impl DataType {
    pub const ALL: [DataType; 7] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Date,
        Self::Timestamp,
        Self::Json
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Json => "json"
        }
    }

    /// Resolve a `type_cast` name, accepting a few common spellings.
    pub fn from_cast_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" | "text" | "str" => Some(Self::String),
            "integer" | "int" | "bigint" => Some(Self::Integer),
            "float" | "double" | "real" => Some(Self::Float),
            "boolean" | "bool" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "timestamp" | "datetime" => Some(Self::Timestamp),
            "json" => Some(Self::Json),
            _ => None
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case conversion applied after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseNormalization {
    #[default]
    None,
    Upper,
    Lower,
    Title
}

/// How NULL values of a column are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullStrategy {
    #[default]
    None,
    /// Filter out rows where the column is NULL
    Drop,
    /// Substitute `null_replacement`
    Replace,
    /// Emit a companion boolean column
    Flag
}

/// Pipeline position of a table. Carried through to rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Bronze,
    Silver,
    Gold
}

impl Layer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold"
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexTransform {
    pub enabled:     bool,
    pub pattern:     String,
    pub replacement: String
}

/// Row predicate contributed to the table-level WHERE clause.
///
/// `condition` is opaque SQL and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhereFilter {
    pub enabled:   bool,
    pub condition: String
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalCase {
    pub when: String,
    pub then: String
}

/// Ordered CASE mapping; first matching `when` wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalTransform {
    pub enabled:    bool,
    pub cases:      Vec<ConditionalCase>,
    /// Empty means "keep the current value"
    pub else_value: String
}

/// Pick one part of a delimited string. `index` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterSplit {
    pub enabled:   bool,
    pub delimiter: String,
    pub index:     usize
}

impl Default for DelimiterSplit {
    fn default() -> Self {
        Self {
            enabled:   false,
            delimiter: String::from(","),
            index:     0
        }
    }
}

/// The full bag of transforms attachable to one column.
///
/// Field order here has no effect on output; the compiler applies transforms
/// in a fixed pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnTransformations {
    pub trim:                bool,
    pub case_normalization:  CaseNormalization,
    pub null_strategy:       NullStrategy,
    pub null_replacement:    String,
    pub type_cast:           String,
    pub strip_special_chars: bool,
    pub regex:               RegexTransform,
    pub where_filter:        WhereFilter,
    pub conditional:         ConditionalTransform,
    pub delimiter_split:     DelimiterSplit,
    pub custom_expression:   String
}

/// A table column. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name:            String,
    #[serde(default)]
    pub data_type:       DataType,
    #[serde(default = "default_nullable")]
    pub nullable:        bool,
    #[serde(default)]
    pub transformations: ColumnTransformations,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes:           String
}

fn default_nullable() -> bool {
    true
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            transformations: ColumnTransformations::default(),
            notes: String::new()
        }
    }

    pub fn with_transformations(mut self, transformations: ColumnTransformations) -> Self {
        self.transformations = transformations;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Ordered column list of one table. Column order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name:    String,
    #[serde(default)]
    pub layer:   Layer,
    pub columns: Vec<Column>,
    /// Per-column documentation; overrides `Column::notes` when present
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub notes:   IndexMap<String, String>
}

impl TableSpec {
    pub fn new(name: impl Into<String>, layer: Layer, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            layer,
            columns,
            notes: IndexMap::new()
        }
    }

    /// Documentation for a column, preferring the table-level notes map.
    pub fn note_for<'a>(&'a self, column: &'a Column) -> Option<&'a str> {
        self.notes
            .get(&column.name)
            .map(String::as_str)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(column.notes.as_str()).filter(|n| !n.is_empty()))
    }
}
