//! # Transform Forge
//!
//! Compiles declarative, per-column cleaning transforms into dialect-correct
//! SQL.
//!
//! A table definition lists columns, each carrying a bag of transforms
//! (trim, case normalization, null handling, casts, regex replacement,
//! delimiter split, conditional mapping, row filters, raw expressions). The
//! engine composes the enabled transforms of every column into one SQL value
//! expression for a target dialect and assembles a projection plus a combined
//! WHERE clause. Constructs a dialect cannot express are never fatal: the
//! compiler emits the best SQL it can and reports a column-scoped diagnostic.
//!
//! # Architecture
//!
//! 1. **Dialect descriptors** ([`dialect`]) - One static syntax record per
//!    engine: quoting, function names, cast types, split index base.
//! 2. **Compiler** ([`compiler`]) - Expression builders, the column pipeline
//!    and the statement assembler. Columns compile in parallel using
//!    [`rayon`]; output order always follows declaration order.
//! 3. **Rendering** ([`render`]) - A `cleaned` CTE over the source relation,
//!    or a dbt model with its `schema.yml`.
//!
//! # Quick Start
//!
//! ```bash
//! # Compile for Snowflake
//! tforge compile -t customers.json -d snowflake_sql
//!
//! # dbt model and schema, validated with the SQL parser
//! tforge compile -t customers.yaml -d postgresql --target all --check
//!
//! # Machine-readable report from stdin
//! cat customers.json | tforge compile -t - -f json
//!
//! # What each dialect supports
//! tforge dialects
//! ```
//!
//! # Library Usage
//!
//! ```
//! use transform_forge::{
//!     compiler::assemble,
//!     dialect::Dialect,
//!     model::{CaseNormalization, Column, ColumnTransformations, DataType, Layer, TableSpec}
//! };
//!
//! let email = Column::new("email", DataType::String).with_transformations(ColumnTransformations {
//!     trim: true,
//!     case_normalization: CaseNormalization::Lower,
//!     ..Default::default()
//! });
//! let table = TableSpec::new("customers", Layer::Bronze, vec![email]);
//!
//! let statement = assemble(&table, Dialect::SparkSql);
//! assert_eq!(statement.projection[0].expression, "LOWER(TRIM(`email`))");
//! assert!(statement.where_clause.is_none());
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success, no diagnostics or only informational notices
//! - `1` - Warnings (unsupported or approximated transforms)
//! - `2` - Errors (malformed transform configuration)
//!
//! # Modules
//!
//! - [`model`] - Table, column and transform definitions
//! - [`dialect`] - Dialect descriptors and quoting
//! - [`compiler`] - Expression builder, column compiler, statement assembler
//! - [`render`] - SQL and dbt document rendering
//! - [`check`] - Syntax validation of rendered SQL
//! - [`config`] - Configuration loading
//! - [`output`] - Report formatting
//! - [`error`] - Error types and constructors

pub mod app;
pub mod check;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod model;
pub mod output;
pub mod render;
