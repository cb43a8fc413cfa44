//! Type conversion functions for CLI to internal types.
//!
//! CLI-facing enums carry `clap` value names; the engine has its own types
//! so the library does not depend on the argument parser.

use crate::{
    cli::{Dialect, Format, Target},
    dialect,
    output::OutputFormat,
    render
};

/// Converts a CLI dialect enum to the engine dialect.
///
/// # Example
///
/// ```
/// use transform_forge::{app::convert_dialect, cli, dialect::Dialect};
///
/// assert_eq!(convert_dialect(cli::Dialect::Tsql), Dialect::Tsql);
/// ```
pub fn convert_dialect(dialect: Dialect) -> dialect::Dialect {
    match dialect {
        Dialect::SnowflakeSql => dialect::Dialect::SnowflakeSql,
        Dialect::SparkSql => dialect::Dialect::SparkSql,
        Dialect::BigquerySql => dialect::Dialect::BigquerySql,
        Dialect::Tsql => dialect::Dialect::Tsql,
        Dialect::Mysql => dialect::Dialect::Mysql,
        Dialect::Postgresql => dialect::Dialect::Postgresql,
        Dialect::Ansi => dialect::Dialect::Ansi
    }
}

/// Converts a CLI target enum to the render target.
pub fn convert_target(target: Target) -> render::Target {
    match target {
        Target::Sql => render::Target::Sql,
        Target::Dbt => render::Target::Dbt,
        Target::All => render::Target::All
    }
}

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use transform_forge::{app::convert_format, cli::Format, output::OutputFormat};
///
/// let format = convert_format(Format::Json);
/// assert!(matches!(format, OutputFormat::Json));
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}
