use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Transform Forge - Compile declarative column cleaning transforms to SQL
#[derive(Parser, Debug)]
#[command(name = "tforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a table definition into dialect-specific SQL
    Compile {
        /// Path to table definition (JSON, YAML or TOML; use - for JSON on stdin)
        #[arg(short, long)]
        table: PathBuf,

        /// Target SQL dialect (defaults to config, then ansi)
        #[arg(short, long, value_enum)]
        dialect: Option<Dialect>,

        /// Output document kind (defaults to config, then sql)
        #[arg(long, value_enum)]
        target: Option<Target>,

        /// Catalog prefix for the source relation
        #[arg(short, long)]
        catalog: Option<String>,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
        output_format: Format,

        /// Re-parse rendered SQL and report syntax problems as warnings
        #[arg(long)]
        check: bool,

        /// Show per-column expressions and debug logging
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// List supported dialects and their capabilities
    Dialects {
        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
        output_format: Format,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

impl Commands {
    pub fn verbose(&self) -> bool {
        matches!(
            self,
            Self::Compile {
                verbose: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Dialect {
    #[value(name = "snowflake_sql", alias = "snowflake")]
    SnowflakeSql,
    #[value(name = "spark_sql", alias = "spark")]
    SparkSql,
    #[value(name = "bigquery_sql", alias = "bigquery")]
    BigquerySql,
    Tsql,
    Mysql,
    Postgresql,
    Ansi
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Target {
    Sql,
    Dbt,
    All
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
