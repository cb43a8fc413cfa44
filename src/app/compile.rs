//! Command execution.
//!
//! `run_compile` drives one table through the pipeline:
//!
//! 1. **Input**: read the definition (file or stdin) and decode it
//! 2. **Compile**: assemble the statement for the effective dialect
//! 3. **Render**: produce the SQL and/or dbt documents
//! 4. **Check** (optional): re-parse the SQL document
//! 5. **Report**: format output and derive the exit code

use tracing::info;

use super::{
    convert::{convert_dialect, convert_target},
    helpers::{
        TableFormat, calculate_exit_code, create_output_options, parse_table, read_table_input
    },
    types::{CommandOutput, CompileParams, CompileResult}
};
use crate::{
    check::check_statement,
    cli::Format,
    compiler::assemble,
    config::Config,
    dialect::{Dialect, describe},
    error::AppResult,
    output::{CompilationReport, format_capabilities, format_report},
    render::{RenderOptions, render_dbt, render_sql}
};

/// Executes the compile command.
///
/// # Errors
///
/// Returns an error if:
/// - The table definition cannot be read or decoded
/// - The configuration names an unknown dialect or target
/// - The dbt schema document cannot be rendered
///
/// # Example
///
/// ```no_run
/// use transform_forge::{
///     app::{CompileParams, run_compile},
///     cli::{Dialect, Format},
///     config::Config
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = CompileParams {
///     table_path:    "customers.json".to_string(),
///     dialect:       Some(Dialect::Postgresql),
///     target:        None,
///     catalog:       None,
///     output_format: Format::Text,
///     check:         true,
///     verbose:       false,
///     no_color:      false
/// };
///
/// let result = run_compile(params, Config::default())?;
/// println!("{}", result.output);
/// # Ok(())
/// # }
/// ```
pub fn run_compile(params: CompileParams, config: Config) -> AppResult<CompileResult> {
    let content = read_table_input(&params.table_path)?;
    let table = parse_table(
        &content,
        TableFormat::from_path(&params.table_path),
        &params.table_path
    )?;

    let dialect = match params.dialect {
        Some(d) => convert_dialect(d),
        None => config.dialect()?.unwrap_or_default()
    };
    let target = match params.target {
        Some(t) => convert_target(t),
        None => config.target()?.unwrap_or_default()
    };
    let render_opts = RenderOptions {
        catalog: params.catalog.or(config.compile.catalog.clone())
    };

    let statement = assemble(&table, dialect);
    let sql = target
        .includes_sql()
        .then(|| render_sql(&statement, &table, &render_opts));
    let dbt = if target.includes_dbt() {
        Some(render_dbt(&statement, &table)?)
    } else {
        None
    };

    // The dbt model embeds Jinja, so only plain SQL is checked
    let check_sql = if params.check {
        Some(
            sql.clone()
                .unwrap_or_else(|| render_sql(&statement, &table, &render_opts))
        )
    } else {
        None
    };

    let mut report = CompilationReport::new(statement, table.layer, target, sql, dbt);
    if let Some(sql) = check_sql
        && let Some(diagnostic) = check_statement(&sql, dialect)
    {
        report.push_diagnostic(diagnostic);
    }

    let exit_code = calculate_exit_code(&report);
    info!(
        table = %report.table,
        dialect = %dialect,
        target = %target,
        exit_code,
        "compile finished"
    );

    let mut output_opts =
        create_output_options(params.output_format, params.no_color, params.verbose);
    output_opts.colored &= config.output.colored;
    let output = format_report(&report, &output_opts);

    Ok(CompileResult {
        exit_code,
        output,
        report
    })
}

/// Executes the dialects command: the capability matrix of every dialect.
pub fn run_dialects(output_format: Format, no_color: bool, config: &Config) -> CommandOutput {
    let rows: Vec<_> = Dialect::ALL
        .into_iter()
        .map(|d| describe(d).capabilities())
        .collect();
    let mut output_opts = create_output_options(output_format, no_color, false);
    output_opts.colored &= config.output.colored;
    CommandOutput {
        exit_code: 0,
        stdout:    vec![format_capabilities(&rows, &output_opts)]
    }
}
