use colored::Colorize;
use serde::Serialize;

use crate::{
    compiler::{CompiledColumn, CompiledStatement, Diagnostic, Severity},
    dialect::{Dialect, DialectCapabilities, IndexBase},
    model::Layer,
    render::{DbtModel, Target}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Diagnostic counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub errors:   usize,
    pub warnings: usize,
    pub info:     usize
}

/// Compilation report: per-column expressions, the rendered documents and
/// every diagnostic of the run.
#[derive(Debug, Clone, Serialize)]
pub struct CompilationReport {
    pub table:        String,
    pub layer:        Layer,
    pub dialect:      Dialect,
    pub target:       Target,
    pub columns:      Vec<CompiledColumn>,
    pub where_clause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql:          Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbt:          Option<DbtModel>,
    pub diagnostics:  Vec<Diagnostic>,
    pub summary:      Summary
}

impl CompilationReport {
    pub fn new(
        statement: CompiledStatement,
        layer: Layer,
        target: Target,
        sql: Option<String>,
        dbt: Option<DbtModel>
    ) -> Self {
        let diagnostics: Vec<Diagnostic> = statement.all_diagnostics().cloned().collect();
        let summary = summarize(&diagnostics);
        Self {
            table: statement.table,
            layer,
            dialect: statement.dialect,
            target,
            columns: statement.projection,
            where_clause: statement.where_clause,
            sql,
            dbt,
            diagnostics,
            summary
        }
    }

    /// Add a statement-level diagnostic produced after assembly.
    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
        self.summary = summarize(&self.diagnostics);
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> Summary {
    let mut summary = Summary::default();
    for d in diagnostics {
        match d.severity {
            Severity::Error => summary.errors += 1,
            Severity::Warning => summary.warnings += 1,
            Severity::Info => summary.info += 1
        }
    }
    summary
}

/// Format a compilation report based on output options
pub fn format_report(report: &CompilationReport, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Text => format_text_report(report, opts)
    }
}

fn header(text: &str, opts: &OutputOptions) -> String {
    if opts.colored {
        format!("{}\n\n", text.bold())
    } else {
        format!("{}\n\n", text)
    }
}

fn format_text_report(report: &CompilationReport, opts: &OutputOptions) -> String {
    let mut output = String::new();

    if opts.verbose {
        output.push_str(&header(
            &format!("=== Columns: {}.{} ===", report.layer, report.table),
            opts
        ));
        for column in &report.columns {
            let name = if opts.colored {
                column.name.cyan().bold().to_string()
            } else {
                column.name.clone()
            };
            output.push_str(&format!("{}: {}\n", name, column.expression));
            if let Some(filter) = &column.row_filter {
                output.push_str(&format!("  filter: {}\n", filter));
            }
            if let Some(flag) = &column.flag {
                output.push_str(&format!("  {}: {}\n", flag.name, flag.expression));
            }
        }
        output.push('\n');
    }

    if let Some(sql) = &report.sql {
        output.push_str(&header(
            &format!("=== Compiled SQL ({}) ===", report.dialect),
            opts
        ));
        output.push_str(sql);
        output.push_str("\n\n");
    }

    if let Some(dbt) = &report.dbt {
        output.push_str(&header(
            &format!("=== dbt model: {}.sql ===", report.table),
            opts
        ));
        output.push_str(&dbt.model_sql);
        output.push_str("\n\n");
        output.push_str(&header("=== dbt schema.yml ===", opts));
        output.push_str(&dbt.schema_yml);
        output.push('\n');
    }

    if !report.diagnostics.is_empty() {
        output.push_str(&header("=== Diagnostics ===", opts));
        for d in &report.diagnostics {
            output.push_str(&format_diagnostic(d, opts));
            output.push('\n');
        }
        output.push('\n');
    }

    let s = &report.summary;
    let summary = format!(
        "Summary: {} errors, {} warnings, {} info",
        s.errors, s.warnings, s.info
    );
    if opts.colored {
        let colored = match report.max_severity() {
            Some(Severity::Error) => summary.red().bold().to_string(),
            Some(Severity::Warning) => summary.yellow().bold().to_string(),
            _ => summary.green().to_string()
        };
        output.push_str(&colored);
    } else {
        output.push_str(&summary);
    }
    output.push('\n');
    output
}

fn format_diagnostic(d: &Diagnostic, opts: &OutputOptions) -> String {
    let label = format!("[{}]", d.severity);
    let label = if opts.colored {
        match d.severity {
            Severity::Error => label.red().bold().to_string(),
            Severity::Warning => label.yellow().bold().to_string(),
            Severity::Info => label.blue().to_string()
        }
    } else {
        label
    };
    if d.column.is_empty() {
        format!("{} {}", label, d.message)
    } else {
        format!("{} {}: {}", label, d.column, d.message)
    }
}

/// Format the dialect capability matrix
pub fn format_capabilities(rows: &[DialectCapabilities], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(rows).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = header("=== Dialect Capabilities ===", opts);
            output.push_str(&format!(
                "{:<15} {:<6} {:<11} {:<12} {:<6} {}\n",
                "DIALECT", "REGEX", "TITLE CASE", "SPLIT", "CAST", "NO CAST TO"
            ));
            for row in rows {
                let split = match row.split_index_base {
                    Some(IndexBase::Zero) => "0-based",
                    Some(IndexBase::One) => "1-based",
                    None => "no"
                };
                let unsupported: Vec<&str> =
                    row.unsupported_casts.iter().map(|t| t.as_str()).collect();
                let line = format!(
                    "{:<15} {:<6} {:<11} {:<12} {:<6} {}",
                    row.dialect.name(),
                    yes_no(row.regex_replace),
                    title_case_mode(row),
                    split,
                    if row.cast_shorthand { "::" } else { "CAST" },
                    if unsupported.is_empty() {
                        "-".to_string()
                    } else {
                        unsupported.join(", ")
                    }
                );
                if opts.colored && !row.regex_replace {
                    output.push_str(&line.yellow().to_string());
                } else {
                    output.push_str(&line);
                }
                output.push('\n');
            }
            output
        }
    }
}

fn title_case_mode(row: &DialectCapabilities) -> &'static str {
    match (row.native_title_case, row.per_word_title_case) {
        (true, _) => "native",
        (false, true) => "per-word",
        (false, false) => "first-char"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
