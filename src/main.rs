use std::{io, process};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use transform_forge::{
    app::{CompileParams, run_compile, run_dialects},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());
    let config = Config::load()?;

    match cli.command {
        Commands::Compile {
            table,
            dialect,
            target,
            catalog,
            output_format,
            check,
            verbose,
            no_color
        } => {
            let params = CompileParams {
                table_path: table.display().to_string(),
                dialect,
                target,
                catalog,
                output_format,
                check,
                verbose,
                no_color
            };
            let result = run_compile(params, config)?;
            println!("{}", result.output);
            Ok(result.exit_code)
        }
        Commands::Dialects {
            output_format,
            no_color
        } => {
            let output = run_dialects(output_format, no_color, &config);
            for line in &output.stdout {
                println!("{}", line);
            }
            Ok(output.exit_code)
        }
    }
}
