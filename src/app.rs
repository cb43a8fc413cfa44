//! Application logic for the `tforge` CLI.
//!
//! This module contains the command implementations separated from the main
//! entry point to enable testing.

mod compile;
mod convert;
mod helpers;
mod types;

pub use compile::{run_compile, run_dialects};
pub use convert::{convert_dialect, convert_format, convert_target};
pub use helpers::{
    TableFormat, calculate_exit_code, create_output_options, parse_table, read_table_input
};
pub use types::{CommandOutput, CompileParams, CompileResult};
