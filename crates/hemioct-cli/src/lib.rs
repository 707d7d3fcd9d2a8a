//! hemioct CLI library
//!
//! Command definitions, handlers and terminal output for the `hemioct`
//! binary. The analysis itself lives in the `hemioct` crate.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    AnalyzeArgs, Cli, ColorArg, Commands, ConfigArgs, ConfigFormat, DecodeArgs, EncodeArgs,
    EncodingArg, FormatArg, ModelArg, QuantizeArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_quantization, render_summary, render_vector, ProgressReporter};
