//! hemioct CLI: distortion analysis of the hemi-octahedral normal mapping
//!
//! ## Usage
//!
//! ```bash
//! hemioct analyze                           # 1024² grid, text summary
//! hemioct analyze -r 256 --model singular   # exact singular-value anisotropy
//! hemioct analyze --block-rows 64 --fields fields.json
//! hemioct decode -0.25 0.5                  # one (u, v) pair
//! hemioct quantize --bits 8 --compare       # encoding error at 8 bits
//! ```

use clap::Parser;
use hemioct_cli::{
    handlers::{execute_analyze, execute_config, execute_decode, execute_encode, execute_quantize},
    logging::init_logging,
    Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    init_logging(&config);

    match cli.command {
        Commands::Analyze(args) => execute_analyze(&config, &args),
        Commands::Decode(args) => execute_decode(&args),
        Commands::Encode(args) => execute_encode(&config, &args),
        Commands::Quantize(args) => execute_quantize(&config, &args),
        Commands::Config(args) => execute_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_log_json(cli.log_json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_quiet_wins() {
        let cli = Cli::parse_from(["hemioct", "-q", "-v", "config"]);
        let config = build_config(&cli);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_build_config_color_and_logs() {
        let cli = Cli::parse_from(["hemioct", "--color", "always", "--log-json", "config"]);
        let config = build_config(&cli);
        assert_eq!(config.color, ColorChoice::Always);
        assert!(config.log_json);
    }
}
