//! Encode command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::{EncodeArgs, FormatArg};
use hemioct::{encode, norm, NORM_EPSILON};
use serde_json::json;

/// Check that a direction can be encoded
pub fn validate_direction(n: [f64; 3]) -> CliResult<()> {
    if n.iter().any(|c| !c.is_finite()) {
        return Err(CliError::invalid_argument("direction components must be finite"));
    }
    if norm(n) < NORM_EPSILON {
        return Err(CliError::invalid_argument("cannot encode a zero-length direction"));
    }
    Ok(())
}

/// Execute the encode command
pub fn execute_encode(config: &CliConfig, args: &EncodeArgs) -> CliResult<()> {
    let n = [args.x, args.y, args.z];
    validate_direction(n)?;

    if args.z < 0.0 {
        ProgressReporter::new(config.use_color(), config.verbosity.is_quiet())
            .warning("z < 0 lies outside the hemisphere; result folds onto its rim");
    }

    let [u, v] = encode(n);
    match args.format {
        FormatArg::Text => println!("{u:.6}, {v:.6}"),
        FormatArg::Json => println!("{}", json!({ "u": u, "v": v })),
    }
    Ok(())
}
