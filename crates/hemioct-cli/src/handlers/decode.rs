//! Decode command handler

use crate::error::CliResult;
use crate::output::render_vector;
use crate::{DecodeArgs, FormatArg};
use hemioct::{decode_checked, Vec3};
use serde_json::json;

/// Decoded direction as a JSON object
#[must_use]
pub fn decode_json(u: f64, v: f64, n: Vec3) -> serde_json::Value {
    json!({ "u": u, "v": v, "x": n[0], "y": n[1], "z": n[2] })
}

/// Execute the decode command
pub fn execute_decode(args: &DecodeArgs) -> CliResult<()> {
    let n = decode_checked(args.u, args.v)?;
    match args.format {
        FormatArg::Text => println!("{}", render_vector(n)),
        FormatArg::Json => println!("{}", decode_json(args.u, args.v, n)),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_decode_json_fields() {
        let value = decode_json(0.0, 0.0, [0.0, 0.0, 1.0]);
        assert_eq!(value["z"], 1.0);
        assert_eq!(value["u"], 0.0);
    }

    #[test]
    fn test_out_of_domain_is_error() {
        let args = DecodeArgs {
            u: 1.0,
            v: 0.0,
            format: FormatArg::Text,
        };
        assert!(matches!(execute_decode(&args), Err(CliError::Analysis(_))));
    }
}
