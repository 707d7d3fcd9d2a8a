//! Quantize command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::render_quantization;
use crate::{FormatArg, QuantizeArgs};
use hemioct::{quantization_study, NormalEncoding, QuantizationConfig, QuantizationStats};

/// Encodings measured for `args`
#[must_use]
pub fn selected_encodings(args: &QuantizeArgs) -> Vec<NormalEncoding> {
    if args.compare {
        vec![NormalEncoding::HemiOct, NormalEncoding::ProjectedXy]
    } else {
        vec![args.encoding.into()]
    }
}

/// Run the study once per selected encoding
pub fn run_studies(args: &QuantizeArgs) -> CliResult<Vec<QuantizationStats>> {
    let base = QuantizationConfig::new()
        .with_bits(args.bits)
        .with_samples(args.samples);
    let mut results = Vec::new();
    for encoding in selected_encodings(args) {
        results.push(quantization_study(&base.clone().with_encoding(encoding))?);
    }
    Ok(results)
}

/// Execute the quantize command
pub fn execute_quantize(config: &CliConfig, args: &QuantizeArgs) -> CliResult<()> {
    let results = run_studies(args)?;
    match args.format {
        FormatArg::Text => println!("{}", render_quantization(&results, config.use_color())),
        FormatArg::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{CliError, EncodingArg};

    fn args(compare: bool) -> QuantizeArgs {
        QuantizeArgs {
            bits: 8,
            samples: 16,
            encoding: EncodingArg::ProjectedXy,
            compare,
            format: FormatArg::Text,
        }
    }

    #[test]
    fn test_single_encoding() {
        let results = run_studies(&args(false)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].encoding, NormalEncoding::ProjectedXy);
        assert_eq!(results[0].samples, 256);
    }

    #[test]
    fn test_compare_runs_both() {
        let results = run_studies(&args(true)).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].encoding, NormalEncoding::HemiOct);
    }

    #[test]
    fn test_invalid_bits() {
        let mut bad = args(false);
        bad.bits = 17;
        assert!(matches!(run_studies(&bad), Err(CliError::Analysis(_))));
    }
}
