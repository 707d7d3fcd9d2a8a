//! Analyze command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_summary, ProgressReporter};
use crate::{AnalyzeArgs, FormatArg};
use hemioct::{AnalysisConfig, DistortionField, DistortionReport};
use std::path::Path;
use tracing::debug;

/// Load an analysis configuration, choosing the parser by file extension
pub fn load_analysis_config(path: &Path) -> CliResult<AnalysisConfig> {
    let text = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => AnalysisConfig::from_json(&text)?,
        Some("yaml" | "yml") => AnalysisConfig::from_yaml(&text)?,
        _ => {
            return Err(CliError::config(format!(
                "{}: expected a .json, .yaml or .yml file",
                path.display()
            )))
        }
    };
    Ok(config)
}

/// Layer command-line flags over a base configuration
#[must_use]
pub fn apply_overrides(mut config: AnalysisConfig, args: &AnalyzeArgs) -> AnalysisConfig {
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(epsilon) = args.epsilon {
        config.inset_epsilon = epsilon;
    }
    if let Some(threshold) = args.threshold {
        config.anisotropy_threshold = threshold;
    }
    if let Some(model) = args.model {
        config.anisotropy_model = model.into();
    }
    if args.block_rows.is_some() {
        config.block_rows = args.block_rows;
    }
    config
}

/// Resolve the configuration for `args`
pub fn resolve_config(args: &AnalyzeArgs) -> CliResult<AnalysisConfig> {
    let base = match args.config {
        Some(ref path) => load_analysis_config(path)?,
        None => AnalysisConfig::new(),
    };
    Ok(apply_overrides(base, args))
}

/// Run the analysis, drawing a progress bar when rows are blocked
pub fn run_analysis(config: &CliConfig, analysis: AnalysisConfig) -> CliResult<DistortionReport> {
    let blocked = analysis.block_rows.is_some();
    let field = DistortionField::new(analysis)?;

    let mut reporter = ProgressReporter::new(config.use_color(), config.verbosity.is_quiet());
    if blocked {
        reporter.start_progress(field.grid().resolution() as u64, "analyzing");
    }

    let mut done = 0;
    let report = field.run_with_progress(|progress| {
        reporter.increment((progress.completed_rows - done) as u64);
        done = progress.completed_rows;
    });
    reporter.finish();
    Ok(report)
}

/// Execute the analyze command
pub fn execute_analyze(config: &CliConfig, args: &AnalyzeArgs) -> CliResult<()> {
    let analysis = resolve_config(args)?;
    debug!(?analysis, "resolved analysis configuration");
    let report = run_analysis(config, analysis)?;
    let summary = report.summary();
    let reporter = ProgressReporter::new(config.use_color(), config.verbosity.is_quiet());

    match args.format {
        FormatArg::Text => println!("{}", render_summary(&summary, config.use_color())),
        FormatArg::Json => println!("{}", summary.to_json()?),
    }

    if let Some(ref path) = args.output {
        std::fs::write(path, summary.to_json()?)?;
        reporter.success(&format!("Summary written to {}", path.display()));
    }

    if let Some(ref path) = args.fields {
        report.field_export().write_json(path)?;
        reporter.success(&format!("Fields written to {}", path.display()));
    }

    Ok(())
}
