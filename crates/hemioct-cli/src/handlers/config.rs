//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::handlers::analyze::load_analysis_config;
use crate::output::ProgressReporter;
use crate::{ConfigArgs, ConfigFormat};
use hemioct::AnalysisConfig;

/// Serialize an analysis configuration
pub fn render_config(config: &AnalysisConfig, format: ConfigFormat) -> CliResult<String> {
    Ok(match format {
        ConfigFormat::Yaml => config.to_yaml()?,
        ConfigFormat::Json => config.to_json()?,
    })
}

/// Execute the config command
pub fn execute_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    let reporter = ProgressReporter::new(config.use_color(), config.verbosity.is_quiet());
    let defaults = AnalysisConfig::new();

    if let Some(ref path) = args.init {
        std::fs::write(path, render_config(&defaults, args.format)?)?;
        reporter.success(&format!("Default configuration written to {}", path.display()));
    }

    if let Some(ref path) = args.check {
        let loaded = load_analysis_config(path)?;
        loaded.validate()?;
        reporter.success(&format!("{} is valid", path.display()));
        if config.verbosity.is_verbose() {
            print!("{}", render_config(&loaded, args.format)?);
        }
    }

    if args.show || (args.init.is_none() && args.check.is_none()) {
        print!("{}", render_config(&defaults, args.format)?);
        if args.format == ConfigFormat::Json {
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::CliError;
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(Verbosity::Quiet)
    }

    #[test]
    fn test_render_yaml_and_json() {
        let config = AnalysisConfig::new();
        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("resolution: 1024"));
        let json = render_config(&config, ConfigFormat::Json).unwrap();
        assert!(json.contains("\"anisotropy_model\": \"axis_norm\""));
    }

    #[test]
    fn test_init_then_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hemioct.yaml");
        let init = ConfigArgs {
            show: false,
            init: Some(path.clone()),
            check: None,
            format: ConfigFormat::Yaml,
        };
        execute_config(&quiet(), &init).unwrap();
        assert!(path.exists());

        let check = ConfigArgs {
            show: false,
            init: None,
            check: Some(path),
            format: ConfigFormat::Yaml,
        };
        execute_config(&quiet(), &check).unwrap();
    }

    #[test]
    fn test_check_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"inset_epsilon": 1.5}"#).unwrap();
        let args = ConfigArgs {
            show: false,
            init: None,
            check: Some(path),
            format: ConfigFormat::Json,
        };
        assert!(matches!(
            execute_config(&quiet(), &args),
            Err(CliError::Analysis(_))
        ));
    }
}
