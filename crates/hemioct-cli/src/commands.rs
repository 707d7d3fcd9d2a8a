//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use hemioct::{AnisotropyModel, NormalEncoding};
use std::path::PathBuf;

/// hemioct: distortion analysis of the hemi-octahedral normal mapping
#[derive(Parser, Debug)]
#[command(name = "hemioct")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit log records as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure area distortion and anisotropy over the parameter square
    Analyze(AnalyzeArgs),

    /// Decode one (u, v) pair to a unit vector
    Decode(DecodeArgs),

    /// Encode one direction to (u, v)
    Encode(EncodeArgs),

    /// Measure angular error of quantized normal encodings
    Quantize(QuantizeArgs),

    /// Show, write or check an analysis configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Default)]
pub struct AnalyzeArgs {
    /// Configuration file (.json, .yaml or .yml); flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Samples per axis
    #[arg(short, long)]
    pub resolution: Option<usize>,

    /// Domain inset; samples span (-1 + epsilon, 1 - epsilon)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Severity above which a cell counts as anisotropic
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Anisotropy model
    #[arg(short, long)]
    pub model: Option<ModelArg>,

    /// Process the grid this many rows at a time
    #[arg(long)]
    pub block_rows: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,

    /// Also write the JSON summary to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the distortion and severity fields as JSON
    #[arg(long)]
    pub fields: Option<PathBuf>,
}

/// Arguments for the decode command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// First parameter, in (-1, 1)
    #[arg(allow_negative_numbers = true)]
    pub u: f64,

    /// Second parameter, in (-1, 1)
    #[arg(allow_negative_numbers = true)]
    pub v: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the encode command
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// x component
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    /// y component
    #[arg(allow_negative_numbers = true)]
    pub y: f64,

    /// z component (upper hemisphere, z >= 0)
    #[arg(allow_negative_numbers = true)]
    pub z: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the quantize command
#[derive(Parser, Debug)]
pub struct QuantizeArgs {
    /// Bits per stored channel
    #[arg(short, long, default_value = "8")]
    pub bits: u32,

    /// Samples per spherical axis
    #[arg(short, long, default_value = "256")]
    pub samples: usize,

    /// Encoding to measure
    #[arg(short, long, default_value = "hemi-oct")]
    pub encoding: EncodingArg,

    /// Measure every encoding side by side
    #[arg(long)]
    pub compare: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the default analysis configuration
    #[arg(long)]
    pub show: bool,

    /// Write the default analysis configuration to this file
    #[arg(long)]
    pub init: Option<PathBuf>,

    /// Load and validate this configuration file
    #[arg(long)]
    pub check: Option<PathBuf>,

    /// Serialization used by --show and --init
    #[arg(long, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Anisotropy model selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelArg {
    /// Ratio of tangent lengths
    AxisNorm,
    /// Ratio of Jacobian singular values
    Singular,
}

impl From<ModelArg> for AnisotropyModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::AxisNorm => Self::AxisNorm,
            ModelArg::Singular => Self::Singular,
        }
    }
}

/// Normal encoding selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingArg {
    /// Hemi-octahedral (u, v)
    HemiOct,
    /// Raw (x, y) with z rebuilt
    ProjectedXy,
}

impl From<EncodingArg> for NormalEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::HemiOct => Self::HemiOct,
            EncodingArg::ProjectedXy => Self::ProjectedXy,
        }
    }
}

/// Configuration file serialization
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
