//! Command handlers
//!
//! One module per subcommand; `main.rs` only dispatches.

pub mod analyze;
pub mod config;
pub mod decode;
pub mod encode;
pub mod quantize;

pub use analyze::{apply_overrides, execute_analyze, load_analysis_config, resolve_config};
pub use config::{execute_config, render_config};
pub use decode::execute_decode;
pub use encode::execute_encode;
pub use quantize::{execute_quantize, run_studies};
