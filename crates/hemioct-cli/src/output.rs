//! Output formatting and progress reporting

use console::{style, Term};
use hemioct::{QuantizationStats, ReportSummary, Vec3};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress and status messages on stderr
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` rows
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} rows {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(message.to_string());
        self.progress_bar = Some(pb);
    }

    /// Increment progress
    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}

fn label(text: &str, use_color: bool) -> String {
    let padded = format!("{text:<18}");
    if use_color {
        style(padded).bold().to_string()
    } else {
        padded
    }
}

/// Render an analysis summary as aligned text
#[must_use]
pub fn render_summary(summary: &ReportSummary, use_color: bool) -> String {
    let title = if use_color {
        style("Hemi-octahedral distortion").bold().underlined().to_string()
    } else {
        "=== Hemi-octahedral distortion ===".to_string()
    };
    let a = &summary.anisotropy;
    let d = &summary.distortion;

    let mut lines = vec![title];
    lines.push(format!(
        "{}{} x {} ({} cells)",
        label("grid", use_color),
        summary.resolution,
        summary.resolution,
        summary.cells
    ));
    lines.push(format!(
        "{}{}",
        label("inset epsilon", use_color),
        summary.inset_epsilon
    ));
    lines.push(format!(
        "{}{}",
        label("anisotropy model", use_color),
        summary.anisotropy_model.label()
    ));
    lines.push(format!(
        "{}min {:.6}  max {:.6}  ratio {:.4}",
        label("area distortion", use_color),
        d.min,
        d.max,
        d.ratio
    ));
    lines.push(format!(
        "{}max {:.4}  mean {:.4}  above {}: {:.2}%",
        label("anisotropy", use_color),
        a.max_severity,
        a.mean_severity,
        a.threshold,
        a.percent_above_threshold
    ));
    lines.join("\n")
}

/// Render a decoded direction
#[must_use]
pub fn render_vector(n: Vec3) -> String {
    format!("{:.6}, {:.6}, {:.6}", n[0], n[1], n[2])
}

/// Render quantization results as a table
#[must_use]
pub fn render_quantization(stats: &[QuantizationStats], use_color: bool) -> String {
    let header = format!(
        "{:<14}{:>6}{:>10}{:>12}{:>12}{:>12}",
        "encoding", "bits", "samples", "max deg", "mean deg", "rms deg"
    );
    let mut lines = vec![if use_color {
        style(header).bold().to_string()
    } else {
        header
    }];
    for s in stats {
        lines.push(format!(
            "{:<14}{:>6}{:>10}{:>12.5}{:>12.5}{:>12.5}",
            encoding_name(s.encoding),
            s.bits,
            s.samples,
            s.max_angular_error_deg,
            s.mean_angular_error_deg,
            s.rms_angular_error_deg
        ));
    }
    lines.join("\n")
}

const fn encoding_name(encoding: hemioct::NormalEncoding) -> &'static str {
    match encoding {
        hemioct::NormalEncoding::HemiOct => "hemi-oct",
        hemioct::NormalEncoding::ProjectedXy => "projected-xy",
    }
}
