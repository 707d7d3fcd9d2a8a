//! Distortion field analysis: grid → decode → tangents → metrics → summary.
//!
//! Rows are processed in blocks. A block decodes its own rows plus one halo
//! row on each side, so tangent and metric values are bit-identical whatever
//! the block size. Only the output grids (distortion, severity, ratio) are
//! held at full size; decoded vectors and per-axis stretches live for one
//! block unless `keep_intermediates` is set.

use crate::config::{AnalysisConfig, AnisotropyModel};
use crate::decode::{decode, decode_rows};
use crate::derivative::{estimate_tangents_windowed, halo};
use crate::grid::ParameterGrid;
use crate::metrics::{AnisotropyStats, DistortionStats, MetricField};
use crate::result::HemiOctResult;
use crate::vector::{Vec3, VectorField};
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Progress notification emitted after each block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    /// Rows finished so far
    pub completed_rows: usize,
    /// Rows in the grid
    pub total_rows: usize,
}

/// Analysis runner bound to one validated configuration
#[derive(Debug, Clone)]
pub struct DistortionField {
    config: AnalysisConfig,
    grid: ParameterGrid,
}

impl DistortionField {
    /// Validate the configuration and build the grid
    pub fn new(config: AnalysisConfig) -> HemiOctResult<Self> {
        let grid = ParameterGrid::new(&config)?;
        Ok(Self { config, grid })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parameter grid
    #[must_use]
    pub const fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    /// Row ranges processed one at a time
    #[must_use]
    pub fn blocks(&self) -> Vec<std::ops::Range<usize>> {
        let n = self.grid.resolution();
        let size = self.config.effective_block_rows().max(1);
        (0..n)
            .step_by(size)
            .map(|start| start..(start + size).min(n))
            .collect()
    }

    /// Run the full analysis
    pub fn run(&self) -> DistortionReport {
        self.run_with_progress(|_| {})
    }

    /// Run the full analysis, reporting after each block
    pub fn run_with_progress(&self, mut on_block: impl FnMut(BlockProgress)) -> DistortionReport {
        let n = self.grid.resolution();
        let step = self.grid.step();
        let blocks = self.blocks();
        let _span = tracing::info_span!(
            "distortion_field",
            resolution = n,
            blocks = blocks.len(),
            model = self.config.anisotropy_model.label()
        )
        .entered();

        let mut distortion = Array2::zeros((n, n));
        let mut severity = Array2::zeros((n, n));
        let mut ratio = Array2::zeros((n, n));
        let mut intermediates = self
            .config
            .keep_intermediates
            .then(|| Intermediates::zeros(n));

        for rows in blocks {
            let window_rows = halo(&rows, n);
            let window = decode_rows(&self.grid, window_rows.clone());
            let tangents =
                estimate_tangents_windowed(&window, window_rows.start, n, rows.clone(), step);
            let block = MetricField::from_tangents(&tangents, self.config.anisotropy_model);

            write_rows(&mut distortion, rows.start, &block.distortion);
            write_rows(&mut severity, rows.start, &block.severity);
            write_rows(&mut ratio, rows.start, &block.ratio);
            if let Some(kept) = intermediates.as_mut() {
                let local = (rows.start - window_rows.start)..(rows.end - window_rows.start);
                kept.decoded.write_rows(rows.start, &window.rows(local));
                write_rows(&mut kept.sigma_u, rows.start, &block.sigma_u);
                write_rows(&mut kept.sigma_v, rows.start, &block.sigma_v);
            }

            debug!(start = rows.start, end = rows.end, "processed row block");
            on_block(BlockProgress {
                completed_rows: rows.end,
                total_rows: n,
            });
        }

        let distortion_stats = DistortionStats::from_values(&distortion);
        let anisotropy =
            AnisotropyStats::from_values(&severity, self.config.anisotropy_threshold);
        info!(
            min = distortion_stats.min,
            max = distortion_stats.max,
            ratio = distortion_stats.ratio,
            max_severity = anisotropy.max_severity,
            "distortion analysis complete"
        );

        DistortionReport {
            config: self.config.clone(),
            u_axis: self.grid.u_axis().to_vec(),
            v_axis: self.grid.v_axis().to_vec(),
            distortion,
            severity,
            ratio,
            intermediates,
            distortion_stats,
            anisotropy,
        }
    }
}

fn write_rows(target: &mut Array2<f64>, row: usize, block: &Array2<f64>) {
    let end = row + block.nrows();
    target.slice_mut(s![row..end, ..]).assign(block);
}

/// Validate `config` and run the analysis in one call
pub fn analyze(config: &AnalysisConfig) -> HemiOctResult<DistortionReport> {
    Ok(DistortionField::new(config.clone())?.run())
}

/// Full-size grids that are not needed for the summary
#[derive(Debug, Clone, PartialEq)]
pub struct Intermediates {
    /// Decoded unit vectors
    pub decoded: VectorField,
    /// Stretch along u
    pub sigma_u: Array2<f64>,
    /// Stretch along v
    pub sigma_v: Array2<f64>,
}

impl Intermediates {
    fn zeros(n: usize) -> Self {
        Self {
            decoded: VectorField::zeros(n, n),
            sigma_u: Array2::zeros((n, n)),
            sigma_v: Array2::zeros((n, n)),
        }
    }
}

/// Grids and statistics of one analysis run
#[derive(Debug, Clone)]
pub struct DistortionReport {
    /// Configuration the run used
    pub config: AnalysisConfig,
    /// u samples (columns)
    pub u_axis: Vec<f64>,
    /// v samples (rows)
    pub v_axis: Vec<f64>,
    /// `|Tu × Tv|` per cell
    pub distortion: Array2<f64>,
    /// Direction-agnostic anisotropy per cell
    pub severity: Array2<f64>,
    /// `σu / σv` per cell, with `Tu` taken along columns. A script that
    /// differentiates along rows first reports the reciprocal.
    pub ratio: Array2<f64>,
    /// Present when `keep_intermediates` was set
    pub intermediates: Option<Intermediates>,
    /// Area distortion summary
    pub distortion_stats: DistortionStats,
    /// Anisotropy summary
    pub anisotropy: AnisotropyStats,
}

impl DistortionReport {
    /// Samples per axis
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.u_axis.len()
    }

    /// Number of grid cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.distortion.len()
    }

    /// u coordinate of each cell
    #[must_use]
    pub fn u(&self) -> Array2<f64> {
        let n = self.resolution();
        Array2::from_shape_fn((n, n), |(_, j)| self.u_axis[j])
    }

    /// v coordinate of each cell
    #[must_use]
    pub fn v(&self) -> Array2<f64> {
        let n = self.resolution();
        Array2::from_shape_fn((n, n), |(i, _)| self.v_axis[i])
    }

    /// Decoded direction at the centre of the sampled square
    ///
    /// Odd resolutions have a middle sample and this is its decoded vector.
    /// Even resolutions decode the midpoint of the two middle samples.
    #[must_use]
    pub fn center_vector(&self) -> Vec3 {
        let mid = |axis: &[f64]| {
            let n = axis.len();
            (axis[(n - 1) / 2] + axis[n / 2]) * 0.5
        };
        decode(mid(&self.u_axis), mid(&self.v_axis))
    }

    /// Area distortion grid
    #[must_use]
    pub const fn distortion_field(&self) -> &Array2<f64> {
        &self.distortion
    }

    /// Severity grid
    #[must_use]
    pub const fn severity_field(&self) -> &Array2<f64> {
        &self.severity
    }

    /// Serializable summary without the grids
    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            resolution: self.resolution(),
            cells: self.cell_count(),
            inset_epsilon: self.config.inset_epsilon,
            anisotropy_model: self.config.anisotropy_model,
            distortion: self.distortion_stats,
            anisotropy: self.anisotropy,
        }
    }

    /// Axis samples and row-major scalar fields for external plotting
    #[must_use]
    pub fn field_export(&self) -> FieldExport {
        FieldExport {
            resolution: self.resolution(),
            u: self.u_axis.clone(),
            v: self.v_axis.clone(),
            distortion: self.distortion.iter().copied().collect(),
            severity: self.severity.iter().copied().collect(),
        }
    }
}

/// Summary statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Samples per axis
    pub resolution: usize,
    /// Grid cells
    pub cells: usize,
    /// Domain inset
    pub inset_epsilon: f64,
    /// Anisotropy estimator
    pub anisotropy_model: AnisotropyModel,
    /// Area distortion summary
    pub distortion: DistortionStats,
    /// Anisotropy summary
    pub anisotropy: AnisotropyStats,
}

impl ReportSummary {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> HemiOctResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Scalar fields in row-major order (`index = row * resolution + col`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExport {
    /// Samples per axis
    pub resolution: usize,
    /// u samples
    pub u: Vec<f64>,
    /// v samples
    pub v: Vec<f64>,
    /// Area distortion per cell
    pub distortion: Vec<f64>,
    /// Severity per cell
    pub severity: Vec<f64>,
}

impl FieldExport {
    /// Write compact JSON to `path`
    pub fn write_json(&self, path: &Path) -> HemiOctResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read an export back
    pub fn read_json(path: &Path) -> HemiOctResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
