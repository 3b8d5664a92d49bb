//! Distance sweep driver.
//!
//! Runs the efficiency estimator at every point of a linear distance grid and
//! assembles the efficiency curve. Annular detectors are handled by subtracting the
//! efficiency of the inner disk from that of the outer one; the inner trial is run
//! with distance and source size both multiplied by the outer/inner radius ratio,
//! i.e. expressed in units of the inner radius.
//!
//! Each grid point gets its own seed from [`derive_seed`], so points can be
//! evaluated in any order (or in parallel with the `parallel` feature) and still
//! produce identical results.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::estimator::estimate;
use crate::grid::{linspace, point_source};
use crate::sampling::SourceKind;

/// Base seed used when none is configured
pub const DEFAULT_SEED: u64 = 15_763_027;

/// Largest accepted power of ten for samples per point
pub const MAX_SAMPLE_POWER: u32 = 9;

/// Samples per grid point for a given power of ten.
pub fn samples_from_power(power: u32) -> Result<usize, ConfigError> {
    if power > MAX_SAMPLE_POWER {
        return Err(ConfigError::PowerTooLarge {
            power,
            max: MAX_SAMPLE_POWER,
        });
    }
    Ok(10usize.pow(power))
}

/// Independent seed for grid point `index`, derived from the sweep's base seed.
///
/// Uses SplitMix64 mixing so neighbouring indices give unrelated seeds.
#[must_use]
pub fn derive_seed(base: u64, index: usize) -> u64 {
    splitmix64(base ^ splitmix64(index as u64))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Detector shape as named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorShape {
    Circular,
    Annular,
}

impl FromStr for DetectorShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circular" => Ok(DetectorShape::Circular),
            "annular" => Ok(DetectorShape::Annular),
            other => Err(ConfigError::UnknownDetector(other.to_string())),
        }
    }
}

impl fmt::Display for DetectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorShape::Circular => f.write_str("circular"),
            DetectorShape::Annular => f.write_str("annular"),
        }
    }
}

/// Detector geometry in units of the (outer) detector radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Detector {
    Circular,
    /// Ring detector; `ratio` is outer radius / inner radius
    Annular { ratio: f64 },
}

impl Detector {
    /// Combine a parsed shape with the ratio needed by annular detectors.
    pub fn from_shape(shape: DetectorShape, ratio: Option<f64>) -> Result<Self, ConfigError> {
        match shape {
            DetectorShape::Circular => Ok(Detector::Circular),
            DetectorShape::Annular => {
                let ratio = ratio.ok_or(ConfigError::MissingDetectorRatio)?;
                Ok(Detector::Annular { ratio })
            }
        }
    }

    #[must_use]
    pub fn shape(&self) -> DetectorShape {
        match self {
            Detector::Circular => DetectorShape::Circular,
            Detector::Annular { .. } => DetectorShape::Annular,
        }
    }
}

/// Linear grid of detector distances, in detector radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceGrid {
    pub z_min: f64,
    pub z_max: f64,
    pub points: usize,
}

impl DistanceGrid {
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        linspace(self.z_min, self.z_max, self.points)
    }

    /// Fraction of the distance range covered once `z` is reached.
    #[must_use]
    pub fn completion(&self, z: f64) -> f64 {
        let span = self.z_max - self.z_min;
        if span == 0.0 {
            1.0
        } else {
            (z - self.z_min) / span
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_parallel() -> bool {
    true
}

/// Full description of one efficiency sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub grid: DistanceGrid,
    pub source_kind: SourceKind,
    /// Source radius (uniform) or sigma (gaussian), in detector radii
    pub source_scale: f64,
    pub samples_per_point: usize,
    pub detector: Detector,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Evaluate grid points on the rayon pool when the `parallel` feature is enabled
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl SweepConfig {
    /// Check every parameter before any sampling happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.points == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.samples_per_point == 0 {
            return Err(ConfigError::NoSamples);
        }

        for (name, value) in [
            ("z_min", self.grid.z_min),
            ("z_max", self.grid.z_max),
            ("source scale", self.source_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if let Detector::Annular { ratio } = self.detector
            && !(ratio.is_finite() && ratio > 1.0)
        {
            return Err(ConfigError::InvalidDetectorRatio(ratio));
        }

        Ok(())
    }
}

/// One row of the efficiency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub z: f64,
    /// Analytic point-source efficiency (%) at `z`
    pub point_source: f64,
    /// Simulated efficiency (%)
    pub efficiency: f64,
    /// Relative uncertainty (%) of `efficiency`
    pub relative_uncertainty: f64,
}

/// Efficiency curve in grid order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    /// Number of evaluated grid points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in grid order
    pub fn iter(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter()
    }
}

/// Progress notification for a finished grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointReport {
    pub index: usize,
    /// Fraction of the distance range covered at this point
    pub completion: f64,
    pub point: SweepPoint,
}

/// Shared completed/total counter for a running sweep.
#[derive(Debug, Clone)]
pub struct SweepProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl SweepProgress {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(total)),
        }
    }

    /// Get the number of completed points
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Get the total number of points
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Increment the completed counter
    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset the progress for a new sweep of `total` points
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Evaluate a single grid point.
///
/// The configuration is validated first, so an invalid detector ratio or source
/// scale is reported instead of producing an out-of-range efficiency.
pub fn evaluate_point(config: &SweepConfig, index: usize, z: f64) -> Result<SweepPoint, ConfigError> {
    config.validate()?;
    evaluate_validated(config, index, z)
}

/// Evaluate a grid point of a configuration that already passed `validate`.
fn evaluate_validated(config: &SweepConfig, index: usize, z: f64) -> Result<SweepPoint, ConfigError> {
    let seed = derive_seed(config.seed, index);
    let n = config.samples_per_point;

    let (efficiency, relative_uncertainty) = match config.detector {
        Detector::Circular => {
            let trial = estimate(z, config.source_scale, n, seed, config.source_kind)?;
            (trial.efficiency, trial.relative_uncertainty)
        }
        Detector::Annular { ratio } => {
            let outer = estimate(z, config.source_scale, n, seed, config.source_kind)?;
            let inner = estimate(
                z * ratio,
                config.source_scale * ratio,
                n,
                seed,
                config.source_kind,
            )?;
            (
                outer.efficiency - inner.efficiency,
                outer.relative_uncertainty.hypot(inner.relative_uncertainty),
            )
        }
    };

    Ok(SweepPoint {
        z,
        point_source: point_source(z),
        efficiency,
        relative_uncertainty,
    })
}

/// Run the sweep without a per-point observer.
pub fn sweep_evaluate(
    config: &SweepConfig,
    progress: Option<&SweepProgress>,
) -> Result<SweepResult, ConfigError> {
    sweep_evaluate_with(config, progress, |_| {})
}

/// Run the sweep, calling `on_point` as each grid point finishes.
///
/// With parallel evaluation `on_point` may be called from worker threads and out
/// of grid order; the returned result is always in grid order.
pub fn sweep_evaluate_with<F>(
    config: &SweepConfig,
    progress: Option<&SweepProgress>,
    on_point: F,
) -> Result<SweepResult, ConfigError>
where
    F: Fn(&PointReport) + Sync,
{
    config.validate()?;

    let zs = config.grid.values();
    if let Some(p) = progress {
        p.reset(zs.len());
    }

    tracing::info!(
        points = zs.len(),
        samples = config.samples_per_point,
        source = %config.source_kind,
        detector = %config.detector.shape(),
        seed = config.seed,
        "starting efficiency sweep"
    );

    let run = |index: usize, z: f64| -> Result<SweepPoint, ConfigError> {
        let point = evaluate_validated(config, index, z)?;
        let report = PointReport {
            index,
            completion: config.grid.completion(z),
            point,
        };
        tracing::info!(
            index,
            z,
            efficiency = point.efficiency,
            relative_uncertainty = point.relative_uncertainty,
            "grid point complete"
        );
        on_point(&report);
        if let Some(p) = progress {
            p.increment();
        }
        Ok(point)
    };

    #[cfg(feature = "parallel")]
    let points = if config.parallel {
        zs.par_iter()
            .enumerate()
            .map(|(index, &z)| run(index, z))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        zs.iter()
            .enumerate()
            .map(|(index, &z)| run(index, z))
            .collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let points = zs
        .iter()
        .enumerate()
        .map(|(index, &z)| run(index, z))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(points = points.len(), "efficiency sweep finished");

    Ok(SweepResult { points })
}
