//! Monte Carlo geometric detection efficiency
//!
//! This crate estimates the fraction of isotropically emitted particles from an
//! extended source that reach a flat detector placed at a distance `z`.
//! It supports:
//! - Uniform and Gaussian source distributions
//! - Circular and annular (ring) detectors
//! - Distance sweeps with deterministic per-point seeds, optionally in parallel
//! - The analytic point-source efficiency as a reference curve
//!
//! All lengths are in units of the detector radius.
//!
//! ```ignore
//! use geoeff_core::{Detector, DistanceGrid, SourceKind, SweepConfig, sweep_evaluate};
//!
//! let config = SweepConfig {
//!     grid: DistanceGrid { z_min: 0.0, z_max: 5.0, points: 11 },
//!     source_kind: SourceKind::Uniform,
//!     source_scale: 0.1,
//!     samples_per_point: 100_000,
//!     detector: Detector::Circular,
//!     seed: geoeff_core::DEFAULT_SEED,
//!     parallel: true,
//! };
//! let result = sweep_evaluate(&config, None)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod estimator;
pub mod field;
pub mod grid;
pub mod sampling;
pub mod sweep;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{ConfigError, FieldError, SamplingError};
pub use estimator::{TrialResult, estimate, relative_uncertainty};
pub use field::Point2DField;
pub use grid::{linspace, point_source};
pub use sampling::{DistributionKind, PointSampler, SamplingParameters, SourceKind, generate};
pub use sweep::{
    DEFAULT_SEED, Detector, DetectorShape, DistanceGrid, MAX_SAMPLE_POWER, PointReport,
    SweepConfig, SweepPoint, SweepProgress, SweepResult, derive_seed, evaluate_point,
    samples_from_power, sweep_evaluate, sweep_evaluate_with,
};
