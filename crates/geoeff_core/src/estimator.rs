//! Single-distance Monte Carlo efficiency estimate.
//!
//! For one detector distance `z` the estimator draws `n` source positions and `n`
//! isotropic emission offsets, lands each particle on the detector plane and counts
//! the ones inside the unit detector radius. Emission directions are drawn over the
//! full sphere, so the hit percentage is scaled by 50 rather than 100.

use crate::error::ConfigError;
use crate::field::Point2DField;
use crate::sampling::{PointSampler, SamplingParameters, SourceKind};

/// Points generated per pass; bounds memory independently of the sample count.
const CHUNK_SIZE: usize = 1 << 16;

/// Outcome of one Monte Carlo trial at a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// Geometric efficiency in percent, within [0, 50]
    pub efficiency: f64,
    /// Relative statistical uncertainty in percent (infinite when nothing hit)
    pub relative_uncertainty: f64,
    pub hits: u64,
    pub samples: u64,
}

impl TrialResult {
    /// Build a result from raw hit counts.
    #[must_use]
    pub fn from_counts(hits: u64, samples: u64) -> Self {
        let efficiency = if samples == 0 {
            0.0
        } else {
            50.0 * hits as f64 / samples as f64
        };
        Self {
            efficiency,
            relative_uncertainty: relative_uncertainty(efficiency, samples),
            hits,
            samples,
        }
    }
}

/// Poisson counting uncertainty (%) of an efficiency measured with `samples` draws.
///
/// Returns `f64::INFINITY` for a zero efficiency.
#[must_use]
pub fn relative_uncertainty(efficiency: f64, samples: u64) -> f64 {
    if efficiency <= 0.0 || samples == 0 {
        return f64::INFINITY;
    }
    100.0 / (2.0 * samples as f64 * efficiency / 100.0).sqrt()
}

/// Estimate the geometric efficiency of a source of `source_kind` and size
/// `source_scale` at distance `z` from a unit detector.
///
/// Source positions use `seed`, emission directions use `seed + 1`. The result is
/// a pure function of the arguments.
pub fn estimate(
    z: f64,
    source_scale: f64,
    n: usize,
    seed: u64,
    source_kind: SourceKind,
) -> Result<TrialResult, ConfigError> {
    estimate_chunked(z, source_scale, n, seed, source_kind, CHUNK_SIZE)
}

pub(crate) fn estimate_chunked(
    z: f64,
    source_scale: f64,
    n: usize,
    seed: u64,
    source_kind: SourceKind,
    chunk_size: usize,
) -> Result<TrialResult, ConfigError> {
    if n == 0 {
        return Err(ConfigError::NoSamples);
    }

    let mut source = PointSampler::new(&SamplingParameters::new(
        source_kind.into(),
        source_scale,
        seed,
    ))?;
    let mut emission = PointSampler::new(&SamplingParameters::isotropic(z, seed.wrapping_add(1)))?;

    let chunk_size = chunk_size.clamp(1, n);
    let mut positions = Point2DField::zeros(chunk_size);
    let mut offsets = Point2DField::zeros(chunk_size);

    let mut hits = 0u64;
    let mut remaining = n;
    while remaining > 0 {
        let len = remaining.min(chunk_size);
        positions.resize(len);
        offsets.resize(len);

        source.fill(&mut positions);
        emission.fill(&mut offsets);
        positions.add(&offsets)?;

        hits += positions.squared_radius().filter(|&r_sq| r_sq <= 1.0).count() as u64;
        remaining -= len;
    }

    let result = TrialResult::from_counts(hits, n as u64);
    tracing::debug!(
        z,
        source_scale,
        seed,
        hits,
        efficiency = result.efficiency,
        "trial complete"
    );
    if hits == 0 {
        tracing::warn!(z, source_scale, "no hits recorded, uncertainty is unbounded");
    }

    Ok(result)
}
