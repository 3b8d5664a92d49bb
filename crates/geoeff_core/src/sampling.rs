//! Random point generators for source positions and emission offsets.
//!
//! Three sampling policies are supported:
//! - **Uniform disk**: area-uniform points on a disk of radius `r_s`, using
//!   `r = r_s * sqrt(U)` so the center is not over-populated.
//! - **Gaussian disk**: a signed `Normal(0, sigma)` draw used directly as the radius
//!   with a uniform azimuth.
//! - **Isotropic**: the planar offset at perpendicular distance `z` of a direction
//!   drawn uniformly on the sphere (`theta = acos(1 - 2U)`).
//!
//! Every [`PointSampler`] owns its own generator seeded from
//! [`SamplingParameters::seed`], so two samplers with different seeds never share
//! random state.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng, distr::Distribution};
use serde::{Deserialize, Serialize};

use crate::error::SamplingError;
use crate::field::Point2DField;

/// Spatial distribution of emitters across the source area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Uniform,
    Gaussian,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Uniform => "uniform",
            SourceKind::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(SourceKind::Uniform),
            "gaussian" => Ok(SourceKind::Gaussian),
            other => Err(SamplingError::UnknownKind(other.to_string())),
        }
    }
}

/// Sampling policy used to fill a [`Point2DField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    UniformDisk,
    GaussianDisk,
    Isotropic,
}

impl DistributionKind {
    fn name(self) -> &'static str {
        match self {
            DistributionKind::UniformDisk => "uniform disk",
            DistributionKind::GaussianDisk => "gaussian disk",
            DistributionKind::Isotropic => "isotropic",
        }
    }
}

impl From<SourceKind> for DistributionKind {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Uniform => DistributionKind::UniformDisk,
            SourceKind::Gaussian => DistributionKind::GaussianDisk,
        }
    }
}

/// Immutable per-call generator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParameters {
    pub kind: DistributionKind,
    /// Disk radius, Gaussian sigma or emission distance `z`, depending on `kind`
    pub scale: f64,
    pub seed: u64,
}

impl SamplingParameters {
    #[must_use]
    pub fn new(kind: DistributionKind, scale: f64, seed: u64) -> Self {
        Self { kind, scale, seed }
    }

    #[must_use]
    pub fn isotropic(z: f64, seed: u64) -> Self {
        Self::new(DistributionKind::Isotropic, z, seed)
    }
}

#[derive(Debug, Clone, Copy)]
enum Policy {
    UniformDisk { radius: f64 },
    GaussianDisk { radial: rand_distr::Normal<f64> },
    Isotropic { z: f64 },
}

/// A seeded generator bound to one sampling policy.
///
/// Consecutive [`fill`](Self::fill) calls continue the same random stream, so
/// filling a field in chunks yields the same points as a single full-length fill.
#[derive(Debug, Clone)]
pub struct PointSampler {
    rng: SmallRng,
    policy: Policy,
}

impl PointSampler {
    /// Validate `params` and seed a fresh generator. No random numbers are drawn here.
    pub fn new(params: &SamplingParameters) -> Result<Self, SamplingError> {
        let distribution = params.kind.name();
        if !params.scale.is_finite() || params.scale < 0.0 {
            return Err(SamplingError::InvalidScale {
                distribution,
                scale: params.scale,
            });
        }

        let policy = match params.kind {
            DistributionKind::UniformDisk => Policy::UniformDisk {
                radius: params.scale,
            },
            DistributionKind::GaussianDisk => rand_distr::Normal::new(0.0, params.scale)
                .map(|radial| Policy::GaussianDisk { radial })
                .map_err(|e| SamplingError::InvalidDistribution {
                    distribution,
                    reason: e.to_string(),
                })?,
            DistributionKind::Isotropic => Policy::Isotropic { z: params.scale },
        };

        Ok(Self {
            rng: SmallRng::seed_from_u64(params.seed),
            policy,
        })
    }

    /// Overwrite every point of `field` with fresh samples.
    pub fn fill(&mut self, field: &mut Point2DField) {
        let (xs, ys) = field.coords_mut();
        for (x, y) in xs.iter_mut().zip(ys.iter_mut()) {
            let (px, py) = self.sample_point();
            *x = px;
            *y = py;
        }
    }

    #[inline]
    fn sample_point(&mut self) -> (f64, f64) {
        let phi = self.rng.random_range(0.0..TAU);
        let r = match self.policy {
            Policy::UniformDisk { radius } => radius * self.rng.random::<f64>().sqrt(),
            Policy::GaussianDisk { radial } => radial.sample(&mut self.rng),
            Policy::Isotropic { z } => {
                let theta = (1.0 - 2.0 * self.rng.random::<f64>()).acos();
                z * theta.tan()
            }
        };
        (r * phi.cos(), r * phi.sin())
    }
}

/// Generate a new field of `n` points.
pub fn generate(n: usize, params: &SamplingParameters) -> Result<Point2DField, SamplingError> {
    let mut sampler = PointSampler::new(params)?;
    let mut field = Point2DField::zeros(n);
    sampler.fill(&mut field);
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_round_trips_through_str() {
        assert_eq!("uniform".parse::<SourceKind>().unwrap(), SourceKind::Uniform);
        assert_eq!("gaussian".parse::<SourceKind>().unwrap(), SourceKind::Gaussian);
        assert_eq!(SourceKind::Gaussian.to_string(), "gaussian");
    }

    #[test]
    fn test_unknown_source_kind() {
        let err = "circular".parse::<SourceKind>().unwrap_err();
        assert_eq!(err, SamplingError::UnknownKind("circular".to_string()));
    }

    #[test]
    fn test_rejects_bad_scale_before_sampling() {
        for scale in [-1.0, f64::NAN, f64::INFINITY] {
            let params = SamplingParameters::new(DistributionKind::UniformDisk, scale, 1);
            assert!(matches!(
                PointSampler::new(&params),
                Err(SamplingError::InvalidScale { .. })
            ));
        }
    }
}
