//! Tests for single-distance efficiency trials

use crate::error::{ConfigError, SamplingError};
use crate::estimator::{TrialResult, estimate, estimate_chunked, relative_uncertainty};
use crate::grid::point_source;
use crate::sampling::SourceKind;

const SEED: u64 = 15_763_027;

#[test]
fn test_efficiency_within_hemisphere_bounds() {
    for kind in [SourceKind::Uniform, SourceKind::Gaussian] {
        for z in [0.0, 0.1, 0.5, 1.0, 3.0, 20.0] {
            for scale in [0.0, 0.1, 1.0, 4.0] {
                let trial = estimate(z, scale, 2_000, SEED, kind).unwrap();
                assert!(
                    (0.0..=50.0).contains(&trial.efficiency),
                    "{kind} z={z} scale={scale}: {}",
                    trial.efficiency
                );
                assert!(trial.hits <= trial.samples);
            }
        }
    }
}

#[test]
fn test_estimate_is_bit_identical_for_same_inputs() {
    let a = estimate(0.8, 0.3, 50_000, SEED, SourceKind::Gaussian).unwrap();
    let b = estimate(0.8, 0.3, 50_000, SEED, SourceKind::Gaussian).unwrap();
    assert_eq!(a.efficiency.to_bits(), b.efficiency.to_bits());
    assert_eq!(
        a.relative_uncertainty.to_bits(),
        b.relative_uncertainty.to_bits()
    );
}

#[test]
fn test_chunk_size_does_not_change_result() {
    let n = 10_007;
    let reference = estimate_chunked(1.3, 0.5, n, 42, SourceKind::Uniform, n).unwrap();
    for chunk in [1, 64, 1_000, 4_096, 1 << 16] {
        let trial = estimate_chunked(1.3, 0.5, n, 42, SourceKind::Uniform, chunk).unwrap();
        assert_eq!(trial, reference, "chunk size {chunk}");
    }
}

#[test]
fn test_contact_with_small_source_hits_everything() {
    let n = 10_000;
    let trial = estimate(0.0, 0.1, n, SEED, SourceKind::Uniform).unwrap();

    assert_eq!(trial.hits, n as u64);
    assert_eq!(trial.efficiency, 50.0);
    assert!((trial.relative_uncertainty - 100.0 / (n as f64).sqrt()).abs() < 1e-12);
}

#[test]
fn test_reference_scenario_converges_to_point_source() {
    let trial = estimate(1.0, 0.1, 100_000, SEED, SourceKind::Uniform).unwrap();
    let absolute_error = trial.efficiency * trial.relative_uncertainty / 100.0;

    assert!(
        (trial.efficiency - point_source(1.0)).abs() < 5.0 * absolute_error,
        "efficiency {} vs point source {}",
        trial.efficiency,
        point_source(1.0)
    );

    let again = estimate(1.0, 0.1, 100_000, SEED, SourceKind::Uniform).unwrap();
    assert_eq!(trial, again);
}

#[test]
fn test_larger_source_lowers_efficiency() {
    let small = estimate(0.5, 0.1, 100_000, SEED, SourceKind::Uniform).unwrap();
    let large = estimate(0.5, 3.0, 100_000, SEED, SourceKind::Uniform).unwrap();
    assert!(large.efficiency < small.efficiency);
}

#[test]
fn test_zero_hits_gives_unbounded_uncertainty() {
    let trial = estimate(1.0e6, 0.0, 1_000, SEED, SourceKind::Uniform).unwrap();
    assert_eq!(trial.hits, 0);
    assert_eq!(trial.efficiency, 0.0);
    assert!(trial.relative_uncertainty.is_infinite());
}

#[test]
fn test_relative_uncertainty_formula() {
    // 100 / sqrt(2 * 1e4 * 25 / 100) = 100 / sqrt(5000)
    let expected = 100.0 / 5000f64.sqrt();
    assert!((relative_uncertainty(25.0, 10_000) - expected).abs() < 1e-12);
    assert!(relative_uncertainty(0.0, 10_000).is_infinite());

    let trial = TrialResult::from_counts(250, 1_000);
    assert_eq!(trial.efficiency, 12.5);
}

#[test]
fn test_zero_samples_rejected() {
    assert_eq!(
        estimate(1.0, 0.1, 0, SEED, SourceKind::Uniform),
        Err(ConfigError::NoSamples)
    );
}

#[test]
fn test_invalid_scale_rejected() {
    let err = estimate(1.0, -0.5, 100, SEED, SourceKind::Gaussian).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Sampling(SamplingError::InvalidScale { .. })
    ));

    let err = estimate(f64::NAN, 0.5, 100, SEED, SourceKind::Uniform).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Sampling(SamplingError::InvalidScale { .. })
    ));
}
