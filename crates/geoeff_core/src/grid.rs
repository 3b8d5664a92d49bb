//! Distance grids and the analytic point-source reference curve.

/// `n` evenly spaced values from `min` to `max` inclusive.
///
/// A single point yields `[min]` and zero points an empty grid.
#[must_use]
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let delta = (max - min) / (n - 1) as f64;
            (0..n).map(|i| min + delta * i as f64).collect()
        }
    }
}

/// Geometric efficiency (%) of a dimensionless source on the axis of a unit
/// detector at distance `z`.
#[must_use]
pub fn point_source(z: f64) -> f64 {
    50.0 - 50.0 * z / (1.0 + z * z).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_unit_interval() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(2.0, 3.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert_eq!(linspace(1.0, 1.0, 3), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_linspace_descending() {
        assert_eq!(linspace(1.0, 0.0, 3), vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_point_source_at_contact() {
        assert_eq!(point_source(0.0), 50.0);
    }

    #[test]
    fn test_point_source_decreasing_to_zero() {
        let zs = linspace(0.0, 100.0, 1001);
        for pair in zs.windows(2) {
            assert!(point_source(pair[1]) < point_source(pair[0]));
        }
        assert!(point_source(1.0e4) < 1.0e-6);

        // 50 * (1 - 1/sqrt(2))
        assert!((point_source(1.0) - 14.644660940672622).abs() < 1e-12);
    }
}
