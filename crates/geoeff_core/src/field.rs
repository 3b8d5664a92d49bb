//! Planar point fields stored as parallel coordinate arrays.
//!
//! A [`Point2DField`] is allocated with a fixed number of points, overwritten by a
//! single generator fill and then only read. Index `i` of `x` and `y` together form
//! one logical point.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Index-aligned x/y coordinates of `len()` points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Point2DField {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Unchecked serialized form; converted through [`Point2DField::from_parts`].
#[derive(Deserialize)]
struct RawField {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawField> for Point2DField {
    type Error = FieldError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        Self::from_parts(raw.x, raw.y)
    }
}

impl Point2DField {
    /// A field of `len` points, all at the origin.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            x: vec![0.0; len],
            y: vec![0.0; len],
        }
    }

    /// Build a field from separate coordinate vectors of equal length.
    pub fn from_parts(x: Vec<f64>, y: Vec<f64>) -> Result<Self, FieldError> {
        if x.len() != y.len() {
            return Err(FieldError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// X coordinates
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Resize to `len` points. Existing coordinates are kept, new ones are zero.
    pub(crate) fn resize(&mut self, len: usize) {
        self.x.resize(len, 0.0);
        self.y.resize(len, 0.0);
    }

    /// Mutable coordinate slices for generators.
    pub(crate) fn coords_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.x, &mut self.y)
    }

    /// Add `other` onto this field point by point.
    ///
    /// Lengths are checked before anything is written, so on error the receiver
    /// is left untouched.
    pub fn add(&mut self, other: &Point2DField) -> Result<(), FieldError> {
        if self.len() != other.len() {
            return Err(FieldError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        for (x, dx) in self.x.iter_mut().zip(&other.x) {
            *x += dx;
        }
        for (y, dy) in self.y.iter_mut().zip(&other.y) {
            *y += dy;
        }
        Ok(())
    }

    /// Lazily yields `x_i² + y_i²` for every point.
    pub fn squared_radius(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.x.iter().zip(&self.y).map(|(x, y)| x * x + y * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let err = Point2DField::from_parts(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(err, FieldError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_add_elementwise() {
        let mut a = Point2DField::from_parts(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        let b = Point2DField::from_parts(vec![0.5, -2.0], vec![1.0, 1.0]).unwrap();

        a.add(&b).unwrap();

        assert_eq!(a.x(), &[1.5, 0.0]);
        assert_eq!(a.y(), &[4.0, 5.0]);
    }

    #[test]
    fn test_add_mismatch_leaves_receiver_untouched() {
        let mut a = Point2DField::from_parts(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        let before = a.clone();
        let b = Point2DField::zeros(3);

        let err = a.add(&b).unwrap_err();

        assert_eq!(err, FieldError::LengthMismatch { left: 2, right: 3 });
        assert_eq!(a, before);
    }

    #[test]
    fn test_squared_radius() {
        let field = Point2DField::from_parts(vec![3.0, 0.0, -1.0], vec![4.0, 0.0, 1.0]).unwrap();
        let r_sq: Vec<f64> = field.squared_radius().collect();
        assert_eq!(r_sq, vec![25.0, 0.0, 2.0]);
        assert_eq!(field.squared_radius().len(), field.len());
    }

    #[test]
    fn test_deserialize_rejects_mismatched_lengths() {
        let err = serde_saphyr::from_str::<Point2DField>("x: [3.0, 3.0]\ny: [0.0]");
        assert!(err.is_err());

        let field: Point2DField = serde_saphyr::from_str("x: [3.0, 0.0]\ny: [4.0, 1.0]").unwrap();
        assert_eq!(field.len(), 2);
        assert_eq!(field.squared_radius().len(), field.len());
        assert_eq!(field.y(), &[4.0, 1.0]);
    }

    #[test]
    fn test_resize_keeps_prefix() {
        let mut field = Point2DField::from_parts(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        field.resize(3);
        assert_eq!(field.x(), &[1.0, 2.0, 0.0]);
        field.resize(1);
        assert_eq!(field.y(), &[3.0]);
    }
}
