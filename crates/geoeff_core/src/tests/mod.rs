//! Integration tests for the efficiency engine
//!
//! Tests are organized by topic:
//! - `sampling` - Statistical properties of the point generators
//! - `estimator` - Single-distance efficiency trials
//! - `sweep` - Distance sweeps, annular detectors and configuration checks

mod estimator;
