//! Run parameters: interactive prompts or a YAML parameter file.
//!
//! Both sources produce a [`RunParameters`], which is combined with the source and
//! detector kinds from the command line into a [`SweepConfig`].
//!
//! Example parameter file:
//! ```yaml
//! z_min: 0.0
//! z_max: 5.0
//! points: 26
//! source_scale: 0.1
//! power: 6
//! detector_ratio: 2.0   # annular detectors only
//! output: efficiency.txt
//! ```

use std::collections::VecDeque;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use geoeff_core::{
    ConfigError, Detector, DetectorShape, DistanceGrid, SourceKind, SweepConfig,
    samples_from_power,
};
use serde::{Deserialize, Serialize};

/// Answers to the parameter prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Smallest distance, in detector radii
    pub z_min: f64,
    /// Largest distance, in detector radii
    pub z_max: f64,
    /// Number of grid points
    pub points: usize,
    /// Source radius or sigma, in detector radii
    pub source_scale: f64,
    /// Samples per grid point as a power of ten
    pub power: u32,
    /// Outer/inner radius ratio (annular detectors only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_ratio: Option<f64>,
    /// Output file path
    pub output: PathBuf,
}

impl RunParameters {
    /// Build the sweep configuration for the given source and detector kinds.
    pub fn sweep_config(
        &self,
        source_kind: SourceKind,
        detector: DetectorShape,
        seed: u64,
        parallel: bool,
    ) -> Result<SweepConfig, ConfigError> {
        let config = SweepConfig {
            grid: DistanceGrid {
                z_min: self.z_min,
                z_max: self.z_max,
                points: self.points,
            },
            source_kind,
            source_scale: self.source_scale,
            samples_per_point: samples_from_power(self.power)?,
            detector: Detector::from_shape(detector, self.detector_ratio)?,
            seed,
            parallel,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Error types for parameter entry
#[derive(Debug)]
pub enum ParamsError {
    Io(String),
    Parse(String),
    /// Input ended before the named answer was given
    MissingAnswer(&'static str),
    /// The answer to the named prompt could not be parsed
    InvalidAnswer { field: &'static str, value: String },
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamsError::Io(msg) => write!(f, "IO error: {}", msg),
            ParamsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ParamsError::MissingAnswer(field) => write!(f, "no value given for {}", field),
            ParamsError::InvalidAnswer { field, value } => {
                write!(f, "invalid value '{}' for {}", value, field)
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// Load run parameters from a YAML file.
pub fn load_parameters(path: &Path) -> Result<RunParameters, ParamsError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ParamsError::Io(format!("Failed to read parameters: {}", e)))?;

    serde_saphyr::from_str(&content)
        .map_err(|e| ParamsError::Parse(format!("Failed to parse parameters: {}", e)))
}

/// Whitespace-separated answers read from an input stream, one line at a time.
struct Answers<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Answers<'_, R, W> {
    fn ask<T: FromStr>(&mut self, prompt: &str, field: &'static str) -> Result<T, ParamsError> {
        writeln!(self.output, "{prompt}")
            .and_then(|()| self.output.flush())
            .map_err(|e| ParamsError::Io(e.to_string()))?;

        while self.pending.is_empty() {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| ParamsError::Io(e.to_string()))?;
            if read == 0 {
                return Err(ParamsError::MissingAnswer(field));
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }

        let token = self.pending.pop_front().unwrap_or_default();
        token.parse().map_err(|_| ParamsError::InvalidAnswer {
            field,
            value: token,
        })
    }
}

/// Ask for every run parameter on `output`, reading answers from `input`.
///
/// The detector ratio is only requested for annular detectors.
pub fn prompt_parameters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    detector: DetectorShape,
) -> Result<RunParameters, ParamsError> {
    let mut answers = Answers {
        input,
        output,
        pending: VecDeque::new(),
    };

    let z_min = answers.ask("z_min/rd:", "z_min")?;
    let z_max = answers.ask("z_max/rd:", "z_max")?;
    let points = answers.ask("number of points:", "number of points")?;
    let source_scale = answers.ask("source/rd:", "source size")?;
    let power = answers.ask("Power:", "power")?;
    let detector_ratio = match detector {
        DetectorShape::Annular => Some(answers.ask("Detector outer/inner:", "detector ratio")?),
        DetectorShape::Circular => None,
    };
    let output: String = answers.ask("Filename:", "filename")?;

    Ok(RunParameters {
        z_min,
        z_max,
        points,
        source_scale,
        power,
        detector_ratio,
        output: PathBuf::from(output),
    })
}
