use std::fmt;

/// Errors from elementwise field arithmetic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The two operands hold a different number of points
    LengthMismatch { left: usize, right: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::LengthMismatch { left, right } => {
                write!(
                    f,
                    "vector operation on fields of different length ({left} vs {right})"
                )
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Errors related to random point generation
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// Scale parameter is negative or not finite
    InvalidScale {
        distribution: &'static str,
        scale: f64,
    },
    /// The underlying distribution rejected its parameters
    InvalidDistribution {
        distribution: &'static str,
        reason: String,
    },
    /// Distribution name could not be parsed
    UnknownKind(String),
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::InvalidScale {
                distribution,
                scale,
            } => write!(f, "invalid {distribution} scale {scale}"),
            SamplingError::InvalidDistribution {
                distribution,
                reason,
            } => write!(f, "invalid {distribution} parameters: {reason}"),
            SamplingError::UnknownKind(name) => write!(
                f,
                "not a valid source type '{name}', choose 'uniform' or 'gaussian'"
            ),
        }
    }
}

impl std::error::Error for SamplingError {}

/// Errors raised while validating or running an efficiency estimate or sweep
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A trial was requested with no samples
    NoSamples,
    /// The distance grid has no points
    EmptyGrid,
    /// A numeric parameter is NaN or infinite
    NonFinite { name: &'static str, value: f64 },
    /// A distance or size parameter is below zero
    Negative { name: &'static str, value: f64 },
    /// Samples per point exceed the supported power of ten
    PowerTooLarge { power: u32, max: u32 },
    /// Annular outer/inner radius ratio must exceed one
    InvalidDetectorRatio(f64),
    /// Annular detector configured without a radius ratio
    MissingDetectorRatio,
    /// Detector name could not be parsed
    UnknownDetector(String),
    Field(FieldError),
    Sampling(SamplingError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoSamples => write!(f, "number of samples per point must be positive"),
            ConfigError::EmptyGrid => write!(f, "distance grid must contain at least one point"),
            ConfigError::NonFinite { name, value } => {
                write!(f, "{name} must be a finite number (got {value})")
            }
            ConfigError::Negative { name, value } => {
                write!(f, "{name} must not be negative (got {value})")
            }
            ConfigError::PowerTooLarge { power, max } => {
                write!(f, "sample power {power} exceeds the maximum of {max}")
            }
            ConfigError::InvalidDetectorRatio(ratio) => {
                write!(
                    f,
                    "detector outer/inner ratio must be greater than 1 (got {ratio})"
                )
            }
            ConfigError::MissingDetectorRatio => {
                write!(f, "annular detector requires an outer/inner radius ratio")
            }
            ConfigError::UnknownDetector(name) => write!(
                f,
                "detector types can only be 'circular' or 'annular' (got '{name}')"
            ),
            ConfigError::Field(e) => write!(f, "{e}"),
            ConfigError::Sampling(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Field(e) => Some(e),
            ConfigError::Sampling(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for ConfigError {
    fn from(err: FieldError) -> Self {
        ConfigError::Field(err)
    }
}

impl From<SamplingError> for ConfigError {
    fn from(err: SamplingError) -> Self {
        ConfigError::Sampling(err)
    }
}
