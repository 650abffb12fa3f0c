//! Feature Extraction Error Types

use thiserror::Error;
use volume_io::VolumeError;

/// Failure reported by a multifractal estimator
#[derive(Debug, Clone, Error)]
pub enum EstimatorError {
    /// Estimator could not be configured from the given settings
    #[error("Estimator configuration rejected: {0}")]
    Configuration(String),

    /// Dimension computation failed
    #[error("Fractal dimension computation failed: {0}")]
    Failed(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    /// Values are out of range or contradictory
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that abort feature extraction for a volume
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Loading or masking failed
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// Estimator construction or evaluation failed
    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Estimator returned no dimension values
    #[error("Multifractal spectrum is empty")]
    EmptySpectrum,
}
