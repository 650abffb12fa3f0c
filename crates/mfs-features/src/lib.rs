//! Multifractal Spectrum Statistics
//!
//! Summarizes the multifractal spectrum of a masked 3D volume into a
//! fixed-length feature vector for texture classification:
//! - Structure and mask ingestion from `.npz` containers
//! - Region-of-interest masking
//! - Optional gradient or Laplacian preprocessing
//! - Ten distribution statistics of the estimator's MFS vector

mod error;
mod estimator;
mod features;
mod logging;
mod settings;
mod statistics;

pub use error::{ConfigError, EstimatorError, FeatureError};
pub use estimator::{EstimatorFactory, MultifractalEstimator};
pub use features::{
    compute_features, FeatureExtractor, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use logging::{init_logging, init_logging_with_level};
pub use settings::{EstimatorParams, Preprocessing, SummarizerConfig, ENV_PREFIX};
pub use statistics::{median, SpectrumStatistics};
