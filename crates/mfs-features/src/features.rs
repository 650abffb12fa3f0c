//! Feature Vector Assembly

use crate::error::FeatureError;
use crate::estimator::{EstimatorFactory, MultifractalEstimator};
use crate::settings::{Preprocessing, SummarizerConfig};
use crate::statistics::SpectrumStatistics;
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use volume_io::{apply_mask_in_place, VolumeLoader, MASK_ARRAY, STRUCTURE_ARRAY};

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 10;

/// Feature names, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "max",
    "min",
    "mean",
    "std_dev",
    "median",
    "sum",
    "skewness",
    "kurtosis",
    "variation",
    "variance",
];

/// Ten distribution statistics of an MFS vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature values, ordered as [`FEATURE_NAMES`]
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Largest fractal dimension
    pub fn max(&self) -> f64 {
        self.values[0]
    }

    /// Smallest fractal dimension
    pub fn min(&self) -> f64 {
        self.values[1]
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        self.values[2]
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> f64 {
        self.values[3]
    }

    /// Median fractal dimension
    pub fn median(&self) -> f64 {
        self.values[4]
    }

    /// Sum over the spectrum
    pub fn sum(&self) -> f64 {
        self.values[5]
    }

    /// Biased sample skewness
    pub fn skewness(&self) -> f64 {
        self.values[6]
    }

    /// Fisher (excess) kurtosis, biased
    pub fn kurtosis(&self) -> f64 {
        self.values[7]
    }

    /// Coefficient of variation
    pub fn variation(&self) -> f64 {
        self.values[8]
    }

    /// Unbiased sample variance
    pub fn variance(&self) -> f64 {
        self.values[9]
    }

    /// (name, value) pairs in vector order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    /// Reduce an MFS vector to its feature vector
    pub fn from_spectrum(mfs: &[f64]) -> Result<Self, FeatureError> {
        SpectrumStatistics::compute(mfs)
            .map(Self::from)
            .ok_or(FeatureError::EmptySpectrum)
    }
}

impl From<SpectrumStatistics> for FeatureVector {
    fn from(s: SpectrumStatistics) -> Self {
        Self {
            values: [
                s.max,
                s.min,
                s.mean,
                s.std_dev,
                s.median,
                s.sum,
                s.skewness,
                s.kurtosis,
                s.variation,
                s.variance,
            ],
        }
    }
}

/// Extracts multifractal spectrum statistics from masked volumes
pub struct FeatureExtractor<E> {
    config: SummarizerConfig,
    estimator: E,
}

impl<E: MultifractalEstimator> FeatureExtractor<E> {
    /// Create a new feature extractor
    pub fn new(config: SummarizerConfig, estimator: E) -> Self {
        Self { config, estimator }
    }

    /// Configuration this extractor runs with
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Underlying multifractal estimator
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Load the configured structure and mask volumes and extract features
    pub fn extract(&self) -> Result<FeatureVector, FeatureError> {
        let (volume, mask) = load_volumes(&self.config)?;
        self.extract_from_volumes(volume, &mask)
    }

    /// Extract features from in-memory volumes
    pub fn extract_from_volumes(
        &self,
        mut volume: Array3<i32>,
        mask: &Array3<i32>,
    ) -> Result<FeatureVector, FeatureError> {
        apply_mask_in_place(&mut volume, mask)?;

        let masked = volume.mapv(f64::from);
        let prepared = match self.config.params.preprocessing {
            Preprocessing::Gradient => {
                debug!("Applying gradient preprocessing");
                self.estimator.gradient(&masked)
            }
            Preprocessing::Laplacian => {
                debug!("Applying laplacian preprocessing");
                self.estimator.laplacian(&masked)
            }
            Preprocessing::None => masked,
        };

        let mfs = self.estimator.fractal_dimensions(&prepared)?;
        debug!(len = mfs.len(), "Computed multifractal spectrum");

        let features = FeatureVector::from_spectrum(&mfs)?;
        info!(
            preprocessing = ?self.config.params.preprocessing,
            mean = features.mean(),
            std_dev = features.std_dev(),
            "Extracted MFS features"
        );
        Ok(features)
    }
}

/// Load "S" and "M" as raw intensities
fn load_volumes(config: &SummarizerConfig) -> Result<(Array3<i32>, Array3<i32>), FeatureError> {
    let volume = VolumeLoader::open(&config.structure_path)?
        .load(STRUCTURE_ARRAY, true)?
        .into_intensity();
    let mask = VolumeLoader::open(&config.mask_path)?
        .load(MASK_ARRAY, true)?
        .into_intensity();
    Ok((volume, mask))
}

/// Run the full pipeline: load, build the estimator, mask, preprocess, reduce
pub fn compute_features<F>(
    config: SummarizerConfig,
    factory: F,
) -> Result<FeatureVector, FeatureError>
where
    F: EstimatorFactory,
{
    let (volume, mask) = load_volumes(&config)?;
    let estimator = factory.build(&config)?;
    FeatureExtractor::new(config, estimator).extract_from_volumes(volume, &mask)
}
