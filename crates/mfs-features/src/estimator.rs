//! Multifractal Estimator Interface
//!
//! The estimator turns a preprocessed volume into a vector of Holder-exponent
//! fractal dimensions. Its internals live outside this crate; the gradient and
//! Laplacian transforms default to the reference implementations in
//! `preprocess`.

use crate::error::EstimatorError;
use crate::settings::SummarizerConfig;
use ndarray::Array3;

/// Multifractal spectrum estimator
pub trait MultifractalEstimator {
    /// Per-region fractal dimensions (the MFS vector) of `volume`
    fn fractal_dimensions(&self, volume: &Array3<f64>) -> Result<Vec<f64>, EstimatorError>;

    /// Gradient transform applied when gradient preprocessing is selected
    fn gradient(&self, volume: &Array3<f64>) -> Array3<f64> {
        preprocess::gradient_magnitude(volume)
    }

    /// Laplacian transform applied when Laplacian preprocessing is selected
    fn laplacian(&self, volume: &Array3<f64>) -> Array3<f64> {
        preprocess::laplacian(volume)
    }
}

impl<E: MultifractalEstimator + ?Sized> MultifractalEstimator for &E {
    fn fractal_dimensions(&self, volume: &Array3<f64>) -> Result<Vec<f64>, EstimatorError> {
        (**self).fractal_dimensions(volume)
    }

    fn gradient(&self, volume: &Array3<f64>) -> Array3<f64> {
        (**self).gradient(volume)
    }

    fn laplacian(&self, volume: &Array3<f64>) -> Array3<f64> {
        (**self).laplacian(volume)
    }
}

impl<E: MultifractalEstimator + ?Sized> MultifractalEstimator for Box<E> {
    fn fractal_dimensions(&self, volume: &Array3<f64>) -> Result<Vec<f64>, EstimatorError> {
        (**self).fractal_dimensions(volume)
    }

    fn gradient(&self, volume: &Array3<f64>) -> Array3<f64> {
        (**self).gradient(volume)
    }

    fn laplacian(&self, volume: &Array3<f64>) -> Array3<f64> {
        (**self).laplacian(volume)
    }
}

/// Builds an estimator from the same settings the summarizer runs with
pub trait EstimatorFactory {
    type Estimator: MultifractalEstimator;

    fn build(self, config: &SummarizerConfig) -> Result<Self::Estimator, EstimatorError>;
}

impl<F, E> EstimatorFactory for F
where
    F: FnOnce(&SummarizerConfig) -> Result<E, EstimatorError>,
    E: MultifractalEstimator,
{
    type Estimator = E;

    fn build(self, config: &SummarizerConfig) -> Result<E, EstimatorError> {
        self(config)
    }
}
