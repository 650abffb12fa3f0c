//! Statistical Features of the Multifractal Spectrum

use serde::{Deserialize, Serialize};

/// Relative resolution below which the second moment counts as zero
const MOMENT_RESOLUTION: f64 = 1e-15;

/// Distribution statistics of an MFS vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumStatistics {
    /// Maximum value
    pub max: f64,
    /// Minimum value
    pub min: f64,
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Median (mean of the two middle values for even lengths)
    pub median: f64,
    /// Sum of all values
    pub sum: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Excess kurtosis (tailedness)
    pub kurtosis: f64,
    /// Coefficient of variation, std_dev / mean
    pub variation: f64,
    /// Unbiased sample variance (n - 1 denominator)
    pub variance: f64,
}

impl SpectrumStatistics {
    /// Compute statistics from a slice of values; `None` when empty
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;

        let sum = values.iter().sum::<f64>();
        let mean = sum / n;

        // Min/Max, NaN-propagating
        let max = values.iter().copied().fold(f64::NEG_INFINITY, nan_max);
        let min = values.iter().copied().fold(f64::INFINITY, nan_min);

        let median = median(values);

        // Central moments
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for &v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
            m4 += d * d * d * d;
        }

        let sum_sq = m2;
        m2 /= n;
        m3 /= n;
        m4 /= n;

        let std_dev = m2.sqrt();

        // Moments of a flat distribution are undefined
        let flat = m2 <= (MOMENT_RESOLUTION * mean).powi(2);

        // Skewness: E[(X-μ)³] / σ³
        let skewness = if flat { f64::NAN } else { m3 / m2.powf(1.5) };

        // Kurtosis: E[(X-μ)⁴] / σ⁴ - 3 (excess kurtosis)
        let kurtosis = if flat { f64::NAN } else { m4 / (m2 * m2) - 3.0 };

        // Non-finite when the mean is zero
        let variation = std_dev / mean;

        // NaN for a single value
        let variance = sum_sq / (n - 1.0);

        Some(Self {
            max,
            min,
            mean,
            std_dev,
            median,
            sum,
            skewness,
            kurtosis,
            variation,
            variance,
        })
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Median of an unsorted slice; NaN if the slice is empty or holds a NaN
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_moments() {
        let stats = SpectrumStatistics::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(close(stats.mean, 5.0));
        assert!(close(stats.std_dev, 2.0));
        assert!(close(stats.sum, 40.0));
        assert!(close(stats.median, 4.5));
        assert!(close(stats.max, 9.0));
        assert!(close(stats.min, 2.0));
        assert!(close(stats.variance, 32.0 / 7.0));
        assert!(close(stats.variation, 0.4));
    }

    #[test]
    fn test_skewness_and_kurtosis() {
        let values = [0.0, 0.0, 1.0, 2.0, 3.0];
        let stats = SpectrumStatistics::compute(&values).unwrap();
        let mean = 1.2;
        let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 5.0;
        let m3: f64 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / 5.0;
        let m4: f64 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / 5.0;
        assert!(close(stats.skewness, m3 / m2.powf(1.5)));
        assert!(close(stats.kurtosis, m4 / (m2 * m2) - 3.0));
        assert!(stats.skewness > 0.0);
    }

    #[test]
    fn test_symmetric_distribution_has_zero_skew() {
        let stats = SpectrumStatistics::compute(&[1.0, 2.0, 3.0]).unwrap();
        assert!(close(stats.skewness, 0.0));
        assert!(close(stats.kurtosis, -1.5));
    }

    #[test]
    fn test_constant_values() {
        let stats = SpectrumStatistics::compute(&[2.5; 6]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.variation, 0.0);
        assert!(stats.skewness.is_nan());
        assert!(stats.kurtosis.is_nan());
    }

    #[test]
    fn test_zero_mean_variation_is_not_finite() {
        let stats = SpectrumStatistics::compute(&[-1.0, 1.0]).unwrap();
        assert!(!stats.variation.is_finite());

        let zeros = SpectrumStatistics::compute(&[0.0; 4]).unwrap();
        assert!(zeros.variation.is_nan());
    }

    #[test]
    fn test_single_value() {
        let stats = SpectrumStatistics::compute(&[3.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert!(stats.variance.is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        let stats = SpectrumStatistics::compute(&[1.0, f64::NAN, 3.0]).unwrap();
        assert!(stats.max.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.median.is_nan());
    }

    #[test]
    fn test_empty_values() {
        assert!(SpectrumStatistics::compute(&[]).is_none());
    }

    #[test]
    fn test_median_empty() {
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[4.0, 1.0]), 2.5);
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
    }

    proptest! {
        #[test]
        fn prop_reduction_is_deterministic(values in proptest::collection::vec(-10.0f64..10.0, 1..64)) {
            let a = SpectrumStatistics::compute(&values).unwrap();
            let b = SpectrumStatistics::compute(&values).unwrap();
            prop_assert_eq!(a.max.to_bits(), b.max.to_bits());
            prop_assert_eq!(a.mean.to_bits(), b.mean.to_bits());
            prop_assert_eq!(a.std_dev.to_bits(), b.std_dev.to_bits());
            prop_assert_eq!(a.variance.to_bits(), b.variance.to_bits());
            prop_assert_eq!(a.skewness.to_bits(), b.skewness.to_bits());
        }

        #[test]
        fn prop_order_statistics_bounded(values in proptest::collection::vec(-10.0f64..10.0, 1..64)) {
            let s = SpectrumStatistics::compute(&values).unwrap();
            prop_assert!(s.min <= s.median && s.median <= s.max);
            prop_assert!(s.min <= s.mean + 1e-9 && s.mean <= s.max + 1e-9);
        }
    }
}
