//! Adaptive Threshold Estimation
//!
//! Picks the intensity at which the cumulative histogram first holds more
//! than three quarters of all voxels.

use crate::error::VolumeError;
use ndarray::{Array3, ArrayBase, Data, Dimension};
use std::collections::BTreeMap;
use tracing::debug;

/// Fraction of total voxel mass the cumulative histogram must exceed
pub const MASS_FRACTION: f64 = 0.75;

/// Estimate the binarization threshold of a 3D integer volume.
///
/// Histogram bins are unit-width over `[min, max]`. The result is
/// `min + i` for the first bin `i` whose cumulative share is strictly
/// greater than [`MASS_FRACTION`].
pub fn estimate_threshold<S, D>(arr: &ArrayBase<S, D>) -> Result<i32, VolumeError>
where
    S: Data<Elem = i32>,
    D: Dimension,
{
    if arr.ndim() != 3 {
        return Err(VolumeError::InvalidInput(format!(
            "expected a 3-dimensional array, got {} dimensions",
            arr.ndim()
        )));
    }
    if arr.is_empty() {
        return Err(VolumeError::InvalidInput(
            "cannot threshold an empty volume".to_string(),
        ));
    }

    // Empty bins never change the cumulative sum, so only occupied bins are kept.
    let mut histogram: BTreeMap<i32, usize> = BTreeMap::new();
    for &v in arr.iter() {
        *histogram.entry(v).or_insert(0) += 1;
    }

    let min = *histogram.keys().next().unwrap_or(&0);
    let total_voxels = arr.len() as f64;

    let mut cumulative = 0usize;
    for (&value, &count) in &histogram {
        cumulative += count;
        let percentage = cumulative as f64 / total_voxels;
        if percentage > MASS_FRACTION {
            debug!(threshold = value, percentage, "Threshold estimated");
            return Ok(value);
        }
    }

    Ok(min)
}

/// Binarize a volume: `true` where the voxel is strictly above `threshold`
pub fn binarize(arr: &Array3<i32>, threshold: i32) -> Array3<bool> {
    arr.mapv(|v| v > threshold)
}
